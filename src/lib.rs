pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::adapters::storage::LocalStorage;
pub use crate::core::{ReferenceCollection, SaveOutcome, SortKey, Storage};
pub use config::toml_config::AppConfig;
pub use domain::model::{ReferenceBuilder, StudentReference};
pub use utils::error::{RefError, Result};
pub use utils::validation::Validate;
