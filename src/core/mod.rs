pub mod collection;
pub mod csv_io;

pub use crate::domain::model::StudentReference;
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
pub use collection::{ReferenceCollection, SortKey};
pub use csv_io::SaveOutcome;
