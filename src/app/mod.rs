pub mod menu;

pub use menu::MenuSession;
