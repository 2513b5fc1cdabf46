use crate::utils::error::Result;

/// Whole-file access used by CSV load and save.
///
/// Implementations report a missing file as `RefError::NotFoundError` so that
/// loaders can tell it apart from other I/O failures.
pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}
