use crate::domain::ports::Storage;
use crate::utils::error::{RefError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    base_path: Option<PathBuf>,
}

impl LocalStorage {
    /// Resolves relative paths against `base_path`.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: Some(base_path.into()),
        }
    }

    /// Uses paths as given, relative to the working directory.
    pub fn current_dir() -> Self {
        Self::default()
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.base_path {
            Some(base) => base.join(path),
            None => PathBuf::from(path),
        }
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        tracing::debug!("Reading {}", full_path.display());

        fs::read(&full_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => RefError::NotFoundError {
                path: full_path.display().to_string(),
            },
            _ => RefError::IoError(e),
        })
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        tracing::debug!("Writing {} bytes to {}", data.len(), full_path.display());
        fs::write(full_path, data)?;
        Ok(())
    }
}

/// Number of entries directly inside `dir` (files and subdirectories alike).
pub fn count_entries(dir: impl AsRef<Path>) -> Result<usize> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|e| match e.kind() {
        ErrorKind::NotFound => RefError::NotFoundError {
            path: dir.display().to_string(),
        },
        _ => RefError::IoError(e),
    })?;

    let mut count = 0;
    for entry in entries {
        entry?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read_under_base_path() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage.write_file("nested/data.csv", b"hello").unwrap();
        assert_eq!(storage.read_file("nested/data.csv").unwrap(), b"hello");
        assert!(temp_dir.path().join("nested/data.csv").exists());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        let err = storage.read_file("absent.csv").unwrap_err();
        assert!(matches!(err, RefError::NotFoundError { .. }));
    }

    #[test]
    fn test_count_entries() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.csv"), "").unwrap();
        fs::write(temp_dir.path().join("b.csv"), "").unwrap();
        fs::create_dir(temp_dir.path().join("archive")).unwrap();

        assert_eq!(count_entries(temp_dir.path()).unwrap(), 3);
        assert!(matches!(
            count_entries(temp_dir.path().join("nope")),
            Err(RefError::NotFoundError { .. })
        ));
    }
}
