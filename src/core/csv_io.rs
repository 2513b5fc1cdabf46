use crate::adapters::storage::LocalStorage;
use crate::core::collection::ReferenceCollection;
use crate::domain::model::{
    StudentReference, COLUMNS, COLUMN_DATE, COLUMN_DESTINATION, COLUMN_FULL_NAME, COLUMN_ID,
    COLUMN_STIPEND,
};
use crate::domain::ports::Storage;
use crate::utils::error::{RefError, Result};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::path::Path;

pub const DELIMITER: u8 = b';';
const BOM: &str = "\u{feff}";

/// Result of a reporting save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Written { rows: usize },
    NothingToSave,
    Failed,
}

/// Positions of the known columns inside one file's header row.
#[derive(Clone, Copy)]
struct ColumnIndex {
    id: usize,
    date: usize,
    full_name: usize,
    stipend: usize,
    destination: usize,
}

impl ColumnIndex {
    /// Resolved when the first data row arrives, so a file without rows loads
    /// empty whatever its header says. `line` is that row's line.
    fn from_headers(headers: &StringRecord, line: u64) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| RefError::ParseError {
                    line,
                    message: format!("missing column '{}'", name),
                })
        };

        Ok(Self {
            id: find(COLUMN_ID)?,
            date: find(COLUMN_DATE)?,
            full_name: find(COLUMN_FULL_NAME)?,
            stipend: find(COLUMN_STIPEND)?,
            destination: find(COLUMN_DESTINATION)?,
        })
    }

    fn parse_row(&self, row: &StringRecord, line: u64) -> Result<StudentReference> {
        let field = |index: usize, name: &str| {
            row.get(index).ok_or_else(|| RefError::ParseError {
                line,
                message: format!("row has no value for '{}'", name),
            })
        };

        let stipend_text = field(self.stipend, COLUMN_STIPEND)?;
        let stipend = parse_stipend(stipend_text).ok_or_else(|| RefError::ParseError {
            line,
            message: format!("stipend '{}' is not a number", stipend_text),
        })?;

        Ok(StudentReference::builder()
            .id(field(self.id, COLUMN_ID)?)
            .date(field(self.date, COLUMN_DATE)?)
            .full_name(field(self.full_name, COLUMN_FULL_NAME)?)
            .stipend(stipend)
            .destination(field(self.destination, COLUMN_DESTINATION)?)
            .build())
    }
}

/// Decimal text with surrounding whitespace allowed. Single underscores between
/// digits group thousands (`1_500.5`).
pub fn parse_stipend(text: &str) -> Option<f64> {
    let text = text.trim();
    if !text.contains('_') {
        return text.parse().ok();
    }

    let bytes = text.as_bytes();
    let grouped_ok = bytes.iter().enumerate().all(|(i, b)| {
        *b != b'_'
            || (i > 0
                && i + 1 < bytes.len()
                && bytes[i - 1].is_ascii_digit()
                && bytes[i + 1].is_ascii_digit())
    });
    if !grouped_ok {
        return None;
    }
    text.replace('_', "").parse().ok()
}

/// Parses a whole file. The first bad row aborts the parse.
pub fn parse_csv(data: &[u8]) -> Result<ReferenceCollection> {
    let text = std::str::from_utf8(data).map_err(|e| RefError::ParseError {
        line: 0,
        message: format!("file is not valid UTF-8: {}", e),
    })?;
    let text = text.strip_prefix(BOM).unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let mut columns: Option<ColumnIndex> = None;
    let mut collection = ReferenceCollection::new();

    for result in reader.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let index = match columns {
            Some(index) => index,
            None => {
                let index = ColumnIndex::from_headers(&headers, line)?;
                columns = Some(index);
                index
            }
        };
        let reference = index.parse_row(&row, line)?;

        collection.add(reference)?;
    }

    Ok(collection)
}

/// Serializes the collection with the fixed header, prefixed by a BOM.
pub fn render_csv(collection: &ReferenceCollection) -> Result<Vec<u8>> {
    let mut buffer = BOM.as_bytes().to_vec();
    {
        let mut writer = WriterBuilder::new()
            .delimiter(DELIMITER)
            .from_writer(&mut buffer);

        writer.write_record(COLUMNS)?;
        for reference in collection {
            writer.write_record(reference.to_record_map().iter().map(|(_, value)| value))?;
        }
        writer.flush()?;
    }
    Ok(buffer)
}

impl ReferenceCollection {
    /// Loads and validates every row, failing on the first problem.
    pub fn try_load<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        let data = storage.read_file(path)?;
        let collection = parse_csv(&data)?;
        tracing::debug!("Parsed {} references from {}", collection.len(), path);
        Ok(collection)
    }

    /// Like [`try_load`](Self::try_load) but logs the failure and returns `None`.
    pub fn load<S: Storage>(storage: &S, path: &str) -> Option<Self> {
        match Self::try_load(storage, path) {
            Ok(collection) => {
                tracing::info!("Loaded {} references from {}", collection.len(), path);
                Some(collection)
            }
            Err(e) => {
                tracing::error!("Failed to load {}: {}", path, e);
                None
            }
        }
    }

    /// Loads from the local filesystem.
    pub fn from_csv(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref().to_string_lossy();
        Self::load(&LocalStorage::current_dir(), &path)
    }

    /// Writes every reference. Returns the row count; an empty collection writes
    /// nothing and returns 0.
    pub fn try_save<S: Storage>(&self, storage: &S, path: &str) -> Result<usize> {
        if self.is_empty() {
            return Ok(0);
        }
        let data = render_csv(self)?;
        storage.write_file(path, &data)?;
        Ok(self.len())
    }

    /// Like [`try_save`](Self::try_save) but logs the outcome instead of failing.
    pub fn save<S: Storage>(&self, storage: &S, path: &str) -> SaveOutcome {
        match self.try_save(storage, path) {
            Ok(0) => {
                tracing::warn!("Nothing to save to {}", path);
                SaveOutcome::NothingToSave
            }
            Ok(rows) => {
                tracing::info!("Saved {} references to {}", rows, path);
                SaveOutcome::Written { rows }
            }
            Err(e) => {
                tracing::error!("Failed to save {}: {}", path, e);
                SaveOutcome::Failed
            }
        }
    }

    /// Saves to the local filesystem.
    pub fn save_to_csv(&self, path: impl AsRef<Path>) -> SaveOutcome {
        let path = path.as_ref().to_string_lossy();
        self.save(&LocalStorage::current_dir(), &path)
    }
}
