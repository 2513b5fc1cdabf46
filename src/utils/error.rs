use thiserror::Error;

#[derive(Error, Debug)]
pub enum RefError {
    #[error("missing required fields: {}", .missing.join(", "))]
    ValidationError { missing: Vec<&'static str> },

    #[error("CSV parse error at line {line}: {message}")]
    ParseError { line: u64, message: String },

    #[error("File {path} not found")]
    NotFoundError { path: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Index {index} out of range for collection of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Configuration error in {field}: {message}")]
    ConfigError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl RefError {
    /// Short message for the console, without the internal detail.
    pub fn user_friendly_message(&self) -> String {
        match self {
            RefError::ValidationError { .. } => "Не все поля заполнены".to_string(),
            RefError::ParseError { line, .. } => format!("Ошибка загрузки (строка {})", line),
            RefError::NotFoundError { path } => format!("Файл {} не найден", path),
            RefError::IoError(_) | RefError::CsvError(_) => "Ошибка ввода-вывода".to_string(),
            RefError::IndexOutOfRange { index, .. } => format!("Нет записи с номером {}", index),
            RefError::ConfigError { field, .. } | RefError::InvalidConfigValueError { field, .. } => {
                format!("Ошибка конфигурации: {}", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RefError::ValidationError { .. } => "Fill in every field; a zero stipend counts as missing",
            RefError::ParseError { .. } => {
                "Check the header row and that the stipend column holds a decimal number"
            }
            RefError::NotFoundError { .. } => "Check the --data-file path or storage.base_dir",
            RefError::IoError(_) | RefError::CsvError(_) => {
                "Check file permissions and available disk space"
            }
            RefError::IndexOutOfRange { .. } => "Use an index smaller than the collection length",
            RefError::ConfigError { .. } | RefError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and try again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, RefError>;
