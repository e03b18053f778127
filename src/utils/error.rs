use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Unrecognized date in column '{field}'{}: '{value}'", row_suffix(.row))]
    DateFormatError {
        field: String,
        value: String,
        row: Option<usize>,
    },

    #[error("Cannot convert value in column '{field}'{}: '{value}'", row_suffix(.row))]
    ValueConversionError {
        field: String,
        value: String,
        row: Option<usize>,
    },

    #[error("Notification to {recipient} failed: {message}")]
    NotificationError { recipient: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

fn row_suffix(row: &Option<usize>) -> String {
    row.map(|r| format!(" (record {})", r)).unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Normalization,
    Notification,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,      // 警告，但成功
            ErrorSeverity::Medium => 2,   // 重試錯誤
            ErrorSeverity::High => 1,     // 處理錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        }
    }
}

impl EtlError {
    /// 附上資料列位置 (1 起算)，只影響正規化錯誤
    pub fn at_row(self, position: usize) -> Self {
        match self {
            EtlError::DateFormatError { field, value, .. } => EtlError::DateFormatError {
                field,
                value,
                row: Some(position),
            },
            EtlError::ValueConversionError { field, value, .. } => {
                EtlError::ValueConversionError {
                    field,
                    value,
                    row: Some(position),
                }
            }
            other => other,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
            EtlError::CsvError(_) | EtlError::ValidationError { .. } => ErrorCategory::Input,
            EtlError::DateFormatError { .. }
            | EtlError::ValueConversionError { .. }
            | EtlError::ProcessingError { .. } => ErrorCategory::Normalization,
            EtlError::NotificationError { .. } | EtlError::HttpError(_) => {
                ErrorCategory::Notification
            }
            EtlError::ZipError(_) | EtlError::SerializationError(_) => ErrorCategory::Output,
            EtlError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EtlError::NotificationError { .. } => ErrorSeverity::Low,
            EtlError::HttpError(_) => ErrorSeverity::Medium,
            EtlError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::DateFormatError { field, .. } => format!(
                "Fix the '{}' cell: use a Spanish month name (e.g. '15 Marzo 2023') or numeric day/month/year with a 4-digit year",
                field
            ),
            EtlError::ValueConversionError { field, .. } => format!(
                "Fix the '{}' cell: amounts must look like '1.234,56' or '10,5'",
                field
            ),
            EtlError::CsvError(_) => {
                "Check that the input file has the expected header row and consistent columns"
                    .to_string()
            }
            EtlError::IoError(_) => "Check that the paths exist and are writable".to_string(),
            EtlError::HttpError(_) | EtlError::NotificationError { .. } => {
                "Check the webhook URL and API token, then re-send the failed messages".to_string()
            }
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => {
                "Review the configuration file or command line flags".to_string()
            }
            EtlError::ZipError(_) | EtlError::SerializationError(_) => {
                "Check free disk space and the archive name".to_string()
            }
            EtlError::ProcessingError { .. } | EtlError::ValidationError { .. } => {
                "Inspect the input data and run again with --verbose".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::DateFormatError { .. } | EtlError::ValueConversionError { .. } => {
                format!("The input data needs fixing. {}", self)
            }
            EtlError::CsvError(_) => format!("Could not read the dataset. {}", self),
            EtlError::IoError(e) => format!("File system problem: {}", e),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
