use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Input error: {message}")]
    InputError { message: String },

    #[error("Data error: {message}")]
    DataError { message: String },

    #[error("Clipboard error: {message}")]
    ClipboardError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Clipboard,
    System,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ChartError {
    pub fn input(message: impl Into<String>) -> Self {
        ChartError::InputError {
            message: message.into(),
        }
    }

    pub fn data(message: impl Into<String>) -> Self {
        ChartError::DataError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ChartError::InputError { .. } => ErrorCategory::Input,
            ChartError::DataError { .. } => ErrorCategory::Data,
            ChartError::ClipboardError { .. } => ErrorCategory::Clipboard,
            ChartError::IoError(_) => ErrorCategory::System,
            ChartError::ConfigError { .. }
            | ChartError::ConfigValidationError { .. }
            | ChartError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 複製失敗不影響已產生的文件
            ErrorCategory::Clipboard => ErrorSeverity::Low,
            ErrorCategory::Input | ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Message shown to the person who pasted the data.
    pub fn user_friendly_message(&self) -> String {
        match self {
            ChartError::InputError { message } => format!("Could not read the input: {}", message),
            ChartError::DataError { message } => {
                format!("The data cannot be charted: {}", message)
            }
            ChartError::ClipboardError { message } => {
                format!("Copying to the clipboard failed: {}", message)
            }
            ChartError::IoError(e) => format!("A file operation failed: {}", e),
            ChartError::ConfigError { message } => format!("Configuration problem: {}", message),
            ChartError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            ChartError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("'{}' is not a valid value for '{}': {}", value, field, reason),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ChartError::InputError { .. } => {
                "Paste a JSON array of objects, or CSV with a header line and at least one data line"
            }
            ChartError::DataError { .. } => {
                "Make sure the first column holds labels and at least one other column holds numbers"
            }
            ChartError::ClipboardError { .. } => {
                "Save the document to a file instead, or set a clipboard command under [clipboard]"
            }
            ChartError::IoError(_) => "Check that the paths exist and are writable",
            ChartError::ConfigError { .. }
            | ChartError::ConfigValidationError { .. }
            | ChartError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
