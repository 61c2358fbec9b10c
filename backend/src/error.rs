//! Error types for the cwrkit conversion pipeline.
//!
//! The conversion core (field extraction and record emission) never fails:
//! malformed cells degrade to defaults. Errors only exist at the edges:
//!
//! - [`CsvError`] - reading, decoding or splitting the input table
//! - [`ConfigError`] - invalid environment configuration
//! - [`ConvertError`] - top-level orchestration (parse + write)
//! - [`ServerError`] - HTTP upload handling
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// CSV Errors
// =============================================================================

/// Errors while turning raw bytes into rows.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Content could not be decoded with the detected encoding.
    #[error("Failed to decode content: {0}")]
    Encoding(String),

    /// Invalid CSV structure.
    #[error("Invalid CSV format at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        CsvError::Parse {
            line,
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set but cannot be interpreted.
    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

// =============================================================================
// Conversion Errors (top-level)
// =============================================================================

/// Top-level conversion errors.
///
/// This is the error type returned by [`crate::pipeline::convert_file`] and
/// [`crate::pipeline::convert_bytes`].
#[derive(Debug, Error)]
pub enum ConvertError {
    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Writing the generated file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Conversion error.
    #[error("Conversion failed: {0}")]
    Convert(#[from] ConvertError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Server internal error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let csv_err = CsvError::EmptyFile;
        let convert_err: ConvertError = csv_err.into();
        assert!(convert_err.to_string().contains("empty"));

        let convert_err: ConvertError = CsvError::NoHeaders.into();
        let server_err: ServerError = convert_err.into();
        assert!(server_err.to_string().contains("No headers"));
    }

    #[test]
    fn test_parse_error_format() {
        let err = CsvError::Parse {
            line: 4,
            message: "unterminated quote".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 4"));
        assert!(msg.contains("unterminated quote"));
    }

    #[test]
    fn test_config_error_format() {
        let err = ConfigError::InvalidValue {
            name: "CWR_PORT",
            value: "eighty".into(),
        };
        assert_eq!(err.to_string(), "Invalid value for CWR_PORT: 'eighty'");
    }
}
