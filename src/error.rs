//! Error types for anonbbs.

use thiserror::Error;

/// Common error type for anonbbs.
#[derive(Error, Debug)]
pub enum BbsError {
    /// Database error.
    ///
    /// Wraps failures reported by the storage driver while executing a query.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for BbsError {
    fn from(e: sqlx::Error) -> Self {
        BbsError::Database(e.to_string())
    }
}

/// Result type alias for anonbbs operations.
pub type Result<T> = std::result::Result<T, BbsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error_display() {
        let err = BbsError::NotFound("thread".to_string());
        assert_eq!(err.to_string(), "thread not found");
    }

    #[test]
    fn test_config_error_display() {
        let err = BbsError::Config("bad toml".to_string());
        assert_eq!(err.to_string(), "configuration error: bad toml");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BbsError = io_err.into();
        assert!(matches!(err, BbsError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_sqlx_error_conversion() {
        let err: BbsError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, BbsError::Database(_)));
    }
}
