use std::path::PathBuf;

/// Reasons a placement is refused. The engine state is untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaceError {
    #[error("column ({x}, {y}) is outside the board")]
    OutOfBounds { x: usize, y: usize },

    #[error("column ({x}, {y}) is full")]
    ColumnFull { x: usize, y: usize },

    #[error("the game is already over")]
    GameOver,

    #[error("cannot read a column from {0:?}")]
    BadColumn(String),
}

/// Errors from the move-log store.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to access move log {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed move log record at line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse JSON config: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_error_display() {
        assert_eq!(PlaceError::ColumnFull { x: 1, y: 3 }.to_string(), "column (1, 3) is full");
        assert_eq!(
            PlaceError::OutOfBounds { x: 4, y: 0 }.to_string(),
            "column (4, 0) is outside the board"
        );
    }

    #[test]
    fn test_log_error_display() {
        let err = LogError::Parse { line: 3, reason: "unknown outcome code 9".to_string() };
        assert_eq!(err.to_string(), "malformed move log record at line 3: unknown outcome code 9");
    }
}
