//! Error type shared by the trace reader, generator and runner.

use std::fmt;
use std::io;

/// Everything that can go wrong while generating or replaying a trace.
#[derive(Debug)]
pub enum ReplayError {
    /// Reading or writing a file failed.
    Io(io::Error),
    /// The CSV layer rejected the input or failed to write a row.
    Csv(csv::Error),
    /// A trace row was well-formed CSV but not a valid request.
    Parse {
        /// 1-based line number in the trace file
        line: u64,
        /// What was wrong with the row
        reason: String,
    },
    /// A command-line argument is out of range.
    InvalidArgument(String),
    /// The cache could not be built.
    Cache(lru_arena::Error),
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::Io(err) => write!(f, "I/O error: {}", err),
            ReplayError::Csv(err) => write!(f, "CSV error: {}", err),
            ReplayError::Parse { line, reason } => {
                write!(f, "invalid request on line {}: {}", line, reason)
            }
            ReplayError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            ReplayError::Cache(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplayError::Io(err) => Some(err),
            ReplayError::Csv(err) => Some(err),
            ReplayError::Cache(err) => Some(err),
            ReplayError::Parse { .. } | ReplayError::InvalidArgument(_) => None,
        }
    }
}

impl From<io::Error> for ReplayError {
    fn from(err: io::Error) -> Self {
        ReplayError::Io(err)
    }
}

impl From<csv::Error> for ReplayError {
    fn from(err: csv::Error) -> Self {
        ReplayError::Csv(err)
    }
}

impl From<lru_arena::Error> for ReplayError {
    fn from(err: lru_arena::Error) -> Self {
        ReplayError::Cache(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_parse_error_names_the_line() {
        let err = ReplayError::Parse {
            line: 7,
            reason: "empty key".to_string(),
        };
        assert_eq!(err.to_string(), "invalid request on line 7: empty key");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_cache_error_keeps_its_source() {
        let err: ReplayError = lru_arena::Error::InvalidCapacity(0).into();
        assert!(matches!(err, ReplayError::Cache(_)));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("capacity"));
    }
}
