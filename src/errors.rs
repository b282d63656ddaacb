use thiserror::Error;

use crate::location::Location;

/// Errors that can occur while scanning a token stream.
#[derive(Debug, Error)]
pub enum ScanError {
    /// An I/O error occurred while reading the input.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The input contained a run of characters that is not a valid token.
    #[error("Unrecognized token '{token}' at {location}")]
    UnrecognizedToken {
        /// The offending characters, as they appeared in the input.
        token: String,
        /// Where the token started.
        location: Location,
    },
    /// A line could not be split into tokens at all.
    #[error("Syntax error: {message} at {location}")]
    Syntax {
        /// What went wrong.
        message: String,
        /// Where scanning stopped.
        location: Location,
    },
}

impl ScanError {
    /// The location attached to this error, if it carries one.
    ///
    /// I/O errors have no position of their own.
    pub fn location(&self) -> Option<&Location> {
        match self {
            ScanError::Io(_) => None,
            ScanError::UnrecognizedToken { location, .. } => Some(location),
            ScanError::Syntax { location, .. } => Some(location),
        }
    }
}

/// A specialized `Result` type for scanning operations.
pub type ScanResult<T> = Result<T, ScanError>;
