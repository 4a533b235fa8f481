//! # Error Types
//!
//! This module defines all error types for the songbook crate.
//!
//! Parse errors carry the 1-based line of the `.song` file they were found on,
//! index errors carry the offending index and the score length.
//!
//! ## Error Types
//! - `ParseError` - Malformed `.song` text (header arity, non-integer field, bad segment count)
//! - `IndexError` - Note index outside `[0, len)`
//! - `InvalidState` - Query that has no answer for the current score (e.g. no pitches)
//! - `ConfigError` - Invalid YAML configuration
//! - `Io` - File system failure while reading or writing songs
//!
//! ## Usage
//! ```rust
//! use songbook::{decode, SongError};
//!
//! match decode("Broken\n1;120;4") {
//!     Ok(score) => println!("Loaded {}", score.name()),
//!     Err(SongError::ParseError { line, message }) => {
//!         eprintln!("Parse error on line {}: {}", line, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SongError {
    /// Malformed `.song` text.
    ///
    /// Aborts the whole load; no partial score is ever returned. `line` is 0
    /// when the text did not come from a file (e.g. `Duration::from_code`),
    /// and the message then omits it.
    ///
    /// # Example
    /// ```
    /// # use songbook::SongError;
    /// let err = SongError::ParseError {
    ///     line: 3,
    ///     message: "expected 4 fields, found 2".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Parse error on line 3: expected 4 fields, found 2");
    /// ```
    #[error("{}", parse_message(.line, .message))]
    ParseError { line: usize, message: String },

    /// Note index outside the score.
    ///
    /// # Example
    /// ```
    /// # use songbook::SongError;
    /// let err = SongError::IndexError { index: 5, len: 2 };
    /// assert_eq!(err.to_string(), "Note index 5 out of bounds for score of 2 notes");
    /// ```
    #[error("Note index {index} out of bounds for score of {len} notes")]
    IndexError { index: usize, len: usize },

    /// The score cannot answer the request in its current state.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Invalid configuration file.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// File system failure on a song or config file.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn parse_message(line: &usize, message: &str) -> String {
    match *line {
        0 => format!("Parse error: {}", message),
        _ => format!("Parse error on line {}: {}", line, message),
    }
}

impl SongError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        SongError::ParseError {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SongError::Io {
            path: path.into(),
            source,
        }
    }
}
