//! Error types for TOML writing.
//!
//! Writing can fail in exactly two ways:
//!
//! - **Format errors**: a value reached the writer that has no TOML rendering
//!   (a non-finite float, a `null` inside an array, a list that mixes tables
//!   with plain values, an integer outside the `i64` range, ...). These abort
//!   the dump at the point the value is discovered.
//! - **I/O errors**: the sink itself refused a write. These are passed through
//!   untouched.
//!
//! Neither kind rolls back output that was already written to the sink.
//!
//! ## Examples
//!
//! ```rust
//! use toml_dump::{dumps, toml, Error, Value};
//!
//! let value = toml!({ "ratio": (f64::NAN) });
//! let table = value.as_table().unwrap();
//!
//! match dumps(table) {
//!     Err(err @ Error::NonFiniteFloat(_)) => assert!(err.is_format_error()),
//!     other => panic!("unexpected result: {:?}", other),
//! }
//! ```

use std::fmt;
use std::io;
use thiserror::Error;

/// Represents every failure that can occur while writing TOML.
///
/// All variants except [`Error::Io`] are format errors, see
/// [`Error::is_format_error`].
#[derive(Debug, Error)]
pub enum Error {
    /// The output sink failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A value with no TOML rendering reached the formatter.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// A list holding both tables and non-table values.
    #[error("Mixed array at `{path}`: an array of tables cannot contain non-table values")]
    MixedArray { path: String },

    /// NaN and infinities have no plain decimal form.
    #[error("Cannot format non-finite float {0}")]
    NonFiniteFloat(f64),

    /// The top-level value handed to the serde bridge was not a table.
    #[error("Top-level value must be a table, found {0}")]
    NotATable(&'static str),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unsupported type error for values that cannot be written as TOML.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_dump::Error;
    ///
    /// let err = Error::unsupported_type("table inside an inline array");
    /// assert!(err.to_string().contains("inline array"));
    /// ```
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a mixed array error for the dotted key path `path`.
    pub fn mixed_array(path: &str) -> Self {
        Error::MixedArray {
            path: path.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_dump::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns `true` unless the error came from the output sink.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        !matches!(self, Error::Io(_))
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_is_not_a_format_error() {
        let err = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert!(!err.is_format_error());
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_format_errors() {
        assert!(Error::unsupported_type("u64").is_format_error());
        assert!(Error::NonFiniteFloat(f64::INFINITY).is_format_error());

        let err = Error::mixed_array("servers.hosts");
        assert!(err.is_format_error());
        assert!(err.to_string().contains("`servers.hosts`"));
    }
}
