//! # toml_dump
//!
//! A one-way TOML writer for dynamically-typed values and Serde-compatible types.
//!
//! ## What it does
//!
//! `toml_dump` turns a nested tree of tables into a flat TOML document: scalar
//! keys first, then every sub-table as a `[dotted.path]` section and every
//! array of tables as repeated `[[dotted.path]]` sections. There is no parser.
//!
//! ## Key Features
//!
//! - **Deterministic**: the same tree always produces the same bytes
//! - **Ordered**: insertion order by default, ascending key order on request
//! - **Optional keys**: `null` entries become commented-out placeholder lines
//! - **Serde Compatible**: any `T: Serialize` that serializes to a map or
//!   struct can be written with [`to_string`]
//!
//! ## Quick Start
//!
//! ```rust
//! use toml_dump::{dumps, toml};
//!
//! let config = toml!({
//!     "a": 1,
//!     "b": { "c": 2 }
//! });
//!
//! let out = dumps(config.as_table().unwrap()).unwrap();
//! assert_eq!(out, "a = 1\n\n[b]\nc = 2\n");
//! ```
//!
//! ### Arrays of Tables
//!
//! ```rust
//! use toml_dump::{dumps, toml};
//!
//! let config = toml!({ "arr": [{ "x": 1 }, { "x": 2 }] });
//! let out = dumps(config.as_table().unwrap()).unwrap();
//! assert_eq!(out, "\n[[arr]]\nx = 1\n\n[[arr]]\nx = 2\n");
//! ```
//!
//! ### Serde Types
//!
//! ```rust
//! use serde::Serialize;
//! use toml_dump::to_string;
//!
//! #[derive(Serialize)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     proxy: Option<String>,
//! }
//!
//! let server = Server { host: "localhost".to_string(), port: 8080, proxy: None };
//! let out = to_string(&server).unwrap();
//! assert_eq!(
//!     out,
//!     "host = \"localhost\"\nport = 8080\n#proxy = null  # To use: uncomment and replace null with value\n"
//! );
//! ```
//!
//! ## Output Format
//!
//! - Root-level scalar keys come first, with no section header.
//! - A blank line separates consecutive blocks. It never follows the last
//!   block and never sits between a header and its first key.
//! - Keys made of alphanumerics, `-` and `_` are written bare; every other
//!   key is quoted and escaped like a string.
//! - Floats are written with 17 digits after the decimal point unless
//!   [`FloatFormat::Shortest`] is selected.
//! - Datetimes are written as RFC 3339 with `Z` for a zero offset and
//!   microseconds only when non-zero.
//!
//! ## Errors
//!
//! Writing stops at the first value that has no TOML form, see [`Error`].
//! Whatever was already written to the sink stays there.
//!
//! ## Logging
//!
//! Progress is reported through the [`log`] facade at `debug` and `trace`
//! level. The library never installs a logger.

pub mod error;
pub mod escape;
pub mod format;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use error::{Error, Result};
pub use escape::{escape_id, escape_string};
pub use format::{format_value, format_value_with_options};
pub use map::Table;
pub use options::{DumpOptions, FloatFormat};
pub use ser::{Serializer, ValueSerializer};
pub use value::Value;

use serde::Serialize;
use std::io;

/// Write `table` as a TOML document to `writer`, keys in insertion order.
///
/// # Examples
///
/// ```rust
/// use toml_dump::{dump, toml};
///
/// let config = toml!({ "name": "api" });
/// let mut buffer = Vec::new();
/// dump(&mut buffer, config.as_table().unwrap()).unwrap();
/// assert_eq!(buffer, b"name = \"api\"\n");
/// ```
///
/// # Errors
///
/// Returns a format error for values with no TOML form and passes through
/// any error raised by `writer`.
pub fn dump<W>(writer: W, table: &Table) -> Result<()>
where
    W: io::Write,
{
    dump_with_options(writer, table, DumpOptions::default())
}

/// Write `table` as a TOML document to `writer` with custom options.
///
/// # Errors
///
/// Returns a format error for values with no TOML form and passes through
/// any error raised by `writer`.
pub fn dump_with_options<W>(writer: W, table: &Table, options: DumpOptions) -> Result<()>
where
    W: io::Write,
{
    Serializer::with_options(writer, options).dump(table)
}

/// Render `table` as a TOML string, keys in insertion order.
///
/// # Errors
///
/// Returns a format error for values with no TOML form.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn dumps(table: &Table) -> Result<String> {
    dumps_with_options(table, DumpOptions::default())
}

/// Render `table` as a TOML string with custom options.
///
/// # Examples
///
/// ```rust
/// use toml_dump::{dumps_with_options, toml, DumpOptions};
///
/// let config = toml!({ "b": 2, "a": 1 });
/// let out = dumps_with_options(config.as_table().unwrap(), DumpOptions::sorted()).unwrap();
/// assert_eq!(out, "a = 1\nb = 2\n");
/// ```
///
/// # Errors
///
/// Returns a format error for values with no TOML form.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn dumps_with_options(table: &Table, options: DumpOptions) -> Result<String> {
    let mut serializer = Serializer::with_options(Vec::with_capacity(256), options);
    serializer.dump(table)?;
    String::from_utf8(serializer.into_inner()).map_err(Error::custom)
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use toml_dump::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_table());
/// ```
///
/// # Errors
///
/// Returns an error for integers outside the `i64` range and for map keys
/// that are not strings.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Serialize any `T: Serialize` to a TOML string.
///
/// `T` must serialize as a struct or map.
///
/// # Errors
///
/// Returns [`Error::NotATable`] if `T` is not a struct or map, and any
/// error from [`to_value`] or [`dumps`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, DumpOptions::default())
}

/// Serialize any `T: Serialize` to a TOML string with custom options.
///
/// # Errors
///
/// See [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: DumpOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let table = to_table(value)?;
    dumps_with_options(&table, options)
}

/// Serialize any `T: Serialize` as TOML into `writer`.
///
/// # Examples
///
/// ```rust
/// use toml_dump::to_writer;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer, b"x = 1\ny = 2\n");
/// ```
///
/// # Errors
///
/// See [`to_string`]; errors raised by `writer` are passed through.
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, DumpOptions::default())
}

/// Serialize any `T: Serialize` as TOML into `writer` with custom options.
///
/// # Errors
///
/// See [`to_string`]; errors raised by `writer` are passed through.
pub fn to_writer_with_options<W, T>(writer: W, value: &T, options: DumpOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let table = to_table(value)?;
    dump_with_options(writer, &table, options)
}

fn to_table<T>(value: &T) -> Result<Table>
where
    T: ?Sized + Serialize,
{
    match to_value(value)? {
        Value::Table(table) => Ok(table),
        other => Err(Error::NotATable(other.type_name())),
    }
}
