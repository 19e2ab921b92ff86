//! Configuration options for TOML writing.
//!
//! - [`DumpOptions`]: main configuration struct
//! - [`FloatFormat`]: how floating-point values are rendered
//!
//! ## Examples
//!
//! ```rust
//! use toml_dump::{dumps_with_options, toml, DumpOptions, FloatFormat};
//!
//! let value = toml!({ "b": 2, "a": 0.5 });
//! let table = value.as_table().unwrap();
//!
//! let options = DumpOptions::sorted().with_float_format(FloatFormat::Shortest);
//! let out = dumps_with_options(table, options).unwrap();
//! assert_eq!(out, "a = 0.5\nb = 2\n");
//! ```

/// Rendering policy for floats.
///
/// Both policies write a plain decimal number with a `.`, never scientific
/// notation.
///
/// # Examples
///
/// ```rust
/// use toml_dump::{format_value_with_options, DumpOptions, FloatFormat, Value};
///
/// let v = Value::from(0.5);
/// let fixed = format_value_with_options(&v, &DumpOptions::new()).unwrap();
/// assert_eq!(fixed, "0.50000000000000000");
///
/// let shortest = DumpOptions::new().with_float_format(FloatFormat::Shortest);
/// assert_eq!(format_value_with_options(&v, &shortest).unwrap(), "0.5");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FloatFormat {
    /// Exactly 17 digits after the decimal point. Not guaranteed to round-trip.
    #[default]
    Fixed,
    /// Shortest representation that reads back as the same `f64`.
    Shortest,
}

impl FloatFormat {
    /// Digits after the decimal point written by [`FloatFormat::Fixed`].
    pub const FIXED_PRECISION: usize = 17;
}

/// Configuration options for TOML writing.
///
/// # Examples
///
/// ```rust
/// use toml_dump::{DumpOptions, FloatFormat};
///
/// // Insertion order, fixed-precision floats
/// let options = DumpOptions::new();
/// assert!(!options.sort_keys);
///
/// // Keys and sections in ascending order
/// let options = DumpOptions::sorted();
/// assert!(options.sort_keys);
///
/// let options = DumpOptions::new()
///     .with_sort_keys(true)
///     .with_float_format(FloatFormat::Shortest);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DumpOptions {
    pub sort_keys: bool,
    pub float_format: FloatFormat,
}

impl DumpOptions {
    /// Creates default options: insertion order, fixed-precision floats.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that emit keys and sections in ascending order.
    #[must_use]
    pub fn sorted() -> Self {
        DumpOptions {
            sort_keys: true,
            ..Default::default()
        }
    }

    /// Sets whether keys and sections are sorted.
    #[must_use]
    pub fn with_sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }

    /// Sets the float rendering policy.
    #[must_use]
    pub fn with_float_format(mut self, float_format: FloatFormat) -> Self {
        self.float_format = float_format;
        self
    }
}
