//! Inline value formatting.
//!
//! Renders the right-hand side of a `key = value` line. Only scalars and
//! arrays of scalars have an inline form here; tables are laid out as
//! sections by [`crate::ser`].

use crate::escape::write_escaped;
use crate::{DumpOptions, Error, FloatFormat, Result, Value};
use chrono::{DateTime, FixedOffset, Timelike};
use std::fmt::Write;

/// Formats a scalar or an array of scalars with default options.
///
/// # Examples
///
/// ```rust
/// use toml_dump::{format_value, Value};
///
/// assert_eq!(format_value(&Value::from(true)).unwrap(), "true");
/// assert_eq!(format_value(&Value::from(-7)).unwrap(), "-7");
/// assert_eq!(format_value(&Value::from(vec![1, 2])).unwrap(), "[1, 2]");
/// assert!(format_value(&Value::Null).is_err());
/// ```
///
/// # Errors
///
/// Fails on tables, `null`, and non-finite floats, at any depth.
pub fn format_value(value: &Value) -> Result<String> {
    format_value_with_options(value, &DumpOptions::default())
}

/// Formats a scalar or an array of scalars.
///
/// # Errors
///
/// Fails on tables, `null`, and non-finite floats, at any depth.
pub fn format_value_with_options(value: &Value, options: &DumpOptions) -> Result<String> {
    let mut out = String::new();
    write_value(&mut out, value, options)?;
    Ok(out)
}

pub(crate) fn write_value(out: &mut String, value: &Value, options: &DumpOptions) -> Result<()> {
    match value {
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Integer(i) => push_fmt(out, format_args!("{}", i)),
        Value::Float(f) => write_float(out, *f, options.float_format)?,
        Value::String(s) => {
            out.push('"');
            write_escaped(out, s);
            out.push('"');
        }
        Value::Datetime(dt) => write_datetime(out, dt),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, item, options)?;
            }
            out.push(']');
        }
        Value::Table(_) => {
            return Err(Error::unsupported_type("table inside an inline array"));
        }
        Value::Null => {
            return Err(Error::unsupported_type("null has no inline representation"));
        }
    }
    Ok(())
}

fn write_float(out: &mut String, f: f64, format: FloatFormat) -> Result<()> {
    if !f.is_finite() {
        return Err(Error::NonFiniteFloat(f));
    }

    match format {
        FloatFormat::Fixed => push_fmt(
            out,
            format_args!("{:.*}", FloatFormat::FIXED_PRECISION, f),
        ),
        FloatFormat::Shortest => {
            // `Display` for f64 never switches to exponent notation.
            let start = out.len();
            push_fmt(out, format_args!("{}", f));
            if !out[start..].contains('.') {
                out.push_str(".0");
            }
        }
    }
    Ok(())
}

/// `YYYY-MM-DDTHH:MM:SS[.ffffff]` followed by `Z` or `±HH:MM`.
fn write_datetime(out: &mut String, dt: &DateTime<FixedOffset>) {
    push_fmt(out, format_args!("{}", dt.format("%Y-%m-%dT%H:%M:%S")));

    // Leap seconds are stored as nanosecond values past 1e9.
    let micros = (dt.nanosecond() % 1_000_000_000) / 1_000;
    if micros != 0 {
        push_fmt(out, format_args!(".{:06}", micros));
    }

    let mut minutes = dt.offset().local_minus_utc().div_euclid(60);
    if minutes == 0 {
        out.push('Z');
        return;
    }

    let sign = if minutes > 0 {
        '+'
    } else {
        minutes = -minutes;
        '-'
    };
    push_fmt(
        out,
        format_args!("{}{:02}:{:02}", sign, minutes / 60, minutes % 60),
    );
}

#[inline]
fn push_fmt(out: &mut String, args: std::fmt::Arguments<'_>) {
    // Writing into a String cannot fail.
    let _ = out.write_fmt(args);
}
