//! TOML serialization.
//!
//! This module holds the two halves of writing a document:
//!
//! - [`Serializer`] walks a [`Table`] tree and writes section headers and
//!   `key = value` lines to an [`io::Write`] sink.
//! - [`ValueSerializer`] is a serde serializer that turns any
//!   `T: Serialize` into a [`Value`] tree for [`Serializer`] to write.
//!
//! ## Layout
//!
//! A table's own scalar keys are always written before any of its
//! sub-tables. Sub-tables and array-of-table elements are not written when
//! their key is reached; they are pushed onto a pending stack and written as
//! separate `[a.b]` / `[[a.b]]` blocks, separated by one blank line.
//!
//! ```rust
//! use toml_dump::{toml, Serializer};
//!
//! let value = toml!({ "a": 1, "b": { "c": 2 } });
//!
//! let mut serializer = Serializer::new(Vec::new());
//! serializer.dump(value.as_table().unwrap()).unwrap();
//!
//! let out = String::from_utf8(serializer.into_inner()).unwrap();
//! assert_eq!(out, "a = 1\n\n[b]\nc = 2\n");
//! ```

use crate::escape::escape_id;
use crate::format::write_value;
use crate::{DumpOptions, Error, Result, Table, Value};
use serde::{ser, Serialize};
use std::io;

/// Placeholder written in place of a `null` entry.
const NULL_PLACEHOLDER: &str = " = null  # To use: uncomment and replace null with value\n";

/// The TOML document writer.
///
/// Created via [`Serializer::new`] or [`Serializer::with_options`]; each call
/// to [`Serializer::dump`] writes one complete document.
pub struct Serializer<W> {
    writer: W,
    options: DumpOptions,
    line: String,
}

/// A table waiting to be written, with the key path that leads to it.
struct WorkUnit<'a> {
    path: Vec<&'a str>,
    table: &'a Table,
    is_array_element: bool,
}

impl<'a> WorkUnit<'a> {
    fn root(table: &'a Table) -> Self {
        WorkUnit {
            path: Vec::new(),
            table,
            is_array_element: false,
        }
    }

    fn child(&self, key: &'a str, table: &'a Table, is_array_element: bool) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(key);
        WorkUnit {
            path,
            table,
            is_array_element,
        }
    }
}

impl<W: io::Write> Serializer<W> {
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, DumpOptions::default())
    }

    pub fn with_options(writer: W, options: DumpOptions) -> Self {
        Serializer {
            writer,
            options,
            line: String::with_capacity(128),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes `root` as a complete document.
    ///
    /// # Errors
    ///
    /// Returns a format error on the first value that cannot be written, or
    /// the sink's I/O error. Output written before the failure stays in the
    /// sink.
    pub fn dump(&mut self, root: &Table) -> Result<()> {
        log::debug!(
            "dumping table with {} top-level keys (sort_keys={})",
            root.len(),
            self.options.sort_keys
        );

        let mut pending = vec![WorkUnit::root(root)];
        let mut sections = 0usize;

        while let Some(unit) = pending.pop() {
            if !unit.path.is_empty() {
                self.write_header(&unit)?;
                sections += 1;
            }

            let children = self.write_entries(&unit)?;
            schedule_children(&mut pending, children, self.options.sort_keys);

            if !pending.is_empty() {
                self.writer.write_all(b"\n")?;
            }
        }

        log::debug!("dump finished after {} sections", sections);
        Ok(())
    }

    fn write_header(&mut self, unit: &WorkUnit<'_>) -> Result<()> {
        let (open, close) = if unit.is_array_element {
            ("[[", "]]\n")
        } else {
            ("[", "]\n")
        };

        self.line.clear();
        self.line.push_str(open);
        push_dotted(&mut self.line, &unit.path);
        self.line.push_str(close);

        log::trace!("writing section {}", self.line.trim_end());
        self.writer.write_all(self.line.as_bytes())?;
        Ok(())
    }

    /// Writes the unit's scalar entries and returns its sub-tables, grouped
    /// by key in visiting order.
    fn write_entries<'a>(&mut self, unit: &WorkUnit<'a>) -> Result<Vec<Vec<WorkUnit<'a>>>> {
        let mut entries: Vec<(&'a String, &'a Value)> = unit.table.iter().collect();
        if self.options.sort_keys {
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        }

        let mut children = Vec::new();

        for (key, value) in entries {
            match value {
                Value::Table(table) => {
                    children.push(vec![unit.child(key, table, false)]);
                }
                Value::Array(items) if items.iter().any(Value::is_table) => {
                    let tables = items
                        .iter()
                        .map(|item| match item {
                            Value::Table(table) => Ok(unit.child(key, table, true)),
                            _ => Err(Error::mixed_array(&dotted_path(&unit.path, key))),
                        })
                        .collect::<Result<Vec<_>>>()?;
                    children.push(tables);
                }
                Value::Null => {
                    self.line.clear();
                    self.line.push('#');
                    self.line.push_str(&escape_id(key));
                    self.line.push_str(NULL_PLACEHOLDER);
                    self.writer.write_all(self.line.as_bytes())?;
                }
                _ => {
                    self.line.clear();
                    self.line.push_str(&escape_id(key));
                    self.line.push_str(" = ");
                    write_value(&mut self.line, value, &self.options)?;
                    self.line.push('\n');
                    self.writer.write_all(self.line.as_bytes())?;
                }
            }
        }

        Ok(children)
    }
}

/// Pushes a unit's sub-tables onto the pending stack.
///
/// The stack pops from the end, so the elements of an array of tables are
/// pushed last-first and come back out in list order.
///
/// Unsorted, key groups are pushed in key order, which visits the sub-tables
/// of the last key first. Sorted, the groups are pushed last-first as well so
/// the smallest key is visited next. That yields a pre-order walk in
/// ascending path order, and keeps every `[[a]]` element's own sub-tables
/// directly after it.
fn schedule_children<'a>(
    pending: &mut Vec<WorkUnit<'a>>,
    children: Vec<Vec<WorkUnit<'a>>>,
    sorted: bool,
) {
    for child in children.iter().flatten() {
        log::trace!("scheduling {}", child.path.join("."));
    }

    if sorted {
        pending.extend(children.into_iter().rev().flat_map(|group| group.into_iter().rev()));
    } else {
        pending.extend(children.into_iter().flat_map(|group| group.into_iter().rev()));
    }
}

fn push_dotted(out: &mut String, path: &[&str]) {
    for (i, component) in path.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push_str(&escape_id(component));
    }
}

fn dotted_path(path: &[&str], key: &str) -> String {
    let mut out = String::new();
    push_dotted(&mut out, path);
    if !path.is_empty() {
        out.push('.');
    }
    out.push_str(&escape_id(key));
    out
}

/// Serde serializer that builds a [`Value`] tree.
///
/// Enum variants carrying data become single-key tables named after the
/// variant. Integers outside the `i64` range and non-string map keys are
/// rejected.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeTupleVariant {
    variant: &'static str,
    vec: Vec<Value>,
}

pub struct SerializeMap {
    table: Table,
    next_key: Option<String>,
}

pub struct SerializeStructVariant {
    variant: &'static str,
    table: Table,
}

fn tagged(variant: &'static str, value: Value) -> Value {
    let mut table = Table::with_capacity(1);
    table.insert(variant.to_string(), value);
    Value::Table(table)
}

fn out_of_range<T: std::fmt::Display>(v: T) -> Error {
    Error::UnsupportedType(format!("integer {} exceeds the i64 range", v))
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Integer(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        i64::try_from(v)
            .map(Value::Integer)
            .map_err(|_| out_of_range(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Value::try_from(v)
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        i64::try_from(v)
            .map(Value::Integer)
            .map_err(|_| out_of_range(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Array(v.iter().map(|&b| Value::from(b)).collect()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(tagged(variant, to_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        ser::Serializer::serialize_seq(self, Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        ser::Serializer::serialize_seq(self, Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap {
            table: Table::with_capacity(len.unwrap_or(0)),
            next_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        ser::Serializer::serialize_map(self, Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            variant,
            table: Table::with_capacity(len),
        })
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(tagged(self.variant, Value::Array(self.vec)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value(key)? {
            Value::String(s) => {
                self.next_key = Some(s);
                Ok(())
            }
            other => Err(Error::UnsupportedType(format!(
                "map key of type {}, keys must be strings",
                other.type_name()
            ))),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.table.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Table(self.table))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.table.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Table(self.table))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.table.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(tagged(self.variant, Value::Table(self.table)))
    }
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toml;

    fn dump(value: Value, options: DumpOptions) -> Result<String> {
        let table = value.as_table().cloned().unwrap_or_default();
        let mut serializer = Serializer::with_options(Vec::new(), options);
        serializer.dump(&table)?;
        Ok(String::from_utf8(serializer.into_inner()).unwrap())
    }

    fn dump_unsorted(value: Value) -> String {
        dump(value, DumpOptions::new()).unwrap()
    }

    fn dump_sorted(value: Value) -> String {
        dump(value, DumpOptions::sorted()).unwrap()
    }

    #[test]
    fn test_empty_root() {
        assert_eq!(dump_unsorted(toml!({})), "");
    }

    #[test]
    fn test_scalars_before_sections() {
        let out = dump_unsorted(toml!({ "a": 1, "b": { "c": 2 }, "d": "x" }));
        assert_eq!(out, "a = 1\nd = \"x\"\n\n[b]\nc = 2\n");
    }

    #[test]
    fn test_root_without_scalars_starts_with_separator() {
        assert_eq!(dump_unsorted(toml!({ "b": { "c": 2 } })), "\n[b]\nc = 2\n");
    }

    #[test]
    fn test_unsorted_siblings_visit_last_key_first() {
        let out = dump_unsorted(toml!({ "x": { "k": 1 }, "y": { "k": 2 } }));
        assert_eq!(out, "\n[y]\nk = 2\n\n[x]\nk = 1\n");
    }

    #[test]
    fn test_sorted_siblings() {
        let out = dump_sorted(toml!({ "y": { "k": 2 }, "x": { "k": 1 } }));
        assert_eq!(out, "\n[x]\nk = 1\n\n[y]\nk = 2\n");
    }

    #[test]
    fn test_nested_path_headers() {
        let out = dump_unsorted(toml!({ "a": { "b": { "c": 1 } } }));
        assert_eq!(out, "\n[a]\n\n[a.b]\nc = 1\n");
    }

    #[test]
    fn test_quoted_path_components() {
        let out = dump_unsorted(toml!({ "dns names": { "example.com": { "ttl": 60 } } }));
        assert_eq!(
            out,
            "\n[\"dns names\"]\n\n[\"dns names\".\"example.com\"]\nttl = 60\n"
        );
    }

    #[test]
    fn test_array_of_tables_in_order() {
        let out = dump_unsorted(toml!({ "arr": [{ "x": 1 }, { "x": 2 }, { "x": 3 }] }));
        assert_eq!(out, "\n[[arr]]\nx = 1\n\n[[arr]]\nx = 2\n\n[[arr]]\nx = 3\n");
    }

    #[test]
    fn test_array_element_subtables_follow_their_element() {
        let value = toml!({
            "fruit": [
                { "name": "apple", "physical": { "color": "red" } },
                { "name": "banana" }
            ]
        });
        let expected = "\n[[fruit]]\nname = \"apple\"\n\n[fruit.physical]\ncolor = \"red\"\n\n[[fruit]]\nname = \"banana\"\n";

        assert_eq!(dump_unsorted(value.clone()), expected);
        assert_eq!(dump_sorted(value), expected);
    }

    #[test]
    fn test_sorted_deep_walk() {
        let value = toml!({
            "b": { "z": 1, "a": { "k": true } },
            "a": { "m": [1, 2] },
            "top": 0
        });
        assert_eq!(
            dump_sorted(value),
            "top = 0\n\n[a]\nm = [1, 2]\n\n[b]\nz = 1\n\n[b.a]\nk = true\n"
        );
    }

    #[test]
    fn test_null_placeholder() {
        let out = dump_unsorted(toml!({ "n": null, "my key": null }));
        assert_eq!(
            out,
            "#n = null  # To use: uncomment and replace null with value\n\
             #\"my key\" = null  # To use: uncomment and replace null with value\n"
        );
    }

    #[test]
    fn test_empty_array_is_scalar() {
        assert_eq!(dump_unsorted(toml!({ "list": [] })), "list = []\n");
    }

    #[test]
    fn test_mixed_array_is_rejected() {
        let err = dump(
            toml!({ "srv": { "hosts": [{ "name": "a" }, 1] } }),
            DumpOptions::new(),
        )
        .unwrap_err();
        match err {
            Error::MixedArray { path } => assert_eq!(path, "srv.hosts"),
            other => panic!("expected mixed array error, got {:?}", other),
        }
    }

    #[test]
    fn test_tables_nested_in_inline_arrays_are_rejected() {
        let err = dump(toml!({ "m": [[{ "x": 1 }]] }), DumpOptions::new()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType(_)));
    }

    #[test]
    fn test_partial_output_is_kept() {
        let table = toml!({ "ok": 1, "bad": (f64::NAN) });
        let mut serializer = Serializer::new(Vec::new());

        let err = serializer.dump(table.as_table().unwrap()).unwrap_err();
        assert!(matches!(err, Error::NonFiniteFloat(_)));
        assert_eq!(serializer.into_inner(), b"ok = 1\n");
    }

    #[test]
    fn test_sink_errors_propagate() {
        struct Closed;

        impl io::Write for Closed {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let table = toml!({ "a": 1 });
        let err = Serializer::new(Closed)
            .dump(table.as_table().unwrap())
            .unwrap_err();
        match err {
            Error::Io(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("expected io error, got {:?}", other),
        }
    }

    #[test]
    fn test_value_serializer_enums() {
        #[derive(Serialize)]
        enum Shape {
            Unit,
            Circle(f64),
            Pair(i32, i32),
            Rect { w: u32, h: u32 },
        }

        assert_eq!(to_value(&Shape::Unit).unwrap(), Value::from("Unit"));
        assert_eq!(
            to_value(&Shape::Circle(1.5)).unwrap(),
            toml!({ "Circle": 1.5 })
        );
        assert_eq!(
            to_value(&Shape::Pair(1, 2)).unwrap(),
            toml!({ "Pair": [1, 2] })
        );
        assert_eq!(
            to_value(&Shape::Rect { w: 3, h: 4 }).unwrap(),
            toml!({ "Rect": { "w": 3, "h": 4 } })
        );
    }

    #[test]
    fn test_value_serializer_rejects_out_of_range() {
        assert!(matches!(
            to_value(&u64::MAX),
            Err(Error::UnsupportedType(_))
        ));
        assert!(matches!(
            to_value(&i128::MIN),
            Err(Error::UnsupportedType(_))
        ));
        assert_eq!(to_value(&42u128).unwrap(), Value::Integer(42));
    }

    #[test]
    fn test_value_serializer_map_keys() {
        use std::collections::BTreeMap;

        let mut chars = BTreeMap::new();
        chars.insert('a', 1);
        assert_eq!(to_value(&chars).unwrap(), toml!({ "a": 1 }));

        let mut ints = BTreeMap::new();
        ints.insert(1, "one");
        assert!(matches!(to_value(&ints), Err(Error::UnsupportedType(_))));
    }
}
