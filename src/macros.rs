/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Objects become tables (keeping the written key order), `null` becomes
/// [`Value::Null`](crate::Value::Null), and any other single token tree is
/// converted with `Value::from`. Wrap multi-token expressions such as
/// negative numbers in parentheses.
///
/// ```rust
/// use toml_dump::{toml, Value};
///
/// let config = toml!({
///     "title": "example",
///     "offset": (-5),
///     "owner": { "name": "Tom" },
///     "servers": [{ "ip": "10.0.0.1" }, { "ip": "10.0.0.2" }],
///     "backup": null
/// });
/// assert!(config.is_table());
/// ```
#[macro_export]
macro_rules! toml {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::toml!($elem)),*])
    };

    ({}) => {
        $crate::Value::Table($crate::Table::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut table = $crate::Table::new();
        $(
            table.insert($key.to_string(), $crate::toml!($value));
        )*
        $crate::Value::Table(table)
    }};

    ($s:expr) => {
        $crate::Value::from($s)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Table, Value};

    #[test]
    fn test_toml_macro_primitives() {
        assert_eq!(toml!(null), Value::Null);
        assert_eq!(toml!(true), Value::Bool(true));
        assert_eq!(toml!(false), Value::Bool(false));
        assert_eq!(toml!(42), Value::Integer(42));
        assert_eq!(toml!((-42)), Value::Integer(-42));
        assert_eq!(toml!(3.5), Value::Float(3.5));
        assert_eq!(toml!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_toml_macro_arrays() {
        assert_eq!(toml!([]), Value::Array(vec![]));
        assert_eq!(
            toml!([1, [2, 3]]),
            Value::Array(vec![
                Value::Integer(1),
                Value::Array(vec![Value::Integer(2), Value::Integer(3)]),
            ])
        );
    }

    #[test]
    fn test_toml_macro_tables_keep_order() {
        assert_eq!(toml!({}), Value::Table(Table::new()));

        let table = toml!({ "z": 1, "a": { "b": null } });
        let table = table.as_table().unwrap();
        let keys: Vec<_> = table.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(
            table.get("a").and_then(|a| a.as_table()).and_then(|a| a.get("b")),
            Some(&Value::Null)
        );
    }
}
