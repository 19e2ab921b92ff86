use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use toml_dump::{
    dumps, to_string, to_string_with_options, to_value, DumpOptions, Error, Table, Value,
};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Owner {
    name: String,
    email: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Server {
    host: String,
    port: u16,
    tags: Vec<String>,
}

#[derive(Serialize, Debug)]
struct Document {
    title: String,
    version: u32,
    owner: Owner,
    servers: Vec<Server>,
    limits: BTreeMap<String, i64>,
}

fn sample_document() -> Document {
    let mut limits = BTreeMap::new();
    limits.insert("cpu".to_string(), 4);
    limits.insert("memory".to_string(), 2048);

    Document {
        title: "inventory".to_string(),
        version: 3,
        owner: Owner {
            name: "Alice".to_string(),
            email: None,
        },
        servers: vec![
            Server {
                host: "alpha".to_string(),
                port: 8080,
                tags: vec!["web".to_string()],
            },
            Server {
                host: "beta".to_string(),
                port: 9090,
                tags: vec![],
            },
        ],
        limits,
    }
}

#[test]
fn test_nested_struct() {
    let toml = to_string(&sample_document()).unwrap();
    println!("Document TOML:\n{}", toml);

    assert_eq!(
        toml,
        "title = \"inventory\"\nversion = 3\n\n\
         [limits]\ncpu = 4\nmemory = 2048\n\n\
         [[servers]]\nhost = \"alpha\"\nport = 8080\ntags = [\"web\"]\n\n\
         [[servers]]\nhost = \"beta\"\nport = 9090\ntags = []\n\n\
         [owner]\nname = \"Alice\"\n#email = null  # To use: uncomment and replace null with value\n"
    );
}

#[test]
fn test_nested_struct_sorted() {
    let toml = to_string_with_options(&sample_document(), DumpOptions::sorted()).unwrap();

    assert_eq!(
        toml,
        "title = \"inventory\"\nversion = 3\n\n\
         [limits]\ncpu = 4\nmemory = 2048\n\n\
         [owner]\n#email = null  # To use: uncomment and replace null with value\nname = \"Alice\"\n\n\
         [[servers]]\nhost = \"alpha\"\nport = 8080\ntags = [\"web\"]\n\n\
         [[servers]]\nhost = \"beta\"\nport = 9090\ntags = []\n"
    );
}

#[test]
fn test_to_value() {
    let owner = Owner {
        name: "Alice".to_string(),
        email: Some("alice@example.com".to_string()),
    };

    match to_value(&owner).unwrap() {
        Value::Table(table) => {
            assert_eq!(table.get("name"), Some(&Value::from("Alice")));
            assert_eq!(table.get("email"), Some(&Value::from("alice@example.com")));
        }
        other => panic!("Expected table, got {:?}", other),
    }
}

#[test]
fn test_unsupported_integer() {
    #[derive(Serialize)]
    struct Counter {
        hits: u64,
    }

    let err = to_string(&Counter { hits: u64::MAX }).unwrap_err();
    assert!(err.is_format_error());
    assert!(matches!(err, Error::UnsupportedType(_)));

    assert_eq!(
        to_string(&Counter { hits: 7 }).unwrap(),
        "hits = 7\n"
    );
}

#[test]
fn test_non_finite_float_field() {
    #[derive(Serialize)]
    struct Ratio {
        value: f64,
    }

    let err = to_string(&Ratio { value: f64::NAN }).unwrap_err();
    assert!(matches!(err, Error::NonFiniteFloat(_)));
}

#[test]
fn test_enum_fields() {
    #[derive(Serialize)]
    enum Mode {
        Fast,
        Limited { rate: u32 },
    }

    #[derive(Serialize)]
    struct Settings {
        mode: Mode,
        fallback: Mode,
    }

    let settings = Settings {
        mode: Mode::Fast,
        fallback: Mode::Limited { rate: 10 },
    };

    assert_eq!(
        to_string(&settings).unwrap(),
        "mode = \"Fast\"\n\n[fallback]\n\n[fallback.Limited]\nrate = 10\n"
    );
}

#[test]
fn test_from_json() {
    let json = r#"{
        "name": "pkg",
        "deps": { "serde": "1.0" },
        "bin": [{ "name": "a" }, { "name": "b" }],
        "optional": null
    }"#;

    let value: Value = serde_json::from_str(json).unwrap();
    let table = value.as_table().unwrap();

    assert_eq!(
        dumps(table).unwrap(),
        "name = \"pkg\"\n#optional = null  # To use: uncomment and replace null with value\n\n\
         [[bin]]\nname = \"a\"\n\n\
         [[bin]]\nname = \"b\"\n\n\
         [deps]\nserde = \"1.0\"\n"
    );
}

#[test]
fn test_value_to_json() {
    let mut table = Table::new();
    table.insert("n".to_string(), Value::from(1));
    table.insert("list".to_string(), Value::from(vec!["x"]));

    let json = serde_json::to_string(&Value::Table(table)).unwrap();
    assert_eq!(json, r#"{"n":1,"list":["x"]}"#);
}

#[test]
fn test_json_u64_overflow_is_rejected() {
    let result: Result<Value, _> = serde_json::from_str("18446744073709551615");
    assert!(result.is_err());
}
