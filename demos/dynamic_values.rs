//! Working with Value for runtime flexibility.
//!
//! Run with: cargo run --example dynamic_values

use chrono::Utc;
use serde::Serialize;
use std::error::Error;
use toml_dump::{dumps, to_value, toml, Value};

#[derive(Debug, Serialize)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut config = toml!({
        "host": "localhost",
        "port": 8080,
        "features": ["auth", "logging", "metrics"],
        "debug": true
    });

    // Fill in values only known at runtime
    if let Some(table) = config.as_table_mut() {
        table.insert("generated_at".to_string(), Value::from(Utc::now()));

        let user = User {
            id: 123,
            name: "Alice".to_string(),
            roles: vec!["admin".to_string(), "developer".to_string()],
        };
        table.insert("user".to_string(), to_value(&user)?);
    }

    if let Some(table) = config.as_table() {
        if let Some(port) = table.get("port").and_then(Value::as_i64) {
            println!("port: {}", port);
        }
        println!("\n{}", dumps(table)?);
    }

    Ok(())
}
