//! Basic TOML writing from a serde struct.
//!
//! Run with: cargo run --example simple

use serde::Serialize;
use std::error::Error;
use toml_dump::to_string;

#[derive(Debug, Serialize)]
struct Package {
    name: String,
    version: String,
    authors: Vec<String>,
    homepage: Option<String>,
}

#[derive(Debug, Serialize)]
struct Manifest {
    package: Package,
    edition: u16,
}

fn main() -> Result<(), Box<dyn Error>> {
    let manifest = Manifest {
        package: Package {
            name: "demo".to_string(),
            version: "0.1.0".to_string(),
            authors: vec!["Alice <alice@example.com>".to_string()],
            homepage: None,
        },
        edition: 2021,
    };

    let toml = to_string(&manifest)?;
    println!("TOML output:\n{}", toml);

    Ok(())
}
