//! Customizing output with DumpOptions.
//!
//! Run with: RUST_LOG=debug cargo run --example custom_options

use serde::Serialize;
use std::error::Error;
use toml_dump::{to_string, to_string_with_options, DumpOptions, FloatFormat};

#[derive(Debug, Serialize)]
struct Limits {
    ratio: f64,
    burst: u32,
}

#[derive(Debug, Serialize)]
struct Config {
    name: String,
    version: String,
    threshold: f64,
    limits: Limits,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = Config {
        name: "MyApp".to_string(),
        version: "1.0.0".to_string(),
        threshold: 0.1,
        limits: Limits {
            ratio: 2.5,
            burst: 10,
        },
    };

    println!("Default (insertion order, fixed floats):");
    println!("{}", to_string(&config)?);

    println!("Sorted keys:");
    println!("{}", to_string_with_options(&config, DumpOptions::sorted())?);

    println!("Shortest floats:");
    let options = DumpOptions::new().with_float_format(FloatFormat::Shortest);
    println!("{}", to_string_with_options(&config, options)?);

    Ok(())
}
