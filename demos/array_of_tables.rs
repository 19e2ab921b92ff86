//! Arrays of tables become repeated [[section]] blocks.
//!
//! Run with: RUST_LOG=trace cargo run --example array_of_tables

use serde::Serialize;
use std::error::Error;
use toml_dump::{to_string_with_options, DumpOptions};

#[derive(Debug, Serialize)]
struct Variety {
    name: String,
}

#[derive(Debug, Serialize)]
struct Physical {
    color: String,
    shape: String,
}

#[derive(Debug, Serialize)]
struct Fruit {
    name: String,
    physical: Option<Physical>,
    variety: Vec<Variety>,
}

#[derive(Debug, Serialize)]
struct Basket {
    fruit: Vec<Fruit>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let basket = Basket {
        fruit: vec![
            Fruit {
                name: "apple".to_string(),
                physical: Some(Physical {
                    color: "red".to_string(),
                    shape: "round".to_string(),
                }),
                variety: vec![
                    Variety {
                        name: "red delicious".to_string(),
                    },
                    Variety {
                        name: "granny smith".to_string(),
                    },
                ],
            },
            Fruit {
                name: "banana".to_string(),
                physical: None,
                variety: vec![Variety {
                    name: "plantain".to_string(),
                }],
            },
        ],
    };

    println!("{}", to_string_with_options(&basket, DumpOptions::sorted())?);

    Ok(())
}
