//! Building values with the toml! macro.
//!
//! Run with: cargo run --example macro

use std::error::Error;
use toml_dump::{dumps, toml};

fn main() -> Result<(), Box<dyn Error>> {
    let config = toml!({
        "title": "TOML Example",
        "owner": {
            "name": "Tom Preston-Werner"
        },
        "database": {
            "server": "192.168.1.1",
            "ports": [8000, 8001, 8002],
            "connection_max": 5000,
            "enabled": true
        },
        "clients": {
            "data": [["gamma", "delta"], [1, 2]],
            "hosts": ["alpha", "omega"]
        },
        "backup": null
    });

    if let Some(table) = config.as_table() {
        println!("{}", dumps(table)?);
    }

    Ok(())
}
