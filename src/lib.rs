//! infranet - Terminal Record Keeper for a Road Network
//!
//! Registers cities, connects them with roads, tracks a budget per road and
//! keeps everything in two fixed-width text tables between runs.
//!
//! # Architecture
//!
//! - **network**: city directory + road graph, owned by one `Network`
//! - **repl**: validated input, menu commands, rendering
//! - **storage**: `cities.txt` / `roads.txt` persistence
//! - **cli**: arguments and TOML configuration

pub mod errors;
pub mod network;
pub mod storage;
pub mod repl;
pub mod cli;

// Re-export commonly used types
pub use errors::{NetworkError, Result};
pub use network::{City, Network, Road};
