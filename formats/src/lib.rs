//! Definition of the data formats
//!
//! We only read what the OpenSky Network REST API sends us: lists of positional state
//! vectors and the aircraft metadata records.
//!
//! Unit conversion helpers are in `common`.
//!

// Re-export for convenience
//
pub use common::*;
pub use opensky::*;

mod common;
mod opensky;

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
