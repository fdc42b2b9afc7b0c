//! Module to deal with the sources we can connect to to fetch data.
//!
//! For now this is only the OpenSky Network REST API:
//!
//! - authentication (OAuth2 client credentials token)
//! - fetching state vectors inside a bounding box
//! - aircraft metadata lookups, cached for the duration of a query
//! - turning all of this into a report of the flights around a location
//!

// Re-export these modules for a shorted import path.
//
pub use access::*;
pub use auth::*;
pub use error::*;
pub use site::*;

mod access;
mod auth;
mod error;
mod site;

#[macro_use]
mod macros;

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
