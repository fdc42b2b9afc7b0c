//! Habit tracking for the chat bot.
//!
//! Every user has a list of habits with a streak counter, the time of the last completion and
//! an optional reminder time.  Everything lives in a single `habits` table inside a local
//! database file, each operation opening its own connection.
//!

pub use error::*;
pub use store::*;

mod error;
mod store;

/// Default database file, relative to the current directory
pub const DATABASE_NAME: &str = "wheatley.db";

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
