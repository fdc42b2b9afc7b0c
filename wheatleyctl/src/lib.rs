//! Library part of the `wheatleyctl` utility.
//!
//! The actual work is done in the `wheatley-sources` (flights) and `wheatley-habits` crates,
//! what we have here is option parsing and output formatting.
//!

pub use cli::*;
pub use cmds::*;

mod cli;
mod cmds;
