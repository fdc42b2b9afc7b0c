use std::fmt::{Display, Formatter};

pub use opensky::*;

mod opensky;

/// Statistics gathering struct for one query
///
#[derive(Clone, Debug, Default)]
pub struct Stats {
    /// Time spent, in ms
    pub tm: u128,
    /// State vectors received
    pub pkts: u32,
    /// Bytes received for the states
    pub bytes: u64,
    /// Metadata cache hits
    pub hits: u32,
    /// Metadata cache misses (one lookup each)
    pub miss: u32,
    /// Aircraft on the ground, skipped
    pub ground: u32,
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "time={}ms pkts={} bytes={} hits={} miss={} ground={}",
            self.tm, self.pkts, self.bytes, self.hits, self.miss, self.ground
        )
    }
}
