//! This is the module handling the `flights` sub-command.
//!

use std::path::PathBuf;

use eyre::Result;
use tracing::{info, trace};

use wheatley_sources::{Credentials, Opensky, Site};

use crate::FlightOpts;

/// Query the site and return the report text.
///
/// Missing credentials or a bad configuration file are errors, everything that happens once
/// we talk to the site is in the report.
///
#[tracing::instrument]
pub fn flights_around(config: Option<PathBuf>, fopts: &FlightOpts) -> Result<String> {
    trace!("flights_around({}, {})", fopts.lat, fopts.lon);

    let creds = Credentials::from_env()?;
    let site = Site::load(config)?;
    let opensky = Opensky::try_from(&site)?;

    info!("Looking within {} km of ({}, {})", fopts.radius, fopts.lat, fopts.lon);
    let outcome = opensky.get_flights_around_location(&creds, fopts.lat, fopts.lon, fopts.radius);
    Ok(outcome.to_string())
}
