//! Module that defines what is a site (API endpoint and its routes).
//!
//! This is used to configure the OpenSky access through `opensky.hcl`.  A default copy is
//! built in, a local one can be put in the configuration directory or given on the
//! command-line.
//!

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use eyre::Result;
use serde::Deserialize;
use tracing::trace;

use wheatley_common::{ConfigFile, Versioned};

use crate::AccessError;

/// Default configuration filename
pub const SITE_CONFIG: &str = "opensky.hcl";

/// Default timeouts (in seconds)
const DEF_TIMEOUT: u64 = 15;
const DEF_META_TIMEOUT: u64 = 5;
const DEF_TOKEN_TIMEOUT: u64 = 10;

/// Describe what a site is.
///
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Site {
    /// File version
    version: usize,
    /// Base URL (to avoid repeating)
    pub base_url: String,
    /// Where to get a token, on a different host
    pub token_url: String,
    /// Different URLs available
    pub routes: BTreeMap<String, String>,
    /// States query timeout
    pub timeout: Option<u64>,
    /// Metadata lookup timeout
    pub meta_timeout: Option<u64>,
    /// Token request timeout
    pub token_timeout: Option<u64>,
}

impl Versioned for Site {
    const VERSION: usize = 1;

    fn version(&self) -> usize {
        self.version
    }
}

impl Site {
    /// Load the site description, see `ConfigFile::load()` for the search path.
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<PathBuf>) -> Result<Self> {
        let cfg = ConfigFile::<Site>::load(SITE_CONFIG, fname, include_str!("opensky.hcl"))?;
        trace!("site loaded from {:?}", cfg.source());
        Ok(cfg.into_inner())
    }

    /// The built-in description
    ///
    pub fn builtin() -> Result<Self> {
        let site: Site = hcl::from_str(include_str!("opensky.hcl"))?;
        Ok(site)
    }

    /// Return a given route
    ///
    pub fn route(&self, name: &str) -> Result<&String, AccessError> {
        self.routes
            .get(name)
            .ok_or(AccessError::MissingRoute(name.to_string()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(DEF_TIMEOUT))
    }

    pub fn meta_timeout(&self) -> Duration {
        Duration::from_secs(self.meta_timeout.unwrap_or(DEF_META_TIMEOUT))
    }

    pub fn token_timeout(&self) -> Duration {
        Duration::from_secs(self.token_timeout.unwrap_or(DEF_TOKEN_TIMEOUT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_builtin() {
        let site = Site::builtin().unwrap();
        assert_eq!(1, site.version());
        assert_eq!("https://opensky-network.org/api", site.base_url);
        assert_eq!("/states/all", site.route("states").unwrap().as_str());
        assert_eq!("/metadata/aircraft/icao", site.route("metadata").unwrap().as_str());
        assert_eq!(Duration::from_secs(15), site.timeout());
        assert_eq!(Duration::from_secs(5), site.meta_timeout());
        assert_eq!(Duration::from_secs(10), site.token_timeout());
    }

    #[test]
    fn test_site_missing_route() {
        let site = Site::builtin().unwrap();
        assert_eq!(
            Err(AccessError::MissingRoute("flights".to_string())),
            site.route("flights")
        );
    }

    #[test]
    fn test_site_default_timeouts() {
        let input = r##"
version = 1
base_url = "http://localhost"
token_url = "http://localhost/token"
routes = {
  states = "/states/all"
}
"##;
        let site: Site = hcl::from_str(input).unwrap();
        assert_eq!(Duration::from_secs(15), site.timeout());
        assert_eq!(None, site.routes.get("metadata"));
    }
}
