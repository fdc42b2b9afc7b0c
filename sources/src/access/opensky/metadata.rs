//! Aircraft metadata lookups on `/metadata/aircraft/icao/{icao24}`.
//!
//! Every answer, including failures, is cached by ICAO24 address so a given aircraft is
//! only looked up once per cache.
//!

use std::fmt::{Debug, Formatter};

use clap::{crate_name, crate_version};
use eyre::Result;
use mini_moka::sync::{Cache, ConcurrentCacheExt};
use reqwest::StatusCode;
use tracing::{debug, trace, warn};

use wheatley_formats::AircraftMetadata;

use crate::{http_get, Opensky};

/// Returned when the site does not know the aircraft or knows nothing useful about it
pub const UNKNOWN_MODEL: &str = "Unknown Model";
/// Returned when the lookup itself failed
pub const METADATA_NA: &str = "Metadata N/A";

/// ICAO24 address to model description.
///
/// No expiration and no size limit, one cache lives as long as the caller wants.
///
#[derive(Clone)]
pub struct MetadataCache {
    inner: Cache<String, String>,
}

impl MetadataCache {
    pub fn new() -> Self {
        MetadataCache {
            inner: Cache::builder().build(),
        }
    }

    #[inline]
    pub fn get(&self, icao24: &str) -> Option<String> {
        self.inner.get(&icao24.to_string())
    }

    #[inline]
    pub fn insert(&self, icao24: &str, model: &str) {
        self.inner.insert(icao24.to_string(), model.to_string());
    }

    /// Number of cached entries
    ///
    pub fn len(&self) -> usize {
        self.inner.sync();
        self.inner.entry_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MetadataCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for MetadataCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataCache")
            .field("entries", &self.len())
            .finish()
    }
}

impl Opensky {
    /// Return the model description for `icao24`, going to the site only on a cache miss.
    ///
    /// Never fails: a 404 gives `UNKNOWN_MODEL`, any other problem `METADATA_NA`.
    ///
    #[tracing::instrument(skip(self, cache))]
    pub fn get_aircraft_metadata(&self, icao24: &str, cache: &MetadataCache) -> String {
        if let Some(model) = cache.get(icao24) {
            trace!("cache hit");
            return model;
        }

        let model = match self.fetch_metadata(icao24) {
            Ok(Some(meta)) => meta
                .description()
                .unwrap_or_else(|| UNKNOWN_MODEL.to_string()),
            Ok(None) => UNKNOWN_MODEL.to_string(),
            Err(e) => {
                warn!("metadata for {}: {}", icao24, e);
                METADATA_NA.to_string()
            }
        };
        cache.insert(icao24, &model);
        model
    }

    /// `None` means the site answered 404.
    ///
    fn fetch_metadata(&self, icao24: &str) -> Result<Option<AircraftMetadata>> {
        let url = format!("{}{}/{}", self.base_url, self.metadata, icao24);
        trace!("Fetching metadata from {}", url);

        let resp = http_get!(self, &url, self.meta_timeout)?;
        debug!("{:?}", &resp);

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let meta: AircraftMetadata = resp.error_for_status()?.json()?;
        Ok(Some(meta))
    }
}
