//! OpenSky (.org) specific code
//!
//! Phases:
//! 1. use the client ID & secret to get a bearer token (OAuth2 client credentials)
//! 2. fetch all state vectors inside a bounding box with the token
//! 3. for each aircraft, look up its model on the (open) metadata endpoint
//!
//! Everything is blocking and sequential, one metadata lookup after the other.
//!

use std::time::Duration;

use clap::{crate_name, crate_version};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use wheatley_common::BB;
use wheatley_formats::StateList;

use crate::{http_get_auth, http_post_form, AccessError, AuthError, Credentials, FetchError, Site};

pub use flights::*;
pub use metadata::*;

mod flights;
mod metadata;

/// This is the Opensky client/source struct.
///
#[derive(Clone, Debug)]
pub struct Opensky {
    /// Base site url taken from config
    pub base_url: String,
    /// Full URL of the token endpoint
    pub token_url: String,
    /// Add this to `base_url` to fetch state vectors
    pub states: String,
    /// Add this (and the ICAO24 address) to `base_url` for aircraft metadata
    pub metadata: String,
    /// States query timeout
    pub timeout: Duration,
    /// Metadata lookup timeout
    pub meta_timeout: Duration,
    /// Token request timeout
    pub token_timeout: Duration,
    /// reqwest blocking client
    pub client: Client,
}

/// Form to submit to the site to get the token
///
#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
}

/// Answer from the token endpoint, we only care about the token itself
///
#[derive(Debug, Deserialize)]
struct Token {
    access_token: Option<String>,
}

/// Represent the area we want to get all from
///
#[derive(Debug, Serialize, Deserialize)]
struct Args {
    lamin: f64,
    lomin: f64,
    lamax: f64,
    lomax: f64,
}

impl From<&BB> for Args {
    fn from(bb: &BB) -> Self {
        Args {
            lamin: bb.min_lat,
            lomin: bb.min_lon,
            lamax: bb.max_lat,
            lomax: bb.max_lon,
        }
    }
}

impl Opensky {
    #[tracing::instrument]
    pub fn new() -> Self {
        trace!("opensky::new");

        Opensky {
            base_url: "".to_owned(),
            token_url: "".to_owned(),
            states: "".to_owned(),
            metadata: "".to_owned(),
            timeout: Duration::from_secs(15),
            meta_timeout: Duration::from_secs(5),
            token_timeout: Duration::from_secs(10),
            client: Client::new(),
        }
    }

    /// Load some data from in-memory loaded config
    ///
    #[tracing::instrument(skip(self))]
    pub fn load(&mut self, site: &Site) -> Result<&mut Self, AccessError> {
        trace!("opensky::load");

        self.base_url = site.base_url.to_owned();
        self.token_url = site.token_url.to_owned();
        self.states = site.route("states")?.to_owned();
        self.metadata = site.route("metadata")?.to_owned();
        self.timeout = site.timeout();
        self.meta_timeout = site.meta_timeout();
        self.token_timeout = site.token_timeout();
        Ok(self)
    }

    /// Exchange the client credentials for a bearer token
    ///
    #[tracing::instrument(skip(self, creds))]
    pub fn authenticate(&self, creds: &Credentials) -> Result<String, AuthError> {
        trace!("authenticate as ({:?})", &creds.client_id);

        let form = TokenRequest {
            grant_type: "client_credentials",
            client_id: &creds.client_id,
            client_secret: &creds.client_secret,
        };

        let resp = http_post_form!(self, &self.token_url, &form, self.token_timeout)
            .map_err(|e| AuthError::HTTP(e.to_string()))?;
        debug!("{:?}", &resp);

        let resp = resp
            .error_for_status()
            .map_err(|e| AuthError::HTTP(e.to_string()))?;

        let token: Token = resp
            .json()
            .map_err(|e| AuthError::Decoding(e.to_string()))?;

        match token.access_token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(AuthError::NoToken),
        }
    }

    /// Get a token or nothing, the reason is only logged.
    ///
    #[tracing::instrument(skip(self, creds))]
    pub fn get_oauth_token(&self, creds: &Credentials) -> Option<String> {
        match self.authenticate(creds) {
            Ok(token) => Some(token),
            Err(e) => {
                warn!("no token: {}", e);
                None
            }
        }
    }

    /// Fetch all state vectors inside `bb`.
    ///
    /// Returns the list and the number of bytes read.
    ///
    #[tracing::instrument(skip(self, token))]
    pub fn fetch_states(&self, token: &str, bb: &BB) -> Result<(StateList, usize), FetchError> {
        let secs = self.timeout.as_secs();
        let url = format!("{}{}", self.base_url, self.states);
        let args = Args::from(bb);
        trace!("Fetching data from {} with {:?}…", url, args);

        let resp = http_get_auth!(self, &url, token, &args, self.timeout)
            .map_err(|e| FetchError::from_reqwest(e, secs))?;
        debug!("{:?}", &resp);

        // Check status
        //
        if resp.status() == StatusCode::UNAUTHORIZED {
            return Err(FetchError::Unauthorized);
        }
        let status = resp.error_for_status_ref().err();
        if let Some(e) = status {
            let body = match resp.text() {
                Ok(body) => body,
                Err(e) => {
                    warn!("can not read error body: {}", e);
                    String::new()
                }
            };
            return Err(FetchError::Status {
                error: e.to_string(),
                body,
            });
        }

        trace!("Fetching raw data");
        let raw = resp.text().map_err(|e| FetchError::from_reqwest(e, secs))?;

        match StateList::from_json(&raw) {
            Ok(list) => Ok((list, raw.len())),
            Err(e) => Err(FetchError::Decode {
                error: e.to_string(),
                raw,
            }),
        }
    }
}

impl Default for Opensky {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<&Site> for Opensky {
    type Error = AccessError;

    fn try_from(site: &Site) -> Result<Self, Self::Error> {
        let mut s = Opensky::new();
        s.load(site)?;
        Ok(s)
    }
}
