//! Flights around a location.
//!
//! This is the main query: get a token, fetch every state vector inside the bounding box of
//! the area, enrich the airborne ones with their model, distance and bearing and produce a
//! report sorted by distance.
//!
//! Every path ends up in an `Outcome`, whose `Display` is the text shown to the user.
//!

use std::fmt::{Display, Formatter};
use std::time::Instant;

use tracing::{debug, error, info, trace};

use wheatley_common::{degrees_to_cardinal, Location, BB};
use wheatley_formats::{to_feet, to_kmh, StateVector, NOT_AVAILABLE};

use crate::{Credentials, FetchError, MetadataCache, Opensky, Stats};

/// Center and radius (in km) of a query.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Area {
    pub center: Location,
    pub radius: f64,
}

impl Area {
    pub fn new(lat: f64, lon: f64, radius: f64) -> Self {
        Area {
            center: Location::new(lat, lon),
            radius,
        }
    }

    #[inline]
    pub fn bb(&self) -> BB {
        BB::from_location(&self.center, self.radius)
    }

    /// Radius as shown in messages, always with a decimal part when it is whole ("25.0").
    ///
    pub fn radius_str(&self) -> String {
        let r = self.radius;
        if r.is_finite() && r.fract() == 0. {
            format!("{r:.1}")
        } else {
            format!("{r}")
        }
    }
}

/// One airborne aircraft, ready to be displayed.
///
#[derive(Clone, Debug, PartialEq)]
pub struct EnrichedFlight {
    pub callsign: String,
    pub icao24: String,
    pub origin_country: String,
    pub model: String,
    pub category: &'static str,
    pub is_helicopter: bool,
    pub last_contact: String,
    pub position: Option<Location>,
    /// Feet
    pub altitude: Option<f64>,
    /// km/h
    pub velocity: Option<f64>,
    /// Degrees
    pub heading: Option<f64>,
    /// km from the center of the area
    pub distance: Option<f64>,
    /// Degrees from the center of the area
    pub bearing: Option<f64>,
}

impl EnrichedFlight {
    pub fn new(sv: &StateVector, model: String, from: &Location) -> Self {
        let position = match (sv.latitude, sv.longitude) {
            (Some(lat), Some(lon)) => Some(Location::new(lat, lon)),
            _ => None,
        };

        EnrichedFlight {
            callsign: sv.callsign(),
            icao24: sv.icao24.clone(),
            origin_country: sv.origin_country.clone(),
            model,
            category: sv.category_description(),
            is_helicopter: sv.is_helicopter(),
            last_contact: sv.last_contact_str(),
            position,
            altitude: to_feet(sv.baro_altitude),
            velocity: to_kmh(sv.velocity),
            heading: sv.true_track,
            distance: position.map(|p| from.distance_to(&p)),
            bearing: position.map(|p| from.bearing_to(&p)),
        }
    }

    /// Sort key, no distance means last.
    ///
    #[inline]
    fn sort_key(&self) -> f64 {
        self.distance.unwrap_or(f64::INFINITY)
    }
}

fn or_na(v: Option<f64>, prec: usize) -> String {
    match v {
        Some(v) => format!("{v:.prec$}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

impl Display for EnrichedFlight {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let bearing = match self.bearing {
            Some(b) => format!("{b:.1}°"),
            None => NOT_AVAILABLE.to_string(),
        };
        let marker = if self.is_helicopter { " 🚁" } else { " ✈️" };
        let (lat, lon) = match self.position {
            Some(p) => (format!("{:.4}", p.lat), format!("{:.4}", p.lon)),
            None => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
        };

        writeln!(
            f,
            "  - Callsign: {}, ICAO24: {}, Country: {}",
            self.callsign, self.icao24, self.origin_country
        )?;
        writeln!(
            f,
            "    Distance from you: {} km, Look in this direction: {} ({})",
            or_na(self.distance, 2),
            degrees_to_cardinal(self.bearing),
            bearing
        )?;
        writeln!(f, "    Model: {}", self.model)?;
        writeln!(f, "    Type: {}{}", self.category, marker)?;
        writeln!(f, "    Position: Lat {}, Lon {}", lat, lon)?;
        writeln!(
            f,
            "    Altitude: {} feet, Speed: {} km/h, Heading: {}°",
            or_na(self.altitude, 0),
            or_na(self.velocity, 0),
            or_na(self.heading, 1)
        )
    }
}

/// Airborne flights in an area, closest first.
///
#[derive(Clone, Debug, PartialEq)]
pub struct FlightReport {
    pub area: Area,
    pub flights: Vec<EnrichedFlight>,
}

impl Display for FlightReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Flight information within {} km radius of your location (Lat: {:.4}, Lon: {:.4}):",
            self.area.radius_str(),
            self.area.center.lat,
            self.area.center.lon
        )?;
        writeln!(f, "Total airborne flights found: {}", self.flights.len())?;
        writeln!(f)?;

        let blocks = self
            .flights
            .iter()
            .map(|fl| fl.to_string())
            .collect::<Vec<_>>();
        write!(f, "{}", blocks.join("\n"))
    }
}

/// Result of a query.
///
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Success(FlightReport),
    /// No token
    AuthFailure,
    /// States query failed
    Failed(FetchError),
    /// Nothing at all in the area
    NoData(Area),
    /// Only aircraft on the ground
    NoAirborne(Area),
}

impl Outcome {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Success(report) => write!(f, "{}", report),
            Outcome::AuthFailure => write!(
                f,
                "Authentication failed. Could not retrieve access token from OpenSky. Please check your client_id and client_secret."
            ),
            Outcome::Failed(e) => write!(f, "{}", e),
            Outcome::NoData(area) => write!(
                f,
                "No flight information found within {} km radius around ({:.4}, {:.4}) at this time. The OpenSky Network might not have data for this area or period, or the API returned an empty set.",
                area.radius_str(),
                area.center.lat,
                area.center.lon
            ),
            Outcome::NoAirborne(area) => write!(
                f,
                "No airborne flight information found within {} km radius around ({:.4}, {:.4}) at this time. All detected aircraft might be on the ground or no data is available.",
                area.radius_str(),
                area.center.lat,
                area.center.lon
            ),
        }
    }
}

impl From<FetchError> for Outcome {
    fn from(e: FetchError) -> Self {
        Outcome::Failed(e)
    }
}

impl Opensky {
    /// Everything flying within `radius_km` of (`latitude`, `longitude`).
    ///
    /// Metadata are cached for the duration of this call only.
    ///
    #[tracing::instrument(skip(self, creds))]
    pub fn get_flights_around_location(
        &self,
        creds: &Credentials,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Outcome {
        let area = Area::new(latitude, longitude, radius_km);

        let token = match self.get_oauth_token(creds) {
            Some(token) => token,
            None => return Outcome::AuthFailure,
        };

        let cache = MetadataCache::new();
        self.flights_in_area(&token, &area, &cache)
    }

    /// Same as `get_flights_around_location()` with an existing token and cache.
    ///
    #[tracing::instrument(skip(self, token, cache))]
    pub fn flights_in_area(&self, token: &str, area: &Area, cache: &MetadataCache) -> Outcome {
        let start = Instant::now();

        let bb = area.bb();
        debug!("bb={:?}", bb);

        let (list, bytes) = match self.fetch_states(token, &bb) {
            Ok(res) => res,
            Err(e) => {
                error!("{}", e);
                return e.into();
            }
        };

        let states = match list.states {
            Some(states) if !states.is_empty() => states,
            _ => {
                info!("no state in area");
                return Outcome::NoData(*area);
            }
        };

        let known = cache.len();
        let mut stats = Stats {
            pkts: states.len() as u32,
            bytes: bytes as u64,
            ..Default::default()
        };

        let mut flights = Vec::with_capacity(states.len());
        for sv in states.iter() {
            // Grounded aircraft are looked up too.
            let model = self.get_aircraft_metadata(&sv.icao24, cache);

            if sv.on_ground {
                trace!("{} on ground", sv.icao24);
                stats.ground += 1;
                continue;
            }
            flights.push(EnrichedFlight::new(sv, model, &area.center));
        }

        stats.miss = cache.len().saturating_sub(known) as u32;
        stats.hits = stats.pkts.saturating_sub(stats.miss);
        stats.tm = start.elapsed().as_millis();
        debug!("stats: {}", stats);

        if flights.is_empty() {
            return Outcome::NoAirborne(*area);
        }

        flights.sort_by(|a, b| a.sort_key().total_cmp(&b.sort_key()));
        info!("{} airborne flights", flights.len());

        Outcome::Success(FlightReport {
            area: *area,
            flights,
        })
    }
}
