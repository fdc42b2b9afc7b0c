//! Location related module
//!
//! Everything here works on a spherical Earth with a mean radius of 6371 km, which is
//! what the great-circle (Haversine) formula expects.
//!
//! - `haversine_distance()` gives the distance in km between two points
//! - `calculate_bearing()` gives the initial bearing from one point to another
//! - `degrees_to_cardinal()` names the compass sector of a bearing
//! - `BB` is the lat/lon rectangle around a point used to scope a query
//!
//! NOTE: `BB` is not clamped at the poles and does not wrap around the ±180° meridian.
//!
use serde::Deserialize;
use tracing::trace;

/// Earth mean radius in km
pub const EARTH_RADIUS: f64 = 6371.;

/// The 16 sectors of the compass rose, clockwise from North
const CARDINALS: [&str; 16] = [
    "North",
    "North-Northeast",
    "Northeast",
    "East-Northeast",
    "East",
    "East-Southeast",
    "Southeast",
    "South-Southeast",
    "South",
    "South-Southwest",
    "Southwest",
    "West-Southwest",
    "West",
    "West-Northwest",
    "Northwest",
    "North-Northwest",
];

/// Width of one compass sector
const SECTOR: f64 = 360. / 16.;

/// Actual location
///
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
pub struct Location {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
}

impl Location {
    pub fn new(lat: f64, lon: f64) -> Self {
        Location { lat, lon }
    }

    /// Distance in km to `other`
    ///
    #[inline]
    pub fn distance_to(&self, other: &Location) -> f64 {
        haversine_distance(self.lat, self.lon, other.lat, other.lon)
    }

    /// Initial bearing in degrees to `other`
    ///
    #[inline]
    pub fn bearing_to(&self, other: &Location) -> f64 {
        calculate_bearing(self.lat, self.lon, other.lat, other.lon)
    }
}

/// Calculate the distance in km between two points using the Haversine formula.
///
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1) = (lat1.to_radians(), lon1.to_radians());
    let (lat2, lon2) = (lat2.to_radians(), lon2.to_radians());

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.).sin().powi(2);
    let c = 2. * a.sqrt().atan2((1. - a).sqrt());

    EARTH_RADIUS * c
}

/// Calculate the initial bearing from point 1 to point 2, in degrees within [0, 360).
///
pub fn calculate_bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1) = (lat1.to_radians(), lon1.to_radians());
    let (lat2, lon2) = (lat2.to_radians(), lon2.to_radians());

    let dlon = lon2 - lon1;

    let x = dlon.sin() * lat2.cos();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    let bearing = x.atan2(y).to_degrees();

    // `%` keeps the sign of the dividend so a tiny negative angle could still land on 360.
    //
    let bearing = (bearing + 360.) % 360.;
    if bearing >= 360. {
        0.
    } else {
        bearing
    }
}

/// Convert a bearing into one of the 16 compass directions.
///
/// Sectors are 22.5° wide and shifted by half a sector so that "North" is centered on 0°.
/// No bearing at all gives "N/A".
///
pub fn degrees_to_cardinal(deg: Option<f64>) -> &'static str {
    match deg {
        Some(d) => {
            let val = ((d + SECTOR / 2.) / SECTOR) as i64;
            CARDINALS[val.rem_euclid(16) as usize]
        }
        None => "N/A",
    }
}

/// Bounding box
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BB {
    /// Longitude - X0
    pub min_lon: f64,
    /// Latitude - Y0
    pub min_lat: f64,
    /// Longitude - X1
    pub max_lon: f64,
    /// Latitude - Y1
    pub max_lat: f64,
}

impl BB {
    /// Take a location and create a bounding box of `radius` km around it
    ///
    #[tracing::instrument]
    pub fn from_location(value: &Location, radius: f64) -> Self {
        Self::from_lat_lon(value.lat, value.lon, radius)
    }

    /// Take a lat lon tuple and create a bounding box of `radius` km around it
    ///
    /// Longitude degrees get shorter as we move away from the Equator so the longitude
    /// delta is corrected by `cos(lat)`.
    ///
    /// NOTE: `radius` is in km
    ///
    #[tracing::instrument]
    pub fn from_lat_lon(lat: f64, lon: f64, radius: f64) -> Self {
        let dlat = (radius / EARTH_RADIUS).to_degrees();
        let dlon = (radius / (EARTH_RADIUS * lat.to_radians().cos())).to_degrees();
        trace!("dlat={dlat} dlon={dlon}");

        Self {
            min_lon: lon - dlon,
            min_lat: lat - dlat,
            max_lon: lon + dlon,
            max_lat: lat + dlat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use tracing::info;

    #[inline]
    fn shorten(v: f64) -> String {
        format!("{:.3}", v)
    }

    #[test_pretty_log::test]
    fn test_bb_from_location_bxl() {
        info!("bxl");
        let loc = Location::new(50.8, 4.4);

        let bb = BB::from_location(&loc, 25.);
        assert_eq!(shorten(4.044272187172777), shorten(bb.min_lon));
        assert_eq!(shorten(50.57516959852031), shorten(bb.min_lat));
        assert_eq!(shorten(4.755727812827224), shorten(bb.max_lon));
        assert_eq!(shorten(51.02483040147968), shorten(bb.max_lat));
    }

    #[test]
    fn test_bb_zero_radius() {
        let bb = BB::from_lat_lon(50.8, 4.4, 0.);
        assert!((bb.min_lat - 50.8).abs() < 1e-9);
        assert!((bb.max_lat - 50.8).abs() < 1e-9);
        assert!((bb.min_lon - 4.4).abs() < 1e-9);
        assert!((bb.max_lon - 4.4).abs() < 1e-9);
    }

    #[test]
    fn test_haversine_paris_london() {
        let d = haversine_distance(48.8566, 2.3522, 51.5074, -0.1278);
        assert_eq!("343.556", shorten(d));
    }

    #[test]
    fn test_location_helpers() {
        let paris = Location::new(48.8566, 2.3522);
        let london = Location::new(51.5074, -0.1278);

        assert_eq!("343.556", shorten(paris.distance_to(&london)));
        assert_eq!("330.021", shorten(paris.bearing_to(&london)));
    }

    #[rstest]
    #[case((0., 0., 1., 0.), 0.)]
    #[case((0., 0., 0., 1.), 90.)]
    #[case((0., 0., -1., 0.), 180.)]
    #[case((0., 0., 0., -1.), 270.)]
    fn test_bearing_axes(#[case] pts: (f64, f64, f64, f64), #[case] res: f64) {
        let b = calculate_bearing(pts.0, pts.1, pts.2, pts.3);
        assert!((b - res).abs() < 1e-9, "got {b}");
    }

    #[rstest]
    #[case(Some(0.), "North")]
    #[case(Some(11.24), "North")]
    #[case(Some(11.26), "North-Northeast")]
    #[case(Some(90.), "East")]
    #[case(Some(180.), "South")]
    #[case(Some(270.), "West")]
    #[case(Some(348.76), "North")]
    #[case(Some(359.9), "North")]
    #[case(None, "N/A")]
    fn test_degrees_to_cardinal(#[case] deg: Option<f64>, #[case] res: &str) {
        assert_eq!(res, degrees_to_cardinal(deg));
    }

    proptest! {
        #[test]
        fn test_haversine_symmetric(
            lat1 in -90.0f64..90.0, lon1 in -180.0f64..180.0,
            lat2 in -90.0f64..90.0, lon2 in -180.0f64..180.0,
        ) {
            let d1 = haversine_distance(lat1, lon1, lat2, lon2);
            let d2 = haversine_distance(lat2, lon2, lat1, lon1);
            prop_assert!((d1 - d2).abs() < 1e-6);
        }

        #[test]
        fn test_haversine_same_point(lat in -90.0f64..90.0, lon in -180.0f64..180.0) {
            prop_assert_eq!(0., haversine_distance(lat, lon, lat, lon));
        }

        #[test]
        fn test_bearing_range(
            lat1 in -90.0f64..90.0, lon1 in -180.0f64..180.0,
            lat2 in -90.0f64..90.0, lon2 in -180.0f64..180.0,
        ) {
            let b = calculate_bearing(lat1, lon1, lat2, lon2);
            prop_assert!((0.0..360.0).contains(&b));
        }
    }
}
