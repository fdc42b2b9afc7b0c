//! Module to load and process the data coming from the Opensky site.
//!
//! XXX they send out an array of arrays, each representing a specific state vector, so
//!     we have our own `Deserialize` that picks the fields by position.
//!
//! Documentation is taken from [The Opensky site](https://openskynetwork.github.io/opensky-api/rest.html)
//!

use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, Utc};
use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use strum::FromRepr;
use tracing::trace;

/// Placeholder for anything OpenSky did not tell us
pub const NOT_AVAILABLE: &str = "N/A";

/// Origin of state's position
///
#[derive(Clone, Copy, Debug, Deserialize_repr, PartialEq, Serialize_repr)]
#[repr(u8)]
pub enum Source {
    AdsB = 0,
    Asterix,
    MLAT,
    FLARM,
}

/// Aircraft category, only sent when asking for `extended=1` (index 17).
///
#[derive(Clone, Copy, Debug, FromRepr, PartialEq, Eq)]
#[repr(u8)]
pub enum Category {
    NoInfo = 0,
    NoAdsBEmitterCategoryInfo,
    Light,
    Small,
    Large,
    HighVortexLarge,
    Heavy,
    HighPerformance,
    RotorCraft,
    Glider,
    Lighter,
    Skydiver,
    UltraLight,
    Reserved,
    Uav,
    Space,
    SurfaceEmergencyVehicle,
    SurfaceServiceVehicle,
    PointObstacle,
    ClusterObstacle,
    LineObstacle,
}

impl Category {
    /// Label used when the code is absent or outside of the table
    pub const UNKNOWN: &'static str = "Unknown Type";

    /// Human-readable description of the category
    ///
    pub fn description(&self) -> &'static str {
        match self {
            Category::NoInfo => "No information",
            Category::NoAdsBEmitterCategoryInfo => "No ADS-B Emitter Category Information",
            Category::Light => "Light (< 15500 lbs)",
            Category::Small => "Small (15500 to 75000 lbs)",
            Category::Large => "Large (75000 to 300000 lbs)",
            Category::HighVortexLarge => "High-Vortex Large",
            Category::Heavy => "Heavy (> 300000 lbs)",
            Category::HighPerformance => "High-Performance",
            Category::RotorCraft => "Rotorcraft",
            Category::Glider => "Glider / sailplane",
            Category::Lighter => "Lighter-than-air",
            Category::Skydiver => "Parachutist / Skydiver",
            Category::UltraLight => "Ultralight / hang-glider / paraglider",
            Category::Reserved => "Reserved",
            Category::Uav => "Unmanned Aerial Vehicle",
            Category::Space => "Space / Trans-atmospheric vehicle",
            Category::SurfaceEmergencyVehicle => "Surface Vehicle – Emergency Vehicle",
            Category::SurfaceServiceVehicle => "Surface Vehicle – Service Vehicle",
            Category::PointObstacle => "Point Obstacle",
            Category::ClusterObstacle => "Cluster Obstacle",
            Category::LineObstacle => "Line Obstacle",
        }
    }

    /// Describe a raw category code, known or not
    ///
    pub fn describe(code: Option<u8>) -> &'static str {
        code.and_then(Category::from_repr)
            .map(|c| c.description())
            .unwrap_or(Self::UNKNOWN)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

// Public structs

/// This is the main container for packets sent by the API.
/// It includes a 32-bit UNIX timestamp and a set of `StateVector`.
///
#[derive(Debug, Default, Deserialize)]
pub struct StateList {
    /// UNIX timestamp
    #[serde(default)]
    pub time: i64,
    /// The state vectors
    pub states: Option<Vec<StateVector>>,
}

impl StateList {
    /// Deserialize from json, a `null` document is an empty list.
    ///
    #[tracing::instrument(skip(input))]
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        let data: Option<StateList> = serde_json::from_str(input)?;
        let data = data.unwrap_or_default();
        trace!(
            "{} points",
            data.states.as_ref().map(|s| s.len()).unwrap_or(0)
        );
        Ok(data)
    }

    /// Do we have any state at all?
    ///
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.as_ref().map(|s| s.is_empty()).unwrap_or(true)
    }
}

/// Definition of a state vector as generated
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StateVector {
    /// ICAO ID
    pub icao24: String,
    /// Call-sign of the vehicule
    pub callsign: Option<String>,
    /// Origin Country
    pub origin_country: String,
    pub time_position: Option<i64>,
    pub last_contact: i64,
    /// Position
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    /// Meters
    pub baro_altitude: Option<f64>,
    pub on_ground: bool,
    /// m/s
    pub velocity: Option<f64>,
    /// Heading, degrees clockwise from North
    pub true_track: Option<f64>,
    pub vertical_rate: Option<f64>,
    pub sensors: Option<Vec<i64>>,
    pub geo_altitude: Option<f64>,
    pub squawk: Option<String>,
    pub spi: bool,
    /// Position source
    pub position_source: Option<Source>,
    /// Aircraft category (raw code, not all servers send it)
    pub category: Option<u8>,
}

impl StateVector {
    /// Trimmed call-sign, "N/A" when blank or absent
    ///
    pub fn callsign(&self) -> String {
        match self.callsign.as_deref().map(str::trim) {
            Some(cs) if !cs.is_empty() => cs.to_string(),
            _ => NOT_AVAILABLE.to_string(),
        }
    }

    /// Describe the category
    ///
    #[inline]
    pub fn category_description(&self) -> &'static str {
        Category::describe(self.category)
    }

    #[inline]
    pub fn is_helicopter(&self) -> bool {
        self.category == Some(Category::RotorCraft as u8)
    }

    /// Last contact as `YYYY-MM-DD HH:MM:SS UTC`
    ///
    pub fn last_contact_str(&self) -> String {
        match DateTime::<Utc>::from_timestamp(self.last_contact, 0) {
            Some(tm) => tm.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            None => NOT_AVAILABLE.to_string(),
        }
    }
}

/// Opensky sends out tuples we need to match with real field names, see
/// [StateVector](https://openskynetwork.github.io/opensky-api/rest.html#all-state-vectors)
///
/// Fields 0 to 10 are mandatory, the rest may be missing (older servers do not send the
/// category at index 17).
///
impl<'de> Deserialize<'de> for StateVector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(StateVectorVisitor)
    }
}

struct StateVectorVisitor;

/// What we expect from each element of `states`
const EXPECTING: &str = "an array of at least 11 state vector fields";

/// Fetch the next mandatory field
///
fn required<'de, A, T>(seq: &mut A, idx: usize) -> Result<T, A::Error>
where
    A: SeqAccess<'de>,
    T: Deserialize<'de>,
{
    seq.next_element()?
        .ok_or_else(|| de::Error::invalid_length(idx, &EXPECTING))
}

/// Fetch the next optional field, a missing one is the same as `null`
///
fn optional<'de, A, T>(seq: &mut A) -> Result<Option<T>, A::Error>
where
    A: SeqAccess<'de>,
    T: Deserialize<'de>,
{
    Ok(seq.next_element::<Option<T>>()?.flatten())
}

impl<'de> Visitor<'de> for StateVectorVisitor {
    type Value = StateVector;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(EXPECTING)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let icao24: String = required(&mut seq, 0)?;
        let callsign: Option<String> = required(&mut seq, 1)?;
        let origin_country: String = required(&mut seq, 2)?;
        let time_position: Option<i64> = required(&mut seq, 3)?;
        let last_contact: i64 = required(&mut seq, 4)?;
        let longitude: Option<f64> = required(&mut seq, 5)?;
        let latitude: Option<f64> = required(&mut seq, 6)?;
        let baro_altitude: Option<f64> = required(&mut seq, 7)?;
        let on_ground: bool = required(&mut seq, 8)?;
        let velocity: Option<f64> = required(&mut seq, 9)?;
        let true_track: Option<f64> = required(&mut seq, 10)?;
        let vertical_rate: Option<f64> = optional(&mut seq)?;
        let sensors: Option<Vec<i64>> = optional(&mut seq)?;
        let geo_altitude: Option<f64> = optional(&mut seq)?;
        let squawk: Option<String> = optional(&mut seq)?;
        let spi: Option<bool> = optional(&mut seq)?;
        let position_source: Option<Source> = optional(&mut seq)?;
        let category: Option<u8> = optional(&mut seq)?;

        // Ignore anything a future API would add
        //
        while seq.next_element::<IgnoredAny>()?.is_some() {}

        Ok(StateVector {
            icao24,
            callsign,
            origin_country,
            time_position,
            last_contact,
            longitude,
            latitude,
            baro_altitude,
            on_ground,
            velocity,
            true_track,
            vertical_rate,
            sensors,
            geo_altitude,
            squawk,
            spi: spi.unwrap_or(false),
            position_source,
            category,
        })
    }
}

/// Record returned by `/metadata/aircraft/icao/{icao24}`
///
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AircraftMetadata {
    pub manufacturer_name: Option<String>,
    pub model: Option<String>,
    pub registration: Option<String>,
    pub typecode: Option<String>,
}

impl AircraftMetadata {
    /// "{manufacturer} {model}", `None` if we have neither
    ///
    pub fn description(&self) -> Option<String> {
        let manufacturer = self.manufacturer_name.as_deref().unwrap_or("").trim();
        let model = self.model.as_deref().unwrap_or("").trim();

        if manufacturer.is_empty() && model.is_empty() {
            None
        } else {
            Some(format!("{} {}", manufacturer, model).trim().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const FULL: &str = r##"{"time":1717236000,"states":[
        ["4b1815","SWR18K  ","Switzerland",1717235995,1717235999,4.4012,50.9012,10972.8,false,231.5,87.3,0.0,null,11277.6,"1000",false,0,4],
        ["3c6444","","Germany",null,1717235990,4.3,50.7,null,true,null,null,null,null,null,null,false,0]
    ]}"##;

    #[test]
    fn test_statelist_from_json() {
        let sl = StateList::from_json(FULL).unwrap();
        assert_eq!(1717236000, sl.time);
        assert!(!sl.is_empty());

        let states = sl.states.unwrap();
        assert_eq!(2, states.len());

        let s = &states[0];
        assert_eq!("4b1815", s.icao24);
        assert_eq!("SWR18K", s.callsign());
        assert_eq!(Some(50.9012), s.latitude);
        assert_eq!(Some(4.4012), s.longitude);
        assert_eq!(Some(10972.8), s.baro_altitude);
        assert!(!s.on_ground);
        assert_eq!(Some(Source::AdsB), s.position_source);
        assert_eq!(Some(4), s.category);
        assert_eq!("Large (75000 to 300000 lbs)", s.category_description());

        let s = &states[1];
        assert_eq!("N/A", s.callsign());
        assert!(s.on_ground);
        assert_eq!(None, s.baro_altitude);
        assert_eq!(None, s.category);
        assert_eq!(Category::UNKNOWN, s.category_description());
    }

    #[test]
    fn test_statelist_short_vectors() {
        let input = r##"{"time":1,"states":[["abcdef",null,"France",null,0,2.35,48.85,1000,false,100,90]]}"##;
        let sl = StateList::from_json(input).unwrap();
        let s = &sl.states.unwrap()[0];
        assert_eq!("N/A", s.callsign());
        assert_eq!(None, s.position_source);
        assert!(!s.spi);
    }

    #[test]
    fn test_statelist_extra_fields() {
        let input = r##"{"time":1,"states":[["abcdef","X","France",null,0,2.35,48.85,1000,false,100,90,null,null,null,null,false,0,8,"future"]]}"##;
        let sl = StateList::from_json(input).unwrap();
        let s = &sl.states.unwrap()[0];
        assert!(s.is_helicopter());
    }

    #[test]
    fn test_statelist_truncated_vector() {
        let input = r##"{"time":1,"states":[["abcdef","X","France"]]}"##;
        assert!(StateList::from_json(input).is_err());
    }

    #[rstest]
    #[case(r##"{"time":1,"states":null}"##)]
    #[case(r##"{"time":1,"states":[]}"##)]
    #[case(r##"{"time":1}"##)]
    #[case("null")]
    #[case(" null\n")]
    fn test_statelist_empty(#[case] input: &str) {
        let sl = StateList::from_json(input).unwrap();
        assert!(sl.is_empty());
    }

    #[test]
    fn test_last_contact_str() {
        let sl = StateList::from_json(FULL).unwrap();
        let s = &sl.states.unwrap()[0];
        assert_eq!("2024-06-01 09:59:59 UTC", s.last_contact_str());
    }

    #[rstest]
    #[case(Some(0), "No information")]
    #[case(Some(8), "Rotorcraft")]
    #[case(Some(14), "Unmanned Aerial Vehicle")]
    #[case(Some(20), "Line Obstacle")]
    #[case(Some(21), "Unknown Type")]
    #[case(None, "Unknown Type")]
    fn test_category_describe(#[case] code: Option<u8>, #[case] res: &str) {
        assert_eq!(res, Category::describe(code));
    }

    #[rstest]
    #[case(Some("Airbus"), Some("A320 214"), Some("Airbus A320 214"))]
    #[case(Some(" Boeing "), Some(""), Some("Boeing"))]
    #[case(None, Some("Cessna 172"), Some("Cessna 172"))]
    #[case(Some("  "), None, None)]
    #[case(None, None, None)]
    fn test_metadata_description(
        #[case] manufacturer: Option<&str>,
        #[case] model: Option<&str>,
        #[case] res: Option<&str>,
    ) {
        let m = AircraftMetadata {
            manufacturer_name: manufacturer.map(String::from),
            model: model.map(String::from),
            ..Default::default()
        };
        assert_eq!(res.map(String::from), m.description());
    }

    #[test]
    fn test_metadata_from_json() {
        let input = r##"{"icao24":"4b1815","registration":"HB-JCA","manufacturerName":"Airbus","model":"A220-300","typecode":"BCS3","owner":"Swiss"}"##;
        let m: AircraftMetadata = serde_json::from_str(input).unwrap();
        assert_eq!(Some("Airbus A220-300".to_string()), m.description());
    }
}
