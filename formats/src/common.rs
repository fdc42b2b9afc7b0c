//! Unit conversions shared by all formats.
//!
//! All of them take an `Option` as OpenSky leaves any measure it does not have as `null`,
//! and a missing value must stay missing.
//!

/// Convert meters into feet
///
#[inline]
pub fn to_feet(a: Option<f64>) -> Option<f64> {
    a.map(|a| a * 3.28084)
}

/// Convert m/s into km/h
///
#[inline]
pub fn to_kmh(a: Option<f64>) -> Option<f64> {
    a.map(|a| a * 3.6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        let ft = to_feet(Some(1000.)).unwrap();
        assert!((ft - 3280.84).abs() < 1e-6);
        let kmh = to_kmh(Some(100.)).unwrap();
        assert!((kmh - 360.).abs() < 1e-6);
        assert_eq!(None, to_feet(None));
        assert_eq!(None, to_kmh(None));
    }
}
