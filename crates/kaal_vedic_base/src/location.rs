//! Observer location.

use crate::error::VedicError;

/// Geographic location on Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoLocation {
    /// Geodetic latitude in degrees, north positive. Range: [-90, 90].
    pub latitude_deg: f64,
    /// Geodetic longitude in degrees, east positive. Range: [-180, 180].
    pub longitude_deg: f64,
    /// Altitude above mean sea level in meters.
    pub altitude_m: f64,
}

impl GeoLocation {
    /// Create a new geographic location.
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
        }
    }

    /// Sea-level location from latitude and longitude.
    pub fn at_sea_level(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self::new(latitude_deg, longitude_deg, 0.0)
    }

    /// Latitude in radians.
    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    /// Longitude in radians (east positive).
    pub fn longitude_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    /// Reject non-finite or out-of-range coordinates.
    pub fn validate(&self) -> Result<(), VedicError> {
        if !self.latitude_deg.is_finite() || !(-90.0..=90.0).contains(&self.latitude_deg) {
            return Err(VedicError::InvalidLocation("latitude must be in [-90, 90]"));
        }
        if !self.longitude_deg.is_finite() || !(-180.0..=180.0).contains(&self.longitude_deg) {
            return Err(VedicError::InvalidLocation(
                "longitude must be in [-180, 180]",
            ));
        }
        if !self.altitude_m.is_finite() {
            return Err(VedicError::InvalidLocation("altitude must be finite"));
        }
        Ok(())
    }
}
