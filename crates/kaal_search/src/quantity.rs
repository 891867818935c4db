//! Angular quantities that drive the panchang partitions.

use kaal_time::JulianDay;
use kaal_vedic_base::{
    Graha, KARANA_COUNT, KARANA_SEGMENT_DEG, NAKSHATRA_COUNT, NAKSHATRA_SPAN_27, TITHI_COUNT,
    TITHI_SEGMENT_DEG, YOGA_COUNT, YOGA_SEGMENT_DEG, normalize_360,
};

use crate::error::SearchError;
use crate::provider::{ElementKind, EphemerisContext, EphemerisProvider};

/// A time-parameterized angle in [0, 360).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AngularQuantity {
    /// Sun's sidereal longitude.
    SolarLongitude,
    /// Moon's sidereal longitude.
    LunarLongitude,
    /// Moon minus Sun. The ayanamsha cancels.
    Elongation,
    /// Moon plus Sun, sidereal.
    LuniSolarSum,
}

impl AngularQuantity {
    /// Evaluate at `at`, normalized to [0, 360).
    pub fn evaluate<P: EphemerisProvider + ?Sized>(
        self,
        provider: &P,
        ctx: &EphemerisContext,
        at: JulianDay,
    ) -> Result<f64, SearchError> {
        let value = match self {
            Self::SolarLongitude => provider.sidereal_longitude(ctx, Graha::Surya, at)?,
            Self::LunarLongitude => provider.sidereal_longitude(ctx, Graha::Chandra, at)?,
            Self::Elongation => {
                let moon = provider.sidereal_longitude(ctx, Graha::Chandra, at)?;
                let sun = provider.sidereal_longitude(ctx, Graha::Surya, at)?;
                moon - sun
            }
            Self::LuniSolarSum => {
                let moon = provider.sidereal_longitude(ctx, Graha::Chandra, at)?;
                let sun = provider.sidereal_longitude(ctx, Graha::Surya, at)?;
                moon + sun
            }
        };
        Ok(normalize_360(value))
    }

    /// Coarse scan step, in days, short enough that no cell is stepped over.
    pub const fn step_days(self) -> f64 {
        match self {
            // ~1 deg/day
            Self::SolarLongitude => 1.0,
            // ~13 deg/day against 13.3 deg cells
            Self::LunarLongitude => 0.5,
            // ~12 deg/day relative motion
            Self::Elongation => 0.25,
            // ~14 deg/day
            Self::LuniSolarSum => 0.25,
        }
    }
}

impl ElementKind {
    /// Governing angular quantity.
    pub const fn quantity(self) -> AngularQuantity {
        match self {
            Self::Tithi | Self::Karana => AngularQuantity::Elongation,
            Self::Nakshatra => AngularQuantity::LunarLongitude,
            Self::Yoga => AngularQuantity::LuniSolarSum,
        }
    }

    /// Cell width in degrees.
    pub const fn cell_width_deg(self) -> f64 {
        match self {
            Self::Tithi => TITHI_SEGMENT_DEG,
            Self::Nakshatra => NAKSHATRA_SPAN_27,
            Self::Yoga => YOGA_SEGMENT_DEG,
            Self::Karana => KARANA_SEGMENT_DEG,
        }
    }

    /// Number of cells tiling the circle.
    pub const fn cell_count(self) -> u8 {
        match self {
            Self::Tithi => TITHI_COUNT,
            Self::Nakshatra => NAKSHATRA_COUNT,
            Self::Yoga => YOGA_COUNT,
            Self::Karana => KARANA_COUNT,
        }
    }

    /// Cell containing the angle `deg`.
    pub fn cell_of(self, deg: f64) -> u8 {
        let idx = (normalize_360(deg) / self.cell_width_deg()).floor() as u8;
        idx.min(self.cell_count() - 1)
    }

    /// Starting angle of cell `index`, wrapped into [0, 360).
    pub fn cell_start_deg(self, index: u8) -> f64 {
        normalize_360(f64::from(index % self.cell_count()) * self.cell_width_deg())
    }
}
