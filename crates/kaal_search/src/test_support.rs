//! Deterministic linear-motion provider for unit tests.

use kaal_time::JulianDay;
use kaal_vedic_base::{GeoLocation, Graha, normalize_360};

use crate::provider::{
    EclipseBody, EclipseExtremum, EphemerisContext, EphemerisProvider, ProviderError, RiseSet,
    SunMoonTimes,
};

/// Mean sidereal motion of the Sun, degrees per day.
pub(crate) const SUN_RATE: f64 = 360.0 / 365.256_363;
/// Mean synodic month, days.
pub(crate) const SYNODIC_MONTH: f64 = 29.530_589;

/// Sun and Moon moving uniformly; sunrise and sunset six hours either side
/// of local noon.
#[derive(Debug, Clone)]
pub(crate) struct LinearProvider {
    pub epoch: JulianDay,
    pub sun0: f64,
    pub moon0: f64,
    pub sun_rate: f64,
    pub moon_rate: f64,
    pub polar: bool,
    pub eclipses: Vec<EclipseExtremum>,
    pub moon_altitude_deg: f64,
    /// Longitude queries inside this window fail.
    pub fail_window: Option<(JulianDay, JulianDay)>,
}

impl LinearProvider {
    /// Sun and Moon both at sidereal 0 deg at `epoch`.
    pub fn new_moon_at(epoch: JulianDay) -> Self {
        Self::with_sun_at_new_moon(epoch, 0.0)
    }

    /// New moon at `epoch` with the Sun at sidereal `sun_deg`.
    pub fn with_sun_at_new_moon(epoch: JulianDay, sun_deg: f64) -> Self {
        Self {
            epoch,
            sun0: sun_deg,
            moon0: sun_deg,
            sun_rate: SUN_RATE,
            moon_rate: SUN_RATE + 360.0 / SYNODIC_MONTH,
            polar: false,
            eclipses: Vec::new(),
            moon_altitude_deg: 30.0,
            fail_window: None,
        }
    }

    /// New moon 2024-03-10 12:00 UTC with the Sun in Kumbha. The next full
    /// moon falls at 2024-03-25 06:22 UTC and the next new moon on
    /// 2024-04-08 with the Sun in Meena.
    pub fn spring_2024() -> Self {
        let epoch = JulianDay::from_ymd_hms(2024, 3, 10, 12, 0, 0.0).unwrap();
        Self::with_sun_at_new_moon(epoch, 326.0)
    }

    /// New moon 2024-04-08 06:05 UTC with the Sun late in Meena. Shukla
    /// Pratipada runs until 05:42 UTC on Apr 9, so at Greenwich it holds no
    /// sunrise.
    pub fn kshaya_pratipada_2024() -> Self {
        let epoch = JulianDay::from_ymd_hms(2024, 4, 8, 6, 5, 0.0).unwrap();
        Self::with_sun_at_new_moon(epoch, 355.0)
    }

    pub fn synodic_month_days(&self) -> f64 {
        360.0 / (self.moon_rate - self.sun_rate)
    }

    pub fn sun_at(&self, at: JulianDay) -> f64 {
        normalize_360(self.sun0 + self.sun_rate * at.days_since(self.epoch))
    }

    pub fn moon_at(&self, at: JulianDay) -> f64 {
        normalize_360(self.moon0 + self.moon_rate * at.days_since(self.epoch))
    }

    /// First instant after `from` at which the elongation equals `deg`.
    pub fn elongation_reaches(&self, from: JulianDay, deg: f64) -> JulianDay {
        let rate = self.moon_rate - self.sun_rate;
        let now = normalize_360(self.moon_at(from) - self.sun_at(from));
        from.add_days(normalize_360(deg - now) / rate)
    }
}

impl EphemerisProvider for LinearProvider {
    fn sidereal_longitude(
        &self,
        _ctx: &EphemerisContext,
        body: Graha,
        at: JulianDay,
    ) -> Result<f64, ProviderError> {
        if let Some((a, b)) = self.fail_window {
            if at >= a && at <= b {
                return Err(ProviderError::Failed("synthetic outage".into()));
            }
        }
        match body {
            Graha::Surya => Ok(self.sun_at(at)),
            Graha::Chandra => Ok(self.moon_at(at)),
            other => Err(ProviderError::UnsupportedBody(other)),
        }
    }

    fn sun_moon_times(
        &self,
        _ctx: &EphemerisContext,
        local_noon: JulianDay,
        _location: &GeoLocation,
    ) -> Result<SunMoonTimes, ProviderError> {
        let (sunrise, sunset) = if self.polar {
            (RiseSet::AlwaysUp, RiseSet::AlwaysUp)
        } else {
            (
                RiseSet::Event(local_noon.add_days(-0.25)),
                RiseSet::Event(local_noon.add_days(0.25)),
            )
        };
        Ok(SunMoonTimes {
            sunrise,
            sunset,
            moonrise: RiseSet::Undefined,
            moonset: RiseSet::Undefined,
        })
    }

    fn altitude_deg(
        &self,
        _ctx: &EphemerisContext,
        body: Graha,
        _at: JulianDay,
        _location: &GeoLocation,
    ) -> Result<f64, ProviderError> {
        match body {
            Graha::Chandra => Ok(self.moon_altitude_deg),
            _ => Ok(10.0),
        }
    }

    fn next_solar_eclipse(
        &self,
        _ctx: &EphemerisContext,
        after: JulianDay,
        _location: &GeoLocation,
    ) -> Result<Option<EclipseExtremum>, ProviderError> {
        Ok(self.next_of(EclipseBody::Solar, after))
    }

    fn next_lunar_eclipse(
        &self,
        _ctx: &EphemerisContext,
        after: JulianDay,
    ) -> Result<Option<EclipseExtremum>, ProviderError> {
        Ok(self.next_of(EclipseBody::Lunar, after))
    }
}

impl LinearProvider {
    fn next_of(&self, body: EclipseBody, after: JulianDay) -> Option<EclipseExtremum> {
        self.eclipses
            .iter()
            .filter(|e| e.body == body && e.peak > after)
            .min_by(|a, b| a.peak.total_cmp(&b.peak))
            .copied()
    }
}
