//! [`EphemerisProvider`] for the analytic series.

use kaal_search::{
    EclipseExtremum, EphemerisContext, EphemerisProvider, ProviderError, SunMoonTimes,
};
use kaal_time::{JulianDay, gmst_rad, local_sidereal_time_rad};
use kaal_vedic_base::{GeoLocation, Graha};

use crate::AnalyticEphemeris;
use crate::coords::{altitude_rad, topocentric_altitude_deg, wrap_pi};
use crate::eclipse;
use crate::error::EphemError;
use crate::riseset;

impl AnalyticEphemeris {
    /// Topocentric altitude of the Sun or Moon, degrees, without refraction.
    pub fn altitude(
        &self,
        body: Graha,
        at: JulianDay,
        location: &GeoLocation,
    ) -> Result<f64, EphemError> {
        let (eq, place) = self.equatorial(body, at)?;
        let lst = local_sidereal_time_rad(gmst_rad(at), location.longitude_rad());
        let ha = wrap_pi(lst - eq.ra_rad);
        let geocentric = altitude_rad(ha, eq.dec_rad, location.latitude_rad()).to_degrees();
        Ok(topocentric_altitude_deg(geocentric, place.parallax_deg()))
    }
}

impl EphemerisProvider for AnalyticEphemeris {
    fn sidereal_longitude(
        &self,
        ctx: &EphemerisContext,
        body: Graha,
        at: JulianDay,
    ) -> Result<f64, ProviderError> {
        Ok(self.sidereal_longitude_deg(ctx, body, at)?)
    }

    fn sun_moon_times(
        &self,
        _ctx: &EphemerisContext,
        local_noon: JulianDay,
        location: &GeoLocation,
    ) -> Result<SunMoonTimes, ProviderError> {
        Ok(riseset::sun_moon_times(self, local_noon, location)?)
    }

    fn altitude_deg(
        &self,
        _ctx: &EphemerisContext,
        body: Graha,
        at: JulianDay,
        location: &GeoLocation,
    ) -> Result<f64, ProviderError> {
        Ok(self.altitude(body, at, location)?)
    }

    fn next_solar_eclipse(
        &self,
        _ctx: &EphemerisContext,
        after: JulianDay,
        location: &GeoLocation,
    ) -> Result<Option<EclipseExtremum>, ProviderError> {
        Ok(eclipse::next_solar_eclipse(self, after, location)?)
    }

    fn next_lunar_eclipse(
        &self,
        _ctx: &EphemerisContext,
        after: JulianDay,
    ) -> Result<Option<EclipseExtremum>, ProviderError> {
        Ok(eclipse::next_lunar_eclipse(self, after)?)
    }
}
