//! The [`Almanac`]: validated entry points over `kaal_search`.

use kaal_ephem::AnalyticEphemeris;
use kaal_search::{
    CalendarEpoch, EclipseEvent, EphemerisContext, EphemerisProvider, FestivalEvent,
    PanchangRecord, SankrantiEvent, ScanConfig, SearchError, TithiDate, YogaWindow,
    eclipses_for_year, festivals, hora_schedule_at, panchang_at, resolve_epoch,
    sankrantis_for_year, tithi_dates, yoga_windows_for_month, yoga_windows_for_year,
};
use kaal_time::JulianDay;
use kaal_vedic_base::{GeoLocation, HoraSlot, Vaar, divide_horas};
use tracing::{info_span, warn};

use crate::config::AlmanacConfig;
use crate::error::AlmanacError;

/// First supported Gregorian year.
pub const MIN_YEAR: i32 = 1800;
/// Last supported Gregorian year.
pub const MAX_YEAR: i32 = 2200;

fn check_year(year: i32) -> Result<(), AlmanacError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(AlmanacError::YearOutOfRange(year))
    }
}

fn check_instant(at: JulianDay) -> Result<(), AlmanacError> {
    if !at.value().is_finite() {
        return Err(AlmanacError::InvalidInput("instant must be finite"));
    }
    check_year(at.utc_year())
}

/// Panchang, epoch and year-scan queries against one provider and frame.
///
/// The frame and scan tuning are fixed at construction; every method is a
/// pure function of its arguments.
#[derive(Debug, Clone)]
pub struct Almanac<P = AnalyticEphemeris> {
    provider: P,
    ctx: EphemerisContext,
    scan: ScanConfig,
}

impl Almanac<AnalyticEphemeris> {
    /// Almanac over the built-in analytic ephemeris.
    pub fn analytic(config: &AlmanacConfig) -> Result<Self, AlmanacError> {
        Self::new(AnalyticEphemeris::new(), config)
    }
}

impl<P: EphemerisProvider> Almanac<P> {
    pub fn new(provider: P, config: &AlmanacConfig) -> Result<Self, AlmanacError> {
        config.validate()?;
        Ok(Self {
            provider,
            ctx: config.context(),
            scan: config.scan_config(),
        })
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn context(&self) -> &EphemerisContext {
        &self.ctx
    }

    /// Panchang at `at`. Any failure is returned; there is no partial record.
    pub fn get_panchang(
        &self,
        at: JulianDay,
        location: &GeoLocation,
    ) -> Result<PanchangRecord, AlmanacError> {
        check_instant(at)?;
        location.validate()?;
        Ok(panchang_at(
            &self.provider,
            &self.ctx,
            at,
            location,
            &self.scan.locator,
        )?)
    }

    /// Vikram Samvat, Saka year and Samvatsara of `at`.
    ///
    /// Input errors are returned. A failed anchor search yields an epoch
    /// whose fields are all `None`.
    pub fn get_calendar_epoch(
        &self,
        at: JulianDay,
        location: &GeoLocation,
    ) -> Result<CalendarEpoch, AlmanacError> {
        check_instant(at)?;
        location.validate()?;
        match resolve_epoch(&self.provider, &self.ctx, at, location, &self.scan) {
            Ok(epoch) => Ok(epoch),
            Err(e @ (SearchError::Vedic(_) | SearchError::InvalidConfig(_))) => Err(e.into()),
            Err(e) => {
                warn!(at = %at, error = %e, "calendar epoch unavailable");
                Ok(CalendarEpoch::unavailable())
            }
        }
    }

    /// The twelve ingresses of `year`, ordered by moment.
    ///
    /// Ingresses are geocentric; `location` is validated but does not
    /// change the result.
    pub fn get_sankranti_list(
        &self,
        year: i32,
        location: &GeoLocation,
    ) -> Result<Vec<SankrantiEvent>, AlmanacError> {
        check_year(year)?;
        location.validate()?;
        let _span = info_span!("sankranti", year).entered();
        Ok(sankrantis_for_year(&self.provider, &self.ctx, year, &self.scan)?)
    }

    /// Eclipses of `year` visible at `location`, ordered by peak.
    ///
    /// Solar eclipses carry the observer's own maximum, kind, magnitude and
    /// obscuration, and are kept only when the Sun is up at that maximum.
    /// Lunar eclipses are kept when the Moon is up at greatest eclipse.
    pub fn get_eclipses(
        &self,
        year: i32,
        location: &GeoLocation,
    ) -> Result<Vec<EclipseEvent>, AlmanacError> {
        check_year(year)?;
        location.validate()?;
        let _span = info_span!("eclipses", year).entered();
        Ok(eclipses_for_year(&self.provider, &self.ctx, year, location)?)
    }

    /// Festivals of `year` at `location`, ordered by date.
    pub fn get_festivals(
        &self,
        year: i32,
        location: &GeoLocation,
    ) -> Result<Vec<FestivalEvent>, AlmanacError> {
        check_year(year)?;
        location.validate()?;
        let _span = info_span!("festivals", year).entered();
        Ok(festivals(&self.provider, &self.ctx, year, location, &self.scan)?)
    }

    /// Every date of `year` whose sunrise tithi index is in `tithi_indices`.
    ///
    /// Indices are 0-based over the lunar month: 0 is Shukla Pratipada, 14
    /// Purnima, 15 Krishna Pratipada and 29 Amavasya. Within a paksha the
    /// traditional 1-based number is [`TithiInfo::tithi_in_paksha`].
    ///
    /// [`TithiInfo::tithi_in_paksha`]: crate::TithiInfo::tithi_in_paksha
    pub fn get_tithi_dates(
        &self,
        year: i32,
        location: &GeoLocation,
        tithi_indices: &[u8],
    ) -> Result<Vec<TithiDate>, AlmanacError> {
        check_year(year)?;
        location.validate()?;
        if tithi_indices.is_empty() {
            return Err(AlmanacError::InvalidInput("no tithi indices requested"));
        }
        let _span = info_span!("tithi_dates", year).entered();
        Ok(tithi_dates(
            &self.provider,
            &self.ctx,
            year,
            location,
            tithi_indices,
            &self.scan,
        )?)
    }

    /// Amrita Siddhi and Mrityu windows for one month, or the whole year
    /// when `month` is `None`.
    pub fn get_yoga_windows(
        &self,
        year: i32,
        month: Option<u32>,
        location: &GeoLocation,
    ) -> Result<Vec<YogaWindow>, AlmanacError> {
        check_year(year)?;
        location.validate()?;
        let _span = info_span!("yoga_windows", year, ?month).entered();
        let windows = match month {
            Some(m) if !(1..=12).contains(&m) => {
                return Err(AlmanacError::InvalidInput("month must be in 1..=12"));
            }
            Some(m) => {
                yoga_windows_for_month(&self.provider, &self.ctx, year, m, location, &self.scan)?
            }
            None => yoga_windows_for_year(&self.provider, &self.ctx, year, location, &self.scan)?,
        };
        Ok(windows)
    }

    /// Day and night horas from explicit sunrise, sunset and next sunrise.
    pub fn get_hora_schedule(
        &self,
        sunrise: JulianDay,
        sunset: JulianDay,
        next_sunrise: JulianDay,
        vaar: Vaar,
    ) -> Result<Vec<HoraSlot>, AlmanacError> {
        check_instant(sunrise)?;
        Ok(divide_horas(sunrise, sunset, next_sunrise, vaar)?)
    }

    /// Horas of the sunrise-to-sunrise day containing `at`.
    pub fn get_hora_schedule_at(
        &self,
        at: JulianDay,
        location: &GeoLocation,
    ) -> Result<Vec<HoraSlot>, AlmanacError> {
        check_instant(at)?;
        location.validate()?;
        Ok(hora_schedule_at(&self.provider, &self.ctx, at, location)?)
    }
}
