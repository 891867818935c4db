//! Every date of a year on which a requested tithi holds at sunrise.

use chrono::NaiveDate;
use kaal_time::{DaySequence, JulianDay};
use kaal_vedic_base::{
    GeoLocation, Graha, Paksha, TITHI_COUNT, Tithi, VedicError, normalize_360,
    tithi_from_elongation,
};
use std::collections::HashSet;
use tracing::info;

use crate::error::SearchError;
use crate::provider::{EphemerisContext, EphemerisProvider};
use crate::scan::{ScanConfig, day_sample, scan_days};

/// A date whose sunrise falls in a requested tithi.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TithiDate {
    pub date: NaiveDate,
    pub tithi: Tithi,
    /// 0-based month index, as in [`TithiInfo::tithi_index`](crate::TithiInfo::tithi_index).
    pub tithi_index: u8,
    pub paksha: Paksha,
    /// 1-based number within the paksha; Purnima and Amavasya are 15.
    pub tithi_in_paksha: u8,
    /// Sample instant the tithi was read at.
    pub at: JulianDay,
}

/// Dates in `year` whose sunrise tithi index is one of `tithi_indices`.
///
/// Indices are 0-based over the month (Purnima is 14, Amavasya 29).
/// A kshaya tithi has no date; a tithi spanning two sunrises has two.
pub fn tithi_dates<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    year: i32,
    location: &GeoLocation,
    tithi_indices: &[u8],
    config: &ScanConfig,
) -> Result<Vec<TithiDate>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    location.validate()?;
    if tithi_indices.iter().any(|&i| i >= TITHI_COUNT) {
        return Err(VedicError::InvalidInput("tithi index must be < 30").into());
    }
    let wanted: HashSet<u8> = tithi_indices.iter().copied().collect();
    let days = DaySequence::for_year(year)?;

    let mut found = scan_days(&days, config, |step| {
        let sample = day_sample(provider, ctx, step, location)?;
        let sun = provider.sidereal_longitude(ctx, Graha::Surya, sample.at)?;
        let moon = provider.sidereal_longitude(ctx, Graha::Chandra, sample.at)?;
        let pos = tithi_from_elongation(normalize_360(moon - sun));
        if !wanted.contains(&pos.tithi_index) {
            return Ok(Vec::new());
        }
        Ok(vec![TithiDate {
            date: sample.date,
            tithi: pos.tithi,
            tithi_index: pos.tithi_index,
            paksha: pos.paksha,
            tithi_in_paksha: pos.tithi_in_paksha,
            at: sample.at,
        }])
    });

    found.sort_by(|a, b| a.date.cmp(&b.date).then(a.at.total_cmp(&b.at)));
    let mut seen = HashSet::new();
    found.retain(|d| seen.insert((d.date, d.tithi_index, d.paksha)));
    info!(year, count = found.len(), "tithi date scan complete");
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::LinearProvider;

    fn greenwich() -> GeoLocation {
        GeoLocation::at_sea_level(51.48, 0.0)
    }

    #[test]
    fn purnimas_of_2024() {
        let p = LinearProvider::spring_2024();
        let ctx = EphemerisContext::default();
        let dates =
            tithi_dates(&p, &ctx, 2024, &greenwich(), &[14], &ScanConfig::default()).unwrap();
        assert!((11..=13).contains(&dates.len()), "{}", dates.len());
        assert!(dates.iter().all(|d| d.tithi == Tithi::Purnima && d.paksha == Paksha::Shukla));
        assert!(dates.windows(2).all(|w| w[0].date < w[1].date));
        let holi = NaiveDate::from_ymd_opt(2024, 3, 25).unwrap();
        assert!(dates.iter().any(|d| d.date == holi));
    }

    #[test]
    fn sequential_and_parallel_agree() {
        let p = LinearProvider::spring_2024();
        let ctx = EphemerisContext::default();
        let par = tithi_dates(&p, &ctx, 2024, &greenwich(), &[0, 10, 25], &ScanConfig::default())
            .unwrap();
        let seq_cfg = ScanConfig {
            parallel: false,
            ..ScanConfig::default()
        };
        let seq = tithi_dates(&p, &ctx, 2024, &greenwich(), &[0, 10, 25], &seq_cfg).unwrap();
        assert_eq!(par, seq);
    }

    #[test]
    fn bad_day_does_not_blank_the_year() {
        let mut p = LinearProvider::spring_2024();
        let a = JulianDay::from_ymd_hms(2024, 6, 1, 0, 0, 0.0).unwrap();
        p.fail_window = Some((a, a.add_days(10.0)));
        let ctx = EphemerisContext::default();
        let dates =
            tithi_dates(&p, &ctx, 2024, &greenwich(), &[14], &ScanConfig::default()).unwrap();
        assert!(dates.len() >= 10);
        assert!(dates.iter().all(|d| d.at < a || d.at > a.add_days(10.0)));
    }

    #[test]
    fn kshaya_tithi_has_no_date() {
        let p = LinearProvider::kshaya_pratipada_2024();
        let ctx = EphemerisContext::default();
        let cfg = ScanConfig::default();
        let apr8 = NaiveDate::from_ymd_opt(2024, 4, 8).unwrap();
        let apr9 = NaiveDate::from_ymd_opt(2024, 4, 9).unwrap();

        let pratipada = tithi_dates(&p, &ctx, 2024, &greenwich(), &[0], &cfg).unwrap();
        assert!(pratipada.iter().all(|d| d.date != apr8 && d.date != apr9));
        assert!(pratipada.iter().all(|d| d.tithi_index == 0 && d.tithi_in_paksha == 1));

        let around = tithi_dates(&p, &ctx, 2024, &greenwich(), &[29, 1], &cfg).unwrap();
        let days: Vec<_> = around
            .iter()
            .filter(|d| d.date == apr8 || d.date == apr9)
            .map(|d| (d.date, d.tithi_index))
            .collect();
        assert_eq!(days, vec![(apr8, 29), (apr9, 1)]);
    }

    #[test]
    fn purnima_is_fourteen_but_fifteenth_of_paksha() {
        let p = LinearProvider::spring_2024();
        let ctx = EphemerisContext::default();
        let cfg = ScanConfig::default();
        let full = tithi_dates(&p, &ctx, 2024, &greenwich(), &[14], &cfg).unwrap();
        assert!(full.iter().all(|d| d.tithi == Tithi::Purnima && d.tithi_in_paksha == 15));
        let new = tithi_dates(&p, &ctx, 2024, &greenwich(), &[29], &cfg).unwrap();
        assert!(new.iter().all(|d| d.tithi == Tithi::Amavasya && d.tithi_in_paksha == 15));
        // The 1-based paksha number selects Krishna Pratipada, not Purnima.
        let fifteen = tithi_dates(&p, &ctx, 2024, &greenwich(), &[15], &cfg).unwrap();
        assert!(fifteen.iter().all(|d| d.paksha == Paksha::Krishna && d.tithi_in_paksha == 1));
        assert!(!full.is_empty() && !new.is_empty() && !fifteen.is_empty());
    }

    #[test]
    fn rejects_out_of_range_index() {
        let p = LinearProvider::spring_2024();
        let ctx = EphemerisContext::default();
        let r = tithi_dates(&p, &ctx, 2024, &greenwich(), &[30], &ScanConfig::default());
        assert!(matches!(r, Err(SearchError::Vedic(_))));
    }
}
