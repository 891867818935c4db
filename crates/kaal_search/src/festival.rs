//! Tithi-keyed festivals.
//!
//! A festival is a (masa, paksha, tithi) triple tested against each day's
//! sunrise. Months are amanta. A rule without a masa recurs every lunar
//! month, and an optional Gregorian-month filter narrows rules whose lunar
//! date alone is ambiguous.

use chrono::{Datelike, NaiveDate};
use kaal_time::{DaySequence, JulianDay};
use kaal_vedic_base::{GeoLocation, Masa, Paksha, Tithi};
use std::collections::HashSet;
use tracing::info;

use crate::error::SearchError;
use crate::provider::{EphemerisContext, EphemerisProvider};
use crate::scan::{DaySnapshot, ScanConfig, day_snapshot, scan_days};

/// One row of the festival table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FestivalRule {
    pub name: &'static str,
    /// Amanta month, or `None` for every month.
    pub masa: Option<Masa>,
    pub paksha: Paksha,
    /// 1..=15 within the paksha.
    pub tithi_in_paksha: u8,
    /// Gregorian months (1..=12) the date must fall in.
    pub gregorian_months: Option<&'static [u32]>,
}

const fn rule(name: &'static str, masa: Masa, paksha: Paksha, tithi_in_paksha: u8) -> FestivalRule {
    FestivalRule {
        name,
        masa: Some(masa),
        paksha,
        tithi_in_paksha,
        gregorian_months: None,
    }
}

pub const FESTIVAL_RULES: &[FestivalRule] = &[
    rule("Vasant Panchami", Masa::Magha, Paksha::Shukla, 5),
    rule("Maha Shivaratri", Masa::Magha, Paksha::Krishna, 14),
    rule(
        "Holi (Holika Dahan is previous Purnima)",
        Masa::Phalguna,
        Paksha::Shukla,
        15,
    ),
    rule("Ugadi / Gudi Padwa", Masa::Chaitra, Paksha::Shukla, 1),
    rule("Rama Navami", Masa::Chaitra, Paksha::Shukla, 9),
    rule("Hanuman Jayanti", Masa::Chaitra, Paksha::Shukla, 15),
    rule("Akshaya Tritiya", Masa::Vaishakha, Paksha::Shukla, 3),
    rule("Buddha Purnima", Masa::Vaishakha, Paksha::Shukla, 15),
    rule("Guru Purnima", Masa::Ashadha, Paksha::Shukla, 15),
    rule("Raksha Bandhan", Masa::Shravana, Paksha::Shukla, 15),
    rule("Krishna Janmashtami", Masa::Shravana, Paksha::Krishna, 8),
    rule("Ganesh Chaturthi", Masa::Bhadrapada, Paksha::Shukla, 4),
    rule("Sharad Navaratri begins", Masa::Ashvina, Paksha::Shukla, 1),
    rule("Dussehra", Masa::Ashvina, Paksha::Shukla, 10),
    rule("Sharad Purnima", Masa::Ashvina, Paksha::Shukla, 15),
    rule("Karva Chauth", Masa::Ashvina, Paksha::Krishna, 4),
    rule("Dhanteras", Masa::Ashvina, Paksha::Krishna, 13),
    rule("Diwali (Lakshmi Puja)", Masa::Ashvina, Paksha::Krishna, 15),
    rule("Govardhan Puja", Masa::Kartika, Paksha::Shukla, 1),
    rule("Bhai Dooj", Masa::Kartika, Paksha::Shukla, 2),
    rule("Kartik Purnima", Masa::Kartika, Paksha::Shukla, 15),
    FestivalRule {
        name: "Gita Jayanti",
        masa: Some(Masa::Margashirsha),
        paksha: Paksha::Shukla,
        tithi_in_paksha: 11,
        gregorian_months: Some(&[11, 12]),
    },
    FestivalRule {
        name: "Shukla Ekadashi",
        masa: None,
        paksha: Paksha::Shukla,
        tithi_in_paksha: 11,
        gregorian_months: None,
    },
    FestivalRule {
        name: "Krishna Ekadashi",
        masa: None,
        paksha: Paksha::Krishna,
        tithi_in_paksha: 11,
        gregorian_months: None,
    },
];

impl FestivalRule {
    /// Whether the day described by `snap` satisfies this rule.
    ///
    /// Rules naming a masa never match inside an adhika month.
    pub fn matches(&self, snap: &DaySnapshot) -> bool {
        if snap.tithi.paksha != self.paksha || snap.tithi.tithi_in_paksha != self.tithi_in_paksha
        {
            return false;
        }
        if let Some(masa) = self.masa {
            if snap.month.adhika || snap.month.amanta != masa {
                return false;
            }
        }
        self.gregorian_months
            .is_none_or(|months| months.contains(&snap.sample.date.month()))
    }
}

/// A festival falling on a civil date.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FestivalEvent {
    pub name: &'static str,
    pub date: NaiveDate,
    /// Sunrise (or local noon) the rule was tested at.
    pub at: JulianDay,
    pub masa: Masa,
    pub paksha: Paksha,
    pub tithi: Tithi,
}

/// Festivals of the built-in table for `year` at `location`.
pub fn festivals<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    year: i32,
    location: &GeoLocation,
    config: &ScanConfig,
) -> Result<Vec<FestivalEvent>, SearchError> {
    festivals_with_rules(provider, ctx, year, location, FESTIVAL_RULES, config)
}

/// Festivals of `rules` for `year` at `location`, sorted by date and
/// deduplicated on (name, date).
pub fn festivals_with_rules<P: EphemerisProvider + ?Sized>(
    provider: &P,
    ctx: &EphemerisContext,
    year: i32,
    location: &GeoLocation,
    rules: &[FestivalRule],
    config: &ScanConfig,
) -> Result<Vec<FestivalEvent>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    location.validate()?;
    let days = DaySequence::for_year(year)?;

    let mut events = scan_days(&days, config, |step| {
        let snap = day_snapshot(provider, ctx, step, location, &config.locator)?;
        Ok(rules
            .iter()
            .filter(|r| r.matches(&snap))
            .map(|r| FestivalEvent {
                name: r.name,
                date: snap.sample.date,
                at: snap.sample.at,
                masa: snap.month.amanta,
                paksha: snap.tithi.paksha,
                tithi: snap.tithi.tithi,
            })
            .collect())
    });

    events.sort_by(|a, b| a.date.cmp(&b.date).then(a.at.total_cmp(&b.at)));
    let mut seen = HashSet::new();
    events.retain(|e| seen.insert((e.name, e.date)));
    info!(year, count = events.len(), "festival scan complete");
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::LinearProvider;

    fn delhi() -> GeoLocation {
        GeoLocation::at_sea_level(28.6139, 77.2090)
    }

    #[test]
    fn table_is_well_formed() {
        assert!(FESTIVAL_RULES.iter().all(|r| (1..=15).contains(&r.tithi_in_paksha)));
        let names: HashSet<_> = FESTIVAL_RULES.iter().map(|r| r.name).collect();
        assert_eq!(names.len(), FESTIVAL_RULES.len());
    }

    #[test]
    fn holi_2024_at_delhi() {
        let p = LinearProvider::spring_2024();
        let ctx = EphemerisContext::default();
        let events = festivals(&p, &ctx, 2024, &delhi(), &ScanConfig::default()).unwrap();
        let holi = events
            .iter()
            .find(|e| e.name.starts_with("Holi"))
            .expect("Holi present");
        assert_eq!(holi.date, NaiveDate::from_ymd_opt(2024, 3, 25).unwrap());
        assert_eq!(holi.masa, Masa::Phalguna);
        assert_eq!(holi.tithi, Tithi::Purnima);
    }

    #[test]
    fn output_is_sorted_and_unique() {
        let p = LinearProvider::spring_2024();
        let ctx = EphemerisContext::default();
        let events = festivals(&p, &ctx, 2024, &delhi(), &ScanConfig::default()).unwrap();
        assert!(events.windows(2).all(|w| w[0].date <= w[1].date));
        let keys: HashSet<_> = events.iter().map(|e| (e.name, e.date)).collect();
        assert_eq!(keys.len(), events.len());
        let ekadashis = events.iter().filter(|e| e.name.ends_with("Ekadashi")).count();
        assert!((20..=26).contains(&ekadashis), "{ekadashis}");
    }

    #[test]
    fn gregorian_filter_narrows_monthless_rule() {
        let only_january = [FestivalRule {
            name: "January Purnima",
            masa: None,
            paksha: Paksha::Shukla,
            tithi_in_paksha: 15,
            gregorian_months: Some(&[1]),
        }];
        let p = LinearProvider::spring_2024();
        let ctx = EphemerisContext::default();
        let events =
            festivals_with_rules(&p, &ctx, 2024, &delhi(), &only_january, &ScanConfig::default())
                .unwrap();
        assert!(!events.is_empty());
        assert!(events.iter().all(|e| e.date.month() == 1));
    }
}
