//! 2024 almanac for New Delhi through the facade.

use kaal_rs::*;

fn almanac() -> Almanac {
    Almanac::analytic(&AlmanacConfig::default()).unwrap()
}

fn delhi() -> GeoLocation {
    GeoLocation::at_sea_level(28.6139, 77.2090)
}

fn jd(y: i32, m: u32, d: u32, h: u32, min: u32) -> JulianDay {
    JulianDay::from_ymd_hms(y, m, d, h, min, 0.0).unwrap()
}

#[test]
fn purnima_of_phalguna() {
    let rec = almanac().get_panchang(jd(2024, 3, 25, 6, 0), &delhi()).unwrap();
    assert_eq!(rec.tithi.tithi_index, 14);
    assert_eq!(rec.tithi.tithi, Tithi::Purnima);
    assert_eq!(rec.tithi.paksha, Paksha::Shukla);
    assert_eq!(rec.lunar_month.amanta, Masa::Phalguna);
    assert_eq!(rec.lunar_month.amanta_index, 11);
    assert_eq!(rec.vaar.vaar, Vaar::Somvaar);
}

#[test]
fn holi_falls_on_purnima_sunrise() {
    let events = almanac().get_festivals(2024, &delhi()).unwrap();
    let holi = events.iter().find(|e| e.name.starts_with("Holi")).unwrap();
    assert_eq!(holi.date.to_string(), "2024-03-25");
    assert!(events.windows(2).all(|w| w[0].date <= w[1].date));
}

#[test]
fn twelve_ordered_sankrantis() {
    let events = almanac().get_sankranti_list(2024, &delhi()).unwrap();
    assert_eq!(events.len(), 12);
    assert!(events.windows(2).all(|w| w[0].moment < w[1].moment));
    let makar = events
        .iter()
        .find(|e| e.name == "Capricorn Sankranti")
        .unwrap();
    assert!(makar.moment.days_since(jd(2024, 1, 15, 0, 0)).abs() <= 1.0);
}

#[test]
fn no_eclipse_is_seen_from_delhi_in_2024() {
    let events = almanac().get_eclipses(2024, &delhi()).unwrap();
    assert!(events.is_empty(), "{events:?}");
}

#[test]
fn total_lunar_eclipse_of_september_2025() {
    let events = almanac().get_eclipses(2025, &delhi()).unwrap();
    assert_eq!(events.len(), 1, "{events:?}");
    let e = &events[0];
    assert_eq!((e.body, e.kind), (EclipseBody::Lunar, EclipseKind::Total));
    assert_eq!(e.date.to_string(), "2025-09-07");
    assert_eq!(e.date, e.peak.utc_date().unwrap());
    assert!(e.magnitude > 1.0);
    assert_eq!(e.obscuration, None);
}

#[test]
fn epoch_turns_at_chaitra_shukla_pratipada() {
    let a = almanac();
    let summer = a.get_calendar_epoch(jd(2024, 6, 1, 6, 0), &delhi()).unwrap();
    assert_eq!(summer.vikram_samvat, Some(2081));
    assert_eq!(summer.saka_year, Some(1946));
    assert_eq!(summer.samvatsara, Some(Samvatsara::Krodhi));

    let winter = a.get_calendar_epoch(jd(2024, 1, 15, 6, 0), &delhi()).unwrap();
    assert_eq!(winter.vikram_samvat, Some(2080));
    assert_eq!(winter.saka_year, Some(1945));
    assert_eq!(winter.samvatsara, Some(Samvatsara::Shobhakrut));
}

#[test]
fn purnima_dates_are_monthly() {
    let dates = almanac().get_tithi_dates(2024, &delhi(), &[14]).unwrap();
    assert!((11..=14).contains(&dates.len()), "{}", dates.len());
    assert!(dates.iter().all(|d| d.tithi == Tithi::Purnima));
    assert!(dates.iter().any(|d| d.date.to_string() == "2024-03-25"));
}

#[test]
fn hora_day_starts_with_vaar_lord() {
    let slots = almanac()
        .get_hora_schedule_at(jd(2024, 3, 25, 6, 0), &delhi())
        .unwrap();
    assert_eq!(slots.len(), 24);
    assert_eq!(slots[0].ruler, Graha::Chandra);
    assert!(slots.windows(2).all(|w| w[0].end == w[1].start));
}

#[test]
fn repeated_queries_agree() {
    let a = almanac();
    let at = jd(2024, 10, 2, 12, 0);
    assert_eq!(
        a.get_panchang(at, &delhi()).unwrap(),
        a.get_panchang(at, &delhi()).unwrap()
    );
    assert_eq!(
        a.get_yoga_windows(2024, Some(3), &delhi()).unwrap(),
        a.get_yoga_windows(2024, Some(3), &delhi()).unwrap()
    );
}

#[test]
fn record_serializes_utc_instants() {
    let rec = almanac().get_panchang(jd(2024, 3, 25, 6, 0), &delhi()).unwrap();
    let value = serde_json::to_value(rec).unwrap();
    let instant = value["instant"].as_str().unwrap();
    assert!(instant.starts_with("2024-03-25T06:00:00"));
    assert!(instant.ends_with('Z'));
}
