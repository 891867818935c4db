//! Subcommand handlers. Every command prints one JSON document on stdout.

use std::io::Write;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use kaal_rs::{Almanac, JulianDay};
use serde::Serialize;
use tracing::debug;

use crate::cli::Command;

pub fn run(almanac: &Almanac, command: Command) -> Result<()> {
    match command {
        Command::Panchang { date, location } => {
            let at = parse_utc(&date)?;
            print_json(&almanac.get_panchang(at, &location.location())?)
        }
        Command::Epoch { date, location } => {
            let at = parse_utc(&date)?;
            print_json(&almanac.get_calendar_epoch(at, &location.location())?)
        }
        Command::Sankranti { year, location } => {
            print_json(&almanac.get_sankranti_list(year, &location.location())?)
        }
        Command::Eclipses { year, location } => {
            print_json(&almanac.get_eclipses(year, &location.location())?)
        }
        Command::Festivals { year, location } => {
            print_json(&almanac.get_festivals(year, &location.location())?)
        }
        Command::TithiDates {
            year,
            tithis,
            location,
        } => {
            if let Some(bad) = tithis.iter().find(|&&t| t >= 30) {
                bail!("tithi index {bad} outside 0..30");
            }
            print_json(&almanac.get_tithi_dates(year, &location.location(), &tithis)?)
        }
        Command::YogaWindows {
            year,
            month,
            location,
        } => print_json(&almanac.get_yoga_windows(year, month, &location.location())?),
        Command::Hora { date, location } => {
            let at = parse_utc(&date)?;
            print_json(&almanac.get_hora_schedule_at(at, &location.location())?)
        }
    }
}

/// RFC 3339 instant, or a bare date taken as 00:00 UTC.
fn parse_utc(s: &str) -> Result<JulianDay> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(JulianDay::from_utc(&dt.with_timezone(&Utc)));
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DDThh:mm:ssZ"))?;
    Ok(JulianDay::from_date(date))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).context("writing JSON")?;
    writeln!(out)?;
    debug!("output written");
    Ok(())
}
