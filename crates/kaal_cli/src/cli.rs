use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use kaal_rs::{AyanamshaSystem, GeoLocation};

/// Hindu panchang almanac.
#[derive(Parser)]
#[command(name = "kaal", version, about = "Hindu panchang almanac")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured ayanamsha (lahiri, kp, raman, ...).
    #[arg(long, global = true)]
    pub ayanamsha: Option<AyanamshaSystem>,

    /// Apply nutation in longitude.
    #[arg(long, global = true)]
    pub nutation: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Panchang at an instant
    Panchang {
        /// UTC instant (YYYY-MM-DDThh:mm:ssZ or YYYY-MM-DD)
        #[arg(long)]
        date: String,
        #[command(flatten)]
        location: LocationArgs,
    },
    /// Vikram Samvat, Saka year and Samvatsara at an instant
    Epoch {
        /// UTC instant (YYYY-MM-DDThh:mm:ssZ or YYYY-MM-DD)
        #[arg(long)]
        date: String,
        #[command(flatten)]
        location: LocationArgs,
    },
    /// Solar ingresses of a year
    Sankranti {
        #[arg(long)]
        year: i32,
        #[command(flatten)]
        location: LocationArgs,
    },
    /// Eclipses of a year visible from a location
    Eclipses {
        #[arg(long)]
        year: i32,
        #[command(flatten)]
        location: LocationArgs,
    },
    /// Festivals of a year
    Festivals {
        #[arg(long)]
        year: i32,
        #[command(flatten)]
        location: LocationArgs,
    },
    /// Dates whose sunrise tithi is one of the given indices
    TithiDates {
        #[arg(long)]
        year: i32,
        /// Comma-separated 0-based tithi indices (0..30; 14 is Purnima)
        #[arg(long = "tithi", value_delimiter = ',', required = true)]
        tithis: Vec<u8>,
        #[command(flatten)]
        location: LocationArgs,
    },
    /// Amrita Siddhi and Mrityu yoga windows
    YogaWindows {
        #[arg(long)]
        year: i32,
        /// Restrict to one Gregorian month (1-12)
        #[arg(long)]
        month: Option<u32>,
        #[command(flatten)]
        location: LocationArgs,
    },
    /// Hora schedule of the Vedic day containing an instant
    Hora {
        /// UTC instant (YYYY-MM-DDThh:mm:ssZ or YYYY-MM-DD)
        #[arg(long)]
        date: String,
        #[command(flatten)]
        location: LocationArgs,
    },
}

#[derive(Args, Debug, Clone, Copy)]
pub struct LocationArgs {
    /// Latitude in degrees (north positive)
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,
    /// Longitude in degrees (east positive)
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,
    /// Altitude in meters
    #[arg(long, default_value = "0")]
    pub alt: f64,
}

impl LocationArgs {
    pub fn location(&self) -> GeoLocation {
        GeoLocation::new(self.lat, self.lon, self.alt)
    }
}
