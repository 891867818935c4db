//! Almanac configuration, read from TOML.
//!
//! ```toml
//! [frame]
//! ayanamsha = "lahiri"
//! nutation = false
//!
//! [search]
//! max_iterations = 50
//! convergence_days = 1e-8
//!
//! [scan]
//! parallel = true
//! hour_step_hours = 1.0
//! epoch_window_start = [2, 15]
//! epoch_window_end = [4, 30]
//! ```
//!
//! Every table and key is optional; unknown keys are rejected.

use std::path::Path;

use kaal_search::{EphemerisContext, LocatorConfig, ScanConfig};
use kaal_vedic_base::AyanamshaSystem;
use serde::Deserialize;

use crate::error::AlmanacError;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlmanacConfig {
    #[serde(default)]
    pub frame: FrameToml,
    #[serde(default)]
    pub search: SearchToml,
    #[serde(default)]
    pub scan: ScanToml,
}

/// Sidereal frame handed to every provider call.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrameToml {
    #[serde(default)]
    pub ayanamsha: AyanamshaSystem,
    #[serde(default)]
    pub nutation: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchToml {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    #[serde(default = "default_convergence_days")]
    pub convergence_days: f64,
}

impl Default for SearchToml {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            convergence_days: default_convergence_days(),
        }
    }
}

fn default_max_iterations() -> u32 {
    LocatorConfig::default().max_iterations
}
fn default_convergence_days() -> f64 {
    LocatorConfig::default().convergence_days
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanToml {
    #[serde(default = "default_true")]
    pub parallel: bool,
    #[serde(default = "default_hour_step")]
    pub hour_step_hours: f64,
    /// `[month, day]` of the first day probed for the New Year anchor.
    #[serde(default = "default_epoch_window_start")]
    pub epoch_window_start: (u32, u32),
    #[serde(default = "default_epoch_window_end")]
    pub epoch_window_end: (u32, u32),
}

impl Default for ScanToml {
    fn default() -> Self {
        Self {
            parallel: true,
            hour_step_hours: default_hour_step(),
            epoch_window_start: default_epoch_window_start(),
            epoch_window_end: default_epoch_window_end(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_hour_step() -> f64 {
    ScanConfig::default().hour_step_hours
}
fn default_epoch_window_start() -> (u32, u32) {
    ScanConfig::default().epoch_window_start
}
fn default_epoch_window_end() -> (u32, u32) {
    ScanConfig::default().epoch_window_end
}

impl AlmanacConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, AlmanacError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, AlmanacError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AlmanacError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), AlmanacError> {
        self.scan_config()
            .validate()
            .map_err(|msg| AlmanacError::Config(msg.to_string()))
    }

    pub fn context(&self) -> EphemerisContext {
        EphemerisContext::new(self.frame.ayanamsha, self.frame.nutation)
    }

    pub fn locator_config(&self) -> LocatorConfig {
        LocatorConfig {
            max_iterations: self.search.max_iterations,
            convergence_days: self.search.convergence_days,
        }
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            parallel: self.scan.parallel,
            hour_step_hours: self.scan.hour_step_hours,
            epoch_window_start: self.scan.epoch_window_start,
            epoch_window_end: self.scan.epoch_window_end,
            locator: self.locator_config(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = AlmanacConfig::from_toml_str("").unwrap();
        assert_eq!(config, AlmanacConfig::default());
        assert_eq!(config.scan_config(), ScanConfig::default());
        assert_eq!(config.context(), EphemerisContext::default());
    }

    #[test]
    fn partial_tables_keep_defaults() {
        let config = AlmanacConfig::from_toml_str(
            r#"
            [frame]
            ayanamsha = "kp"
            nutation = true

            [scan]
            parallel = false
            epoch_window_start = [3, 1]
            "#,
        )
        .unwrap();
        assert_eq!(config.context().ayanamsha, AyanamshaSystem::KP);
        assert!(config.context().use_nutation);
        let scan = config.scan_config();
        assert!(!scan.parallel);
        assert_eq!(scan.epoch_window_start, (3, 1));
        assert_eq!(scan.epoch_window_end, ScanConfig::default().epoch_window_end);
        assert_eq!(scan.locator, LocatorConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = AlmanacConfig::from_toml_str("[scan]\nthreads = 4\n").unwrap_err();
        assert!(matches!(err, AlmanacError::Config(_)));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(AlmanacConfig::from_toml_str("[search]\nmax_iterations = 0\n").is_err());
        assert!(AlmanacConfig::from_toml_str("[scan]\nhour_step_hours = -1.0\n").is_err());
        assert!(
            AlmanacConfig::from_toml_str("[scan]\nepoch_window_start = [5, 1]\n").is_err()
        );
    }
}
