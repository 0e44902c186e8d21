//! Configuration file support for Zonecraft.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/zonecraft/config.toml`.

use crate::export::ExportOptions;
use crate::format::parse_pace;
use crate::resolve::{check_position, TargetResolution, TargetStyle};
use crate::safeguard::default_start_time;
use crate::schema::PlanDefaults;
use crate::{Error, Result, Sport, ThresholdProfile};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub athlete: AthleteConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub plan: PlanConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Athlete thresholds; either may be left unset
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct AthleteConfig {
    /// Threshold pace as `m:ss` per kilometre
    #[serde(default)]
    pub threshold_pace: Option<String>,

    #[serde(default)]
    pub lthr_bpm: Option<u32>,
}

/// Calendar export configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Time of day used when a plan only carries a date (`HH:MM:SS`)
    #[serde(default = "default_start_time_string")]
    pub default_start_time: String,

    #[serde(default = "default_append_description")]
    pub append_description: bool,

    #[serde(default)]
    pub target_style: TargetStyle,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_start_time: default_start_time_string(),
            append_description: default_append_description(),
            target_style: TargetStyle::default(),
        }
    }
}

/// Inbound plan defaults
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanConfig {
    #[serde(default = "default_zone_position")]
    pub default_zone_position: f64,

    #[serde(default = "default_sport")]
    pub default_sport: Sport,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            default_zone_position: default_zone_position(),
            default_sport: default_sport(),
        }
    }
}

/// Logging configuration for hosts calling [`crate::logging::init`]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level for engine events (error, warn, info, debug, trace, off)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".into()
}

fn default_start_time_string() -> String {
    "09:00:00".into()
}

fn default_append_description() -> bool {
    true
}

fn default_zone_position() -> f64 {
    0.5
}

fn default_sport() -> Sport {
    Sport::Run
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("zonecraft").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Athlete profile, present only when both thresholds are configured
    pub fn profile(&self) -> Result<Option<ThresholdProfile>> {
        let (Some(pace), Some(lthr)) = (&self.athlete.threshold_pace, self.athlete.lthr_bpm)
        else {
            tracing::debug!("Athlete thresholds incomplete, no profile available");
            return Ok(None);
        };

        let profile = ThresholdProfile::new(parse_pace(pace)?, lthr);
        // Surface bad thresholds at load time rather than at first render
        profile.pace_zones()?;
        profile.hr_zones()?;
        Ok(Some(profile))
    }

    /// Time of day applied to date-only plan starts
    pub fn start_time(&self) -> Result<NaiveTime> {
        let raw = self.export.default_start_time.trim();
        if raw.is_empty() {
            return Ok(default_start_time());
        }
        ["%H:%M:%S", "%H:%M"]
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
            .ok_or_else(|| {
                Error::Config(format!("Invalid default_start_time {:?}", raw))
            })
    }

    pub fn plan_defaults(&self) -> Result<PlanDefaults> {
        check_position(self.plan.default_zone_position).map_err(|e| {
            Error::Config(format!("Invalid default_zone_position: {}", e))
        })?;
        Ok(PlanDefaults {
            zone_position: self.plan.default_zone_position,
            sport: self.plan.default_sport,
        })
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            append_description: self.export.append_description,
        }
    }

    /// Resolution for the configured target style and current thresholds
    pub fn target_resolution(&self) -> Result<TargetResolution> {
        let profile = self.profile()?;
        TargetResolution::from_style(self.export.target_style, profile.as_ref())
    }
}
