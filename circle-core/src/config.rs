//! Global circles configuration.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{CircleError, CircleResult};
use crate::schedule::DEFAULT_DURATION_MINUTES;

static DEFAULT_ROSTER_PATH: &str = "~/circles/leaders.toml";
static DEFAULT_DURATION: &str = "60m";

fn default_roster_path() -> PathBuf {
    PathBuf::from(DEFAULT_ROSTER_PATH)
}

fn default_duration() -> String {
    DEFAULT_DURATION.to_string()
}

/// Global configuration at ~/.config/circles/config.toml
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CirclesConfig {
    #[serde(default = "default_roster_path")]
    pub roster_path: PathBuf,

    /// Meeting length for leaders without their own, e.g. "60m" or "1h 30m".
    #[serde(default = "default_duration")]
    pub default_duration: String,

    /// IANA name of the organization's time zone. Uses the system zone
    /// when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Default for CirclesConfig {
    fn default() -> Self {
        CirclesConfig {
            roster_path: default_roster_path(),
            default_duration: default_duration(),
            timezone: None,
        }
    }
}

impl CirclesConfig {
    pub fn config_path() -> CircleResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CircleError::Config("Could not determine config directory".into()))?
            .join("circles");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, creating a commented default file on first run.
    pub fn load() -> CircleResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load config from a specific file. A missing file gives the defaults.
    pub fn load_from(path: &Path) -> CircleResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| CircleError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CircleError::Config(e.to_string()))
    }

    /// Roster location with `~` expanded.
    pub fn roster_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.roster_path.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn default_duration_minutes(&self) -> CircleResult<i64> {
        let duration = humantime::parse_duration(&self.default_duration).map_err(|e| {
            CircleError::Config(format!(
                "Invalid default_duration '{}': {}",
                self.default_duration, e
            ))
        })?;

        let minutes = (duration.as_secs() / 60) as i64;
        if minutes == 0 {
            return Err(CircleError::Config(format!(
                "default_duration '{}' is shorter than a minute",
                self.default_duration
            )));
        }
        Ok(minutes)
    }

    /// The organization's time zone: configured, else the system's, else UTC.
    pub fn timezone(&self) -> CircleResult<Tz> {
        if let Some(name) = &self.timezone {
            return name
                .parse::<Tz>()
                .map_err(|_| CircleError::Config(format!("Unknown timezone '{}'", name)));
        }

        let system = iana_time_zone::get_timezone()
            .ok()
            .and_then(|name| name.parse::<Tz>().ok());
        if system.is_none() {
            tracing::warn!("could not detect system time zone, using UTC");
        }
        Ok(system.unwrap_or(Tz::UTC))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CircleResult<()> {
        let contents = format!(
            "\
# circles configuration

# Where the leader roster lives:
# roster_path = \"{}\"

# Meeting length for leaders without their own (default {} minutes):
# default_duration = \"{}\"

# Organization time zone (defaults to the system time zone):
# timezone = \"America/Chicago\"
",
            DEFAULT_ROSTER_PATH, DEFAULT_DURATION_MINUTES, DEFAULT_DURATION
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CircleError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CircleError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
