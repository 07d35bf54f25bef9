use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::calendar::{DateKey, SupportedRange, WeekStart};
use crate::provider::{Error, ErrorKind, Result};

const CONFIG_PATH_ENV_VAR: &str = "ALMANAC_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let config_env = env::var(CONFIG_PATH_ENV_VAR).ok().map(PathBuf::from);

    // honours XDG_CONFIG_HOME
    let config_xdg = dirs::config_dir().map(|dir| dir.join("almanac").join("config.toml"));

    let home_config = dirs::home_dir().map(|home| home.join(".almanac.toml"));

    config_env
        .into_iter()
        .chain(config_xdg)
        .chain(home_config)
        .collect()
}

pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path);
    }

    match find_configfile_locations()
        .into_iter()
        .find(|location| location.is_file())
    {
        Some(location) => Config::from_file(&location),
        None => {
            log::info!("No configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub today_char: Option<char>,
    pub focus_char: Option<char>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            today_char: Some('*'),
            focus_char: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    #[serde(rename = "tick_rate")]
    pub tick_rate_ms: u64,
    pub week_start: WeekStart,
    pub min_date: DateKey,
    pub max_date: DateKey,
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Config {
        let range = SupportedRange::default();

        Config {
            tick_rate_ms: 500,
            week_start: WeekStart::default(),
            min_date: range.min(),
            max_date: range.max(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config> {
        log::info!("Loading configuration from '{}'", path.display());

        let content = fs::read_to_string(path).map_err(|err| {
            let msg = format!("Could not read '{}': {}", path.display(), err);
            Error::from(err).with_msg(&msg)
        })?;

        content.parse()
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn supported_range(&self) -> SupportedRange {
        SupportedRange::new(self.min_date, self.max_date).unwrap_or_else(|err| {
            log::warn!("{}, falling back to the default range", err);
            SupportedRange::default()
        })
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Config> {
        let config: Config = toml::from_str(s)?;

        if config.tick_rate_ms == 0 {
            return Err(Error::new(
                ErrorKind::ConfigParse,
                "tick_rate must be at least 1 millisecond",
            ));
        }
        SupportedRange::new(config.min_date, config.max_date)?;

        Ok(config)
    }
}
