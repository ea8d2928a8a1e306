use chrono::NaiveDate;
use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::provider::{self, load_events_file, Error, ErrorKind, Event, EventList};
use crate::transition::AnimationSettings;

const CONFIG_PATH_ENV_VAR: &str = "CARACAL_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> io::Result<Vec<PathBuf>> {
    let config_env = env::var(CONFIG_PATH_ENV_VAR).ok().map(PathBuf::from);

    let home = dirs::home_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "Unable to find home directory"))?;

    let home_config = home.join(".caracal.toml");

    let config_xdg = if let Ok(dir) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(dir)
    } else {
        dirs::config_dir().unwrap_or_else(|| home.join(".config"))
    }
    .join("caracal")
    .join("config.toml");

    let mut locations = vec![config_xdg, home_config];

    if let Some(path) = config_env {
        locations.insert(0, path);
    }

    Ok(locations)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub seed_month: Option<NaiveDate>,
    pub selected: Option<NaiveDate>,
    pub events_file: Option<PathBuf>,
    pub events: Vec<Event>,
    pub frame_rate_ms: u64,
    pub animation: AnimationSettings,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            seed_month: None,
            selected: None,
            events_file: None,
            events: Vec::new(),
            frame_rate_ms: 16,
            animation: AnimationSettings::default(),
        }
    }
}

impl Config {
    pub fn parse(content: &str) -> provider::Result<Config> {
        let mut config: Config = toml::from_str(content)?;
        if config.frame_rate_ms == 0 {
            log::warn!("frame_rate_ms must be positive, using 16");
            config.frame_rate_ms = 16;
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> provider::Result<Config> {
        let content = fs::read_to_string(path)?;
        let mut config = Config::parse(&content).map_err(|e| {
            let msg = format!("{}: {}", path.display(), e.message.as_deref().unwrap_or(""));
            Error::new(ErrorKind::ConfigParse, &msg)
        })?;

        // Relative event files are resolved next to the config file
        if let (Some(events_file), Some(dir)) = (config.events_file.as_mut(), path.parent()) {
            if events_file.is_relative() {
                let resolved = dir.join(&*events_file);
                *events_file = resolved;
            }
        }

        Ok(config)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_rate_ms)
    }

    pub fn event_list(&self) -> provider::Result<EventList> {
        if let Some(path) = &self.events_file {
            load_events_file(path)
        } else if !self.events.is_empty() {
            Ok(EventList::new(self.events.clone()))
        } else {
            Ok(EventList::showcase())
        }
    }
}

pub fn load_suitable_config(path: Option<&Path>) -> provider::Result<Config> {
    if let Some(path) = path {
        log::info!("Loading config from {}", path.display());
        return Config::from_file(path);
    }

    let locations = match find_configfile_locations() {
        Ok(locations) => locations,
        Err(e) => {
            log::warn!("{}", e);
            Vec::new()
        }
    };

    if let Some(location) = locations.iter().find(|path| path.is_file()) {
        log::info!("Loading config from {}", location.display());
        return Config::from_file(location);
    }

    log::info!("No config file found, using defaults");
    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.seed_month, None);
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
        assert_eq!(config.animation, AnimationSettings::default());
        assert_eq!(config.event_list().unwrap(), EventList::showcase());
    }

    #[test]
    fn full_config() {
        let config = Config::parse(
            r##"
            seed_month = "2026-02-01"
            selected = "2026-02-12"
            frame_rate_ms = 33

            [animation]
            stagger_ms = 35

            [[events]]
            id = "launch"
            date = "2026-02-20"
            icon = "rocket.svg"
            color = "#000"
            "##,
        )
        .unwrap();

        assert_eq!(config.seed_month, NaiveDate::from_ymd_opt(2026, 2, 1));
        assert_eq!(config.selected, NaiveDate::from_ymd_opt(2026, 2, 12));
        assert_eq!(config.frame_interval(), Duration::from_millis(33));
        assert_eq!(config.animation.stagger_ms, 35);
        assert_eq!(config.animation.duration_ms, 400);

        let events = config.event_list().unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn zero_frame_rate_is_replaced() {
        let config = Config::parse("frame_rate_ms = 0").unwrap();
        assert_eq!(config.frame_rate_ms, 16);
    }

    #[test]
    fn invalid_config_is_an_error() {
        let err = Config::parse("seed_month = \"february\"").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ConfigParse));
    }

    #[test]
    fn missing_explicit_config_is_an_io_error() {
        let err = load_suitable_config(Some(Path::new("/nonexistent/caracal.toml"))).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::IOError(_)));
    }
}
