use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use orbit::settings::{DialSettings, ListSettings};
use orbit::{Item, Label, TrackLength};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_ENTRIES: [&str; 4] = ["Home", "Music", "Merch", "Blog"];
const PLACEHOLDER_TRACKS: u32 = 20;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NavigatorConfig {
    #[serde(default = "default_entries")]
    pub entries: Vec<Label>,
    #[serde(default)]
    pub dial: DialSettings,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            entries: default_entries(),
            dial: DialSettings::default(),
        }
    }
}

impl NavigatorConfig {
    pub fn items(&self) -> Vec<Item> {
        Item::entries(self.entries.iter().map(|label| label.to_string()))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaylistConfig {
    #[serde(default = "placeholder_tracks")]
    pub tracks: Vec<Item>,
    #[serde(default)]
    pub list: ListSettings,
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            tracks: placeholder_tracks(),
            list: ListSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub navigator: NavigatorConfig,
    #[serde(default)]
    pub playlist: PlaylistConfig,
}

fn default_entries() -> Vec<Label> {
    DEFAULT_ENTRIES.into_iter().map(Label::from).collect()
}

fn placeholder_tracks() -> Vec<Item> {
    (0..PLACEHOLDER_TRACKS)
        .map(|i| {
            Item::track(
                i,
                format!("lorem ipsum dolor amit {i}"),
                TrackLength::default(),
            )
        })
        .collect()
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid config: {0}")]
    Invalid(#[from] orbit::Error),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "turntable", "turntable").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn build(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Config, ConfigError> {
    let config: Config = builder
        .add_source(
            config::Environment::with_prefix("TURNTABLE")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()?;

    config.navigator.dial.validate()?;
    config.playlist.list.validate()?;
    Ok(config)
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;
    build(config::Config::builder().add_source(config::File::from(config_path).required(false)))
}

/// Parses a TOML document layered under the environment, as `load_config` does for the file.
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    build(
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml)),
    )
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to built-in config: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let touches_config = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) && event.paths.iter().any(|p| p == &config_path);

                if touches_config && tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit::ItemId;
    use orbit::motion::TickMode;
    use orbit::settings::OverlapPolicy;
    use std::time::Duration;

    #[test]
    fn test_bundled_default_config_parses() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();

        assert_eq!(config.navigator.entries, default_entries());
        assert_eq!(config.navigator.dial, DialSettings::default());
        assert_eq!(config.playlist.list, ListSettings::default());
        assert_eq!(config.playlist.tracks.len(), 3);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = parse_config("").unwrap();

        assert_eq!(config.navigator.items().len(), DEFAULT_ENTRIES.len());
        assert_eq!(config.playlist.tracks.len(), PLACEHOLDER_TRACKS as usize);
        assert_eq!(config.playlist.tracks[7].label.as_str(), "lorem ipsum dolor amit 7");
    }

    #[test]
    fn test_overrides() {
        let config = parse_config(
            r#"
            [navigator]
            entries = ["Tour", "Press"]

            [navigator.dial]
            tolerance = 5.0
            tick = "Fixed"
            overlap = "last"
            close_delay_ms = 300

            [playlist.list]
            gap = 12.0

            [[playlist.tracks]]
            id = 10
            label = "Opening"
            length = "3:41"
            "#,
        )
        .unwrap();

        let entries = config.navigator.items();
        assert_eq!(entries[1].id, ItemId::new(1));
        assert_eq!(entries[1].label.as_str(), "Press");
        assert_eq!(config.navigator.dial.tolerance, 5.0);
        assert_eq!(config.navigator.dial.tick, TickMode::Fixed);
        assert_eq!(config.navigator.dial.overlap, OverlapPolicy::Last);
        assert_eq!(config.navigator.dial.close_delay, Duration::from_millis(300));
        assert_eq!(config.playlist.list.gap, 12.0);
        assert_eq!(config.playlist.list.scroll_margin, 8.0);
        assert_eq!(
            config.playlist.tracks,
            vec![Item::track(10, "Opening", TrackLength::from_secs(221))]
        );
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let result = parse_config(
            r#"
            [navigator.dial]
            decay = 0.0
            "#,
        );

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
