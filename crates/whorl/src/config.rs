use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use whorl_core::catalog::{Catalog, MenuItem};
use whorl_core::controller::{Menu, RingConfig};
use whorl_core::error::MenuError;
use whorl_core::lifecycle::Timing;

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct MenuSettings {
    pub menu_radius: f64,
    pub item_radius: f64,
    pub open_delay_ms: u64,
    pub close_delay_ms: u64,
    pub stagger_ms: u64,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            menu_radius: 100.0,
            item_radius: 25.0,
            open_delay_ms: 50,
            close_delay_ms: 350,
            stagger_ms: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub menu: MenuSettings,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

impl Config {
    pub fn ring_config(&self) -> RingConfig {
        RingConfig {
            menu_radius: self.menu.menu_radius,
            item_radius: self.menu.item_radius,
        }
    }

    pub fn timing(&self) -> Timing {
        Timing {
            open_delay: Duration::from_millis(self.menu.open_delay_ms),
            close_delay: Duration::from_millis(self.menu.close_delay_ms),
            stagger: Duration::from_millis(self.menu.stagger_ms),
        }
    }

    pub fn catalog(&self) -> Result<Catalog, MenuError> {
        Catalog::new(self.items.clone())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Invalid menu: {0}")]
    Menu(#[from] MenuError),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "whorl", "whorl").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("WHORL"))
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Startup config: the file if it parses, the built-in demo menu on a fresh
/// install or an unreadable file.
pub fn load_or_setup() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        return demo_config();
    }

    match load_config() {
        Ok(config) => config,
        Err(err) => {
            log::warn!("could not load config ({err}); using built-in items");
            demo_config()
        }
    }
}

/// Validate a config into a controller. Fails on catalog errors (duplicate
/// item names); radii and timings cannot fail.
pub fn build_menu(config: &Config) -> Result<Menu, ConfigError> {
    let catalog = config.catalog()?;
    Ok(Menu::new(catalog, config.ring_config(), config.timing()))
}

/// The fallback menu when the configured catalog is unusable.
pub fn demo_menu(config: &Config) -> Menu {
    let catalog = Catalog::new(demo_items()).unwrap_or_default();
    Menu::new(catalog, config.ring_config(), config.timing())
}

fn demo_config() -> Config {
    Config {
        menu: MenuSettings::default(),
        items: demo_items(),
    }
}

fn demo_items() -> Vec<MenuItem> {
    vec![
        MenuItem::new("Cut", "edit-cut"),
        MenuItem::new("Copy", "edit-copy"),
        MenuItem::new("Paste", "edit-paste"),
        MenuItem::new("Comment", "insert-text"),
        MenuItem::new("Like", "starred"),
        MenuItem::new("Delete", "edit-delete"),
    ]
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
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

use crate::events::AppEvent;
use async_channel::Sender;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Watches the config directory and emits `ConfigReload` whenever the
/// config file itself changes. Runs until the receiving side goes away.
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
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) if touches_config(&event, &config_path) => {
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

fn touches_config(event: &notify::Event, config_path: &std::path::Path) -> bool {
    let meaningful = matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    );
    meaningful && event.paths.iter().any(|p| p == config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn default_config_file_parses_and_validates() {
        let config = parse(DEFAULT_CONFIG);

        assert_eq!(config.menu.menu_radius, 100.0);
        assert_eq!(config.menu.item_radius, 25.0);
        assert_eq!(config.menu.open_delay_ms, 50);
        assert_eq!(config.menu.close_delay_ms, 350);
        assert_eq!(config.menu.stagger_ms, 50);

        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.get(0).unwrap().name.to_string(), "Cut");
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = parse("");

        assert_eq!(config.menu.menu_radius, 100.0);
        assert!(config.items.is_empty());
    }

    #[test]
    fn duplicate_item_names_fail_validation() {
        let config: Config = serde_json::from_str(
            r#"{ "items": [
                { "name": "Copy", "icon": "edit-copy" },
                { "name": "Copy", "icon": "edit-copy" }
            ] }"#,
        )
        .unwrap();

        assert!(build_menu(&config).is_err());
    }

    #[test]
    fn timings_convert_to_durations() {
        let mut config = parse("");
        config.menu.stagger_ms = 75;

        let timing = config.timing();
        assert_eq!(timing.stagger, Duration::from_millis(75));
        assert_eq!(timing.open_delay, Duration::from_millis(50));
    }
}
