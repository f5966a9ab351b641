use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use knob::KnobConfig;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 250,
            height: 250,
            title: "KnobTest".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub knob: KnobConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

const ENV_PREFIX: &str = "KNOB_DEMO";

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "knob", "knob-demo").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn environment() -> config::Environment {
    // KNOB_DEMO_KNOB__TURN_TYPE=vertical
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(environment())
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to the default configuration: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if write_default_config_to(&path)? {
        log::info!("Wrote default knob config to {}", path.display());
    } else {
        log::info!("Keeping existing knob config at {}", path.display());
    }
    Ok(path)
}

/// Writes [`DEFAULT_CONFIG`] to `path` unless a file is already there.
/// Returns whether it wrote one.
pub fn write_default_config_to(path: &Path) -> std::io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::write(path, DEFAULT_CONFIG)?;
    Ok(true)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

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
    log::debug!("Watching {} for changes", config_path.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) if touches_config(&event, &config_path) => {
                log::debug!(
                    "{} changed ({:?}), rebuilding the knob",
                    config_path.display(),
                    event.kind
                );
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

/// Edits, creations and removals of the config file itself.
fn touches_config(event: &notify::Event, config_path: &Path) -> bool {
    let relevant_kind = matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    );
    relevant_kind
        && event
            .paths
            .iter()
            .any(|p| p.file_name().is_some_and(|n| Some(n) == config_path.file_name()))
}
