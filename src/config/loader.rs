use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::types::AppConfig;

/// Discover and load the app config.
///
/// Priority:
/// 1. `--config` flag (explicit path)
/// 2. `$RELEASE_BOARD_CONFIG` environment variable
/// 3. `$XDG_CONFIG_HOME/release-board/config.toml`
/// 4. `~/.config/release-board/config.toml`
///
/// With none of those present the built-in defaults are used.
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig> {
    let path = match explicit_path {
        Some(path) => path.to_path_buf(),
        None => match find_global_config() {
            Some(path) => path,
            // No config found, use defaults.
            None => return Ok(AppConfig::default()),
        },
    };
    tracing::debug!("config: loading {}", path.display());
    parse_config_file(&path)
}

pub fn parse_config_file(path: &Path) -> Result<AppConfig> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let mut config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML from {}", path.display()))?;
    if let Some(state_path) = config.state.path.take() {
        config.state.path = Some(expand_tilde(&state_path.to_string_lossy()));
    }
    Ok(config)
}

/// Where view state is persisted.
///
/// `[state] path` wins; otherwise `$XDG_STATE_HOME/release-board/state.json`,
/// then `~/.local/state/release-board/state.json`.
pub fn state_path(config: &AppConfig) -> Option<PathBuf> {
    if let Some(path) = &config.state.path {
        return Some(path.clone());
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("release-board/state.json"));
    }
    home_dir().map(|home| home.join(".local/state/release-board/state.json"))
}

fn find_global_config() -> Option<PathBuf> {
    // $RELEASE_BOARD_CONFIG
    if let Ok(path) = std::env::var("RELEASE_BOARD_CONFIG") {
        let p = PathBuf::from(&path);
        if p.is_file() {
            return Some(p);
        }
    }

    // $XDG_CONFIG_HOME/release-board/config.toml
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let p = PathBuf::from(xdg).join("release-board/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    // ~/.config/release-board/config.toml
    if let Some(home) = home_dir() {
        let p = home.join(".config/release-board/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    None
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}
