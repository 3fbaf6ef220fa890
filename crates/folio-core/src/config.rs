//! Engine configuration types and parsing.
//!
//! The configuration covers how the engine behaves (history depth, snapshot
//! debounce, persistence, randomizer seeding, render options), not what the
//! theme looks like. Theme values live in [`crate::theme`].

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use toml::Table;

use crate::error::{Error, Result};
use crate::history::{DEFAULT_DEBOUNCE, DEFAULT_MAX_ENTRIES};
use crate::render::RenderOptions;

/// Embedded default configuration TOML, compiled into the binary.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../../config.toml");

/// Longest accepted snapshot debounce.
const MAX_DEBOUNCE_MS: u64 = 60_000;

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct ConfigLoadResult {
    pub config: EngineConfig,
    /// Path where config was found, if any.
    pub source: Option<PathBuf>,
    /// Whether defaults were used (no config file found).
    pub used_defaults: bool,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub history: HistoryConfig,
    pub persistence: PersistenceConfig,
    pub randomizer: RandomizerConfig,
    pub render: RenderConfig,
}

impl EngineConfig {
    pub fn from_default_toml() -> Result<Self> {
        let config: EngineConfig = toml::from_str(DEFAULT_CONFIG_TOML)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, merging with embedded defaults.
    ///
    /// Returns an error if the file doesn't exist or can't be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::load_with_defaults(&content)
    }

    /// Parse a TOML string on top of the embedded defaults (user values win).
    pub fn load_with_defaults(user_toml: &str) -> Result<Self> {
        let mut base: Table = toml::from_str(DEFAULT_CONFIG_TOML)?;
        let user: Table = toml::from_str(user_toml)?;

        deep_merge_toml(&mut base, user);

        let config: EngineConfig = base.try_into()?;
        Ok(config)
    }

    /// Find and load configuration using the XDG lookup chain.
    ///
    /// An explicit path is used strictly, with no fallback. Otherwise the
    /// chain is searched in order:
    /// 1. `$XDG_CONFIG_HOME/folio/config.toml`
    /// 2. `~/.config/folio/config.toml`
    /// 3. `./config.toml`
    ///
    /// A file that exists but fails to load is an error; defaults are only
    /// used when no file exists at all.
    pub fn find_and_load(explicit_path: Option<&Path>) -> Result<ConfigLoadResult> {
        // An explicit path is used strictly (no fallback)
        if let Some(path) = explicit_path {
            let config = Self::load(path)?;
            return Ok(ConfigLoadResult {
                config,
                source: Some(path.to_path_buf()),
                used_defaults: false,
            });
        }

        // No explicit path - search the XDG chain
        let search_paths = Self::config_search_paths();
        let mut first_error: Option<(PathBuf, Error)> = None;

        for path in &search_paths {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        return Ok(ConfigLoadResult {
                            config,
                            source: Some(path.clone()),
                            used_defaults: false,
                        });
                    }
                    Err(e) => {
                        // Keep the first failure; it is returned if nothing loads
                        if first_error.is_none() {
                            first_error = Some((path.clone(), e));
                        }
                    }
                }
            }
        }

        // A file that exists but is broken is an error, not a reason for defaults
        if let Some((path, error)) = first_error {
            tracing::error!("Config file {:?} exists but failed to load: {}", path, error);
            return Err(error);
        }

        // No config files exist anywhere - use embedded default TOML
        tracing::info!("No config file found, using built-in default config");
        tracing::debug!(
            "Searched: {}",
            search_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(ConfigLoadResult {
            config: Self::from_default_toml()?,
            source: None,
            used_defaults: true,
        })
    }

    /// Paths searched for a config file, in order.
    pub fn config_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. $XDG_CONFIG_HOME/folio/config.toml
        if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_config).join("folio/config.toml"));
        }

        // 2. ~/.config/folio/config.toml
        if let Ok(home) = env::var("HOME") {
            paths.push(PathBuf::from(home).join(".config/folio/config.toml"));
        }

        // 3. ./config.toml (cwd)
        paths.push(PathBuf::from("config.toml"));

        paths
    }

    /// Strict validation; every invalid value is reported.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.history.max_entries < 2 {
            errors.push(format!(
                "history.max_entries: invalid value '{}', must be at least 2 (initial state plus one change)",
                self.history.max_entries
            ));
        }

        if self.history.debounce_ms > MAX_DEBOUNCE_MS {
            errors.push(format!(
                "history.debounce_ms: invalid value '{}', must be at most {}",
                self.history.debounce_ms, MAX_DEBOUNCE_MS
            ));
        }

        let key = self.persistence.key.as_str();
        if key.is_empty() {
            errors.push("persistence.key: must not be empty".to_string());
        } else if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            || key.starts_with('.')
        {
            errors.push(format!(
                "persistence.key: invalid value '{}', use letters, digits, '-', '_' or '.'",
                key
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::ConfigValidation(errors))
        }
    }

    /// Non-fatal issues that probably indicate a mistake.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.persistence.enabled && self.persistence.directory.is_some() {
            warnings.push(
                "persistence.directory: set but persistence is disabled (enabled = false)"
                    .to_string(),
            );
        }

        if self.persistence.enabled && self.persistence.data_dir().is_none() {
            warnings.push(
                "persistence: no directory configured and no XDG_DATA_HOME or HOME to fall back on"
                    .to_string(),
            );
        }

        if self.history.debounce_ms == 0 {
            warnings.push(
                "history.debounce_ms: 0 records a snapshot for every single change".to_string(),
            );
        }

        warnings
    }

    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        lines.push("History:".to_string());
        lines.push(format!(
            "  max_entries: {} ({} undo step(s))",
            self.history.max_entries,
            self.history.max_entries.saturating_sub(1)
        ));
        lines.push(format!("  debounce: {}ms", self.history.debounce_ms));

        lines.push("\nPersistence:".to_string());
        if self.persistence.enabled {
            lines.push(format!("  enabled, key: {}", self.persistence.key));
            match self.persistence.data_dir() {
                Some(dir) => lines.push(format!("  directory: {}", dir.display())),
                None => lines.push("  directory: <unresolved>".to_string()),
            }
        } else {
            lines.push("  disabled".to_string());
        }

        lines.push("\nRandomizer:".to_string());
        match self.randomizer.seed {
            Some(seed) => lines.push(format!("  seed: {}", seed)),
            None => lines.push("  seed: random".to_string()),
        }

        lines.push("\nRender:".to_string());
        lines.push(format!(
            "  transparent_for_starfield: {}",
            self.render.transparent_for_starfield
        ));

        lines.join("\n")
    }
}

/// Deep merge two TOML tables, with `overlay` values taking precedence.
///
/// Nested tables merge recursively; any other value replaces the base.
fn deep_merge_toml(base: &mut Table, overlay: Table) {
    for (key, overlay_value) in overlay {
        match (base.get_mut(&key), overlay_value) {
            // Both are tables: recursively merge
            (Some(toml::Value::Table(base_table)), toml::Value::Table(overlay_table)) => {
                deep_merge_toml(base_table, overlay_table);
            }
            // Otherwise the overlay value wins
            (_, overlay_value) => {
                base.insert(key, overlay_value);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    /// Snapshots kept, counting the initial state.
    pub max_entries: usize,
    pub debounce_ms: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
        }
    }
}

impl HistoryConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PersistenceConfig {
    pub enabled: bool,
    pub key: String,
    /// Storage directory. Defaults to `$XDG_DATA_HOME/folio`.
    pub directory: Option<PathBuf>,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            key: "portfolio-theme".to_string(),
            directory: None,
        }
    }
}

impl PersistenceConfig {
    /// Resolve the storage directory: explicit, then `$XDG_DATA_HOME/folio`,
    /// then `~/.local/share/folio`.
    pub fn data_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.directory {
            return Some(dir.clone());
        }
        if let Ok(data_home) = env::var("XDG_DATA_HOME") {
            return Some(PathBuf::from(data_home).join("folio"));
        }
        env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".local/share/folio"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RandomizerConfig {
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub transparent_for_starfield: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            transparent_for_starfield: true,
        }
    }
}

impl RenderConfig {
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            transparent_for_starfield: self.transparent_for_starfield,
        }
    }
}
