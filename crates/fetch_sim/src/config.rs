use std::{fs, ops::RangeInclusive, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;
use shared::error::GridError;
use tracing::warn;

pub const DEFAULT_CONFIG_FILE: &str = "quote_grid.toml";
const ENV_PREFIX: &str = "QUOTE_GRID__";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub stage_delay_min_ms: u64,
    pub stage_delay_max_ms: u64,
    pub max_page: u32,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stage_delay_min_ms: 1200,
            stage_delay_max_ms: 2400,
            max_page: 10,
            seed: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    stage_delay_min_ms: Option<u64>,
    stage_delay_max_ms: Option<u64>,
    max_page: Option<u32>,
    seed: Option<u64>,
}

impl Settings {
    pub fn stage_delay_bounds(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.stage_delay_min_ms),
            Duration::from_millis(self.stage_delay_max_ms),
        )
    }

    pub fn pages(&self) -> RangeInclusive<u32> {
        1..=self.max_page
    }

    pub fn validate(&self) -> Result<(), GridError> {
        if self.stage_delay_min_ms > self.stage_delay_max_ms {
            return Err(GridError::InvalidConfig(format!(
                "stage_delay_min_ms ({}) exceeds stage_delay_max_ms ({})",
                self.stage_delay_min_ms, self.stage_delay_max_ms
            )));
        }
        if self.max_page == 0 {
            return Err(GridError::InvalidConfig(
                "max_page must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn apply_file(&mut self, raw: &str) -> anyhow::Result<()> {
        let file_cfg: FileSettings = toml::from_str(raw)?;
        if let Some(v) = file_cfg.stage_delay_min_ms {
            self.stage_delay_min_ms = v;
        }
        if let Some(v) = file_cfg.stage_delay_max_ms {
            self.stage_delay_max_ms = v;
        }
        if let Some(v) = file_cfg.max_page {
            self.max_page = v;
        }
        if file_cfg.seed.is_some() {
            self.seed = file_cfg.seed;
        }
        Ok(())
    }

    /// Overlays `QUOTE_GRID__*` variables read through `lookup`. Values that
    /// do not parse are skipped.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = parse_env(&lookup, "STAGE_DELAY_MIN_MS") {
            self.stage_delay_min_ms = v;
        }
        if let Some(v) = parse_env(&lookup, "STAGE_DELAY_MAX_MS") {
            self.stage_delay_max_ms = v;
        }
        if let Some(v) = parse_env(&lookup, "MAX_PAGE") {
            self.max_page = v;
        }
        if let Some(v) = parse_env(&lookup, "SEED") {
            self.seed = Some(v);
        }
    }
}

fn parse_env<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    suffix: &str,
) -> Option<T> {
    let name = format!("{ENV_PREFIX}{suffix}");
    let raw = lookup(&name)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = %name, value = %raw, "ignoring unparsable config override");
            None
        }
    }
}

/// Defaults, then the TOML file, then environment overrides.
///
/// An explicit `path` must exist. Without one, `quote_grid.toml` in the
/// working directory is read if present.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with_env(path, |name| std::env::var(name).ok())
}

pub fn load_settings_with_env(
    path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            settings
                .apply_file(&raw)
                .with_context(|| format!("failed to parse config file {}", path.display()))?;
        }
        None => {
            if let Ok(raw) = fs::read_to_string(DEFAULT_CONFIG_FILE) {
                settings
                    .apply_file(&raw)
                    .with_context(|| format!("failed to parse {DEFAULT_CONFIG_FILE}"))?;
            }
        }
    }

    settings.apply_env(lookup);
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
