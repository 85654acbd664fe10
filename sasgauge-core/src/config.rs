//! Configuration file support for sasgauge
//!
//! Loads project-specific configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.sasgaugerc.json` in the project root
//! 3. `sasgauge.config.json` in the project root
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::complexity::Thresholds;
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default exclude patterns applied when no config is specified
const DEFAULT_EXCLUDES: &[&str] = &["**/backup/**", "**/archive/**"];

/// sasgauge configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GaugeConfig {
    /// Glob patterns for files to include (default: all `.sas` files)
    #[serde(default)]
    pub include: Vec<String>,

    /// Glob patterns for files to exclude (default: backup/archive dirs)
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Complexity above this value raises a `high-complexity` issue
    /// (default: 10)
    #[serde(default)]
    pub max_complexity: Option<usize>,

    /// Macro parameter count above this value raises
    /// `excess-macro-parameters` (default: 3)
    #[serde(default)]
    pub max_macro_params: Option<usize>,

    /// Minimum cyclomatic complexity to report (default: 0, report all)
    #[serde(default)]
    pub min_complexity: Option<usize>,

    /// Maximum number of results to show
    #[serde(default)]
    pub top: Option<usize>,
}

/// Resolved configuration with compiled glob patterns
#[derive(Debug)]
pub struct ResolvedConfig {
    /// Compiled include patterns (empty means include all)
    pub include: Option<GlobSet>,
    /// Compiled exclude patterns
    pub exclude: GlobSet,
    /// Issue thresholds
    pub thresholds: Thresholds,
    /// Filters
    pub min_complexity: Option<usize>,
    pub top_n: Option<usize>,
}

impl GaugeConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(max) = self.max_complexity {
            if max == 0 {
                anyhow::bail!("max_complexity must be positive (got 0)");
            }
        }

        // Validate glob patterns compile
        for pattern in &self.include {
            Glob::new(pattern).with_context(|| format!("invalid include pattern: {}", pattern))?;
        }
        for pattern in &self.exclude {
            Glob::new(pattern).with_context(|| format!("invalid exclude pattern: {}", pattern))?;
        }

        Ok(())
    }

    /// Resolve config into compiled form ready for use
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        // Compile include patterns
        let include = if self.include.is_empty() {
            None
        } else {
            let mut builder = GlobSetBuilder::new();
            for pattern in &self.include {
                builder.add(Glob::new(pattern)?);
            }
            Some(builder.build()?)
        };

        // Compile exclude patterns (defaults apply when user specified none)
        let exclude = {
            let mut builder = GlobSetBuilder::new();
            if self.exclude.is_empty() {
                for pattern in DEFAULT_EXCLUDES {
                    builder.add(Glob::new(pattern)?);
                }
            } else {
                for pattern in &self.exclude {
                    builder.add(Glob::new(pattern)?);
                }
            }
            builder.build()?
        };

        let defaults = Thresholds::default();
        let thresholds = Thresholds {
            max_complexity: self.max_complexity.unwrap_or(defaults.max_complexity),
            max_macro_params: self.max_macro_params.unwrap_or(defaults.max_macro_params),
        };

        Ok(ResolvedConfig {
            include,
            exclude,
            thresholds,
            min_complexity: self.min_complexity,
            top_n: self.top,
        })
    }
}

impl ResolvedConfig {
    /// Check if a file path should be included based on include/exclude patterns
    pub fn should_include(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        // Check exclude first
        if self.exclude.is_match(path_str.as_ref()) {
            return false;
        }

        // If include patterns exist, file must match at least one
        if let Some(ref include) = self.include {
            return include.is_match(path_str.as_ref());
        }

        true
    }

    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Result<Self> {
        GaugeConfig::default().resolve()
    }
}

/// Discover and load a config file from the project root
///
/// Search order:
/// 1. `.sasgaugerc.json`
/// 2. `sasgauge.config.json`
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(project_root: &Path) -> Result<Option<(GaugeConfig, PathBuf)>> {
    let rc_path = project_root.join(".sasgaugerc.json");
    if rc_path.exists() {
        let config = load_config_file(&rc_path)?;
        return Ok(Some((config, rc_path)));
    }

    let config_path = project_root.join("sasgauge.config.json");
    if config_path.exists() {
        let config = load_config_file(&config_path)?;
        return Ok(Some((config, config_path)));
    }

    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<GaugeConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: GaugeConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}
