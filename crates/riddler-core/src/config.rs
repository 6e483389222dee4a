//! riddler configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::similarity::{SimilarityWeights, DEFAULT_LEXICAL_WEIGHT, DEFAULT_SEMANTIC_WEIGHT};
use crate::verdict::{VerdictPolicy, DEFAULT_THRESHOLD};

/// Top-level riddler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiddlerConfig {
    /// Path of the JSON riddle bank.
    #[serde(default = "default_bank_path")]
    pub bank_path: PathBuf,
    /// Labels the legacy-category backfill may assign in addition to the
    /// ones already present in the bank.
    #[serde(default)]
    pub known_categories: Vec<String>,
    /// Fixed random seed for reproducible draw order.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Similarity blend and pass threshold.
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Tunable scoring parameters. The defaults are the historical constants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_lexical_weight")]
    pub lexical_weight: f64,
    #[serde(default = "default_semantic_weight")]
    pub semantic_weight: f64,
    /// Scores strictly above this pass.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_bank_path() -> PathBuf {
    PathBuf::from("jokes.json")
}
fn default_lexical_weight() -> f64 {
    DEFAULT_LEXICAL_WEIGHT
}
fn default_semantic_weight() -> f64 {
    DEFAULT_SEMANTIC_WEIGHT
}
fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            lexical_weight: default_lexical_weight(),
            semantic_weight: default_semantic_weight(),
            threshold: default_threshold(),
        }
    }
}

impl ScoringConfig {
    pub fn weights(&self) -> SimilarityWeights {
        SimilarityWeights {
            lexical: self.lexical_weight,
            semantic: self.semantic_weight,
        }
    }

    pub fn policy(&self) -> VerdictPolicy {
        VerdictPolicy::new(self.threshold)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, w) in [
            ("lexical_weight", self.lexical_weight),
            ("semantic_weight", self.semantic_weight),
        ] {
            anyhow::ensure!(
                w.is_finite() && w >= 0.0,
                "scoring.{name} must be a non-negative number, got {w}"
            );
        }
        anyhow::ensure!(
            self.lexical_weight + self.semantic_weight > 0.0,
            "scoring weights must not both be zero"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.threshold),
            "scoring.threshold must be between 0.0 and 1.0, got {}",
            self.threshold
        );
        Ok(())
    }
}

impl Default for RiddlerConfig {
    fn default() -> Self {
        Self {
            bank_path: default_bank_path(),
            known_categories: Vec::new(),
            seed: None,
            scoring: ScoringConfig::default(),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `riddler.toml` in the current directory
/// 2. `~/.config/riddler/config.toml`
///
/// Environment variable override: `RIDDLER_BANK`.
pub fn load_config() -> Result<RiddlerConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<RiddlerConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("riddler.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => RiddlerConfig::default(),
    };

    if let Ok(bank) = std::env::var("RIDDLER_BANK") {
        if !bank.trim().is_empty() {
            config.bank_path = PathBuf::from(bank);
        }
    }

    Ok(config)
}

/// Parse and validate a TOML config string.
pub fn parse_config_str(content: &str) -> Result<RiddlerConfig> {
    let config: RiddlerConfig = toml::from_str(content)?;
    config.scoring.validate()?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("riddler"))
}
