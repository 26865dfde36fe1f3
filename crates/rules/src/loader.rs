//! Filesystem rule table loader.
//!
//! Loads a single YAML file or scans a directory for `*.yml` / `*.yaml`
//! files. Directory scans concatenate rule lists in filename order so
//! evaluation order stays deterministic; defaults come from the first
//! file. The table is loaded once per run — there is no hot reload.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::schema::RuleSet;

/// Errors that can occur during rule table loading.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse/deserialization error.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Rule validation error (empty keywords, duplicate names, etc.).
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result alias for rule operations.
pub type Result<T> = std::result::Result<T, RuleError>;

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "yml" || e == "yaml")
        .unwrap_or(false)
}

impl RuleSet {
    /// Parse and validate a rule table from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let set: RuleSet = serde_yaml::from_str(yaml)?;
        set.validate().map_err(RuleError::Validation)?;
        Ok(set)
    }

    /// Load and validate a rule table from a single YAML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)?;
        let set = Self::from_yaml_str(&yaml)?;
        info!(path = %path.display(), rules = set.rules.len(), "loaded rule table");
        Ok(set)
    }

    /// Scan a directory and merge all YAML rule files.
    ///
    /// Files are visited in filename order; dotfiles and non-YAML files
    /// are skipped. A file that fails to parse is reported and skipped
    /// rather than aborting the scan. Defaults come from the first file
    /// loaded; later files contribute rules only.
    ///
    /// Fails when the merged result contains no rules or does not
    /// validate (e.g. duplicate rule names across files).
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut paths: Vec<_> = fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| !n.starts_with('.'))
                    .unwrap_or(false)
            })
            .filter(|p| is_yaml(p))
            .collect();
        paths.sort();

        let mut merged: Option<RuleSet> = None;
        for path in &paths {
            match fs::read_to_string(path)
                .map_err(RuleError::from)
                .and_then(|y| serde_yaml::from_str::<RuleSet>(&y).map_err(RuleError::from))
            {
                Ok(set) => {
                    info!(path = %path.display(), rules = set.rules.len(), "loaded rule file");
                    match merged.as_mut() {
                        None => merged = Some(set),
                        Some(m) => m.rules.extend(set.rules),
                    }
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable rule file");
                }
            }
        }

        let merged = merged.ok_or_else(|| {
            RuleError::Validation(format!("no rule files found in {}", dir.display()))
        })?;
        merged.validate().map_err(RuleError::Validation)?;
        Ok(merged)
    }
}
