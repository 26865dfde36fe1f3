use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_usize(key: &str, default: usize) -> usize {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Pipeline configuration, loaded once per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Token budget per chunk span. Table/figure markers may push a span
    /// over this rather than being divided.
    pub max_chunk_tokens: usize,
    /// Spans below this token count are merged with a neighbor in the
    /// same section during size balancing.
    pub min_chunk_tokens: usize,
    /// Opaque identifier recorded on the output artifact.
    pub processing_method: String,
    /// Directory of classification rule YAML files. `None` uses the
    /// built-in rule set.
    pub rules_dir: Option<PathBuf>,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_tokens: 400,
            min_chunk_tokens: 100,
            processing_method: "structure_aware_v1".to_string(),
            rules_dir: None,
        }
    }
}

impl ChunkingConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            max_chunk_tokens: env_usize("DOCCHUNK_MAX_TOKENS", 400),
            min_chunk_tokens: env_usize("DOCCHUNK_MIN_TOKENS", 100),
            processing_method: env_or("DOCCHUNK_METHOD", "structure_aware_v1"),
            rules_dir: env_opt("DOCCHUNK_RULES_DIR").map(PathBuf::from),
        }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Chunking config loaded:");
        tracing::info!("  max_chunk_tokens: {}", self.max_chunk_tokens);
        tracing::info!("  min_chunk_tokens: {}", self.min_chunk_tokens);
        tracing::info!("  processing_method: {}", self.processing_method);
        tracing::info!(
            "  rules_dir: {}",
            self.rules_dir
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(builtin)".to_string())
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_budget() {
        let config = ChunkingConfig::default();
        assert_eq!(config.max_chunk_tokens, 400);
        assert_eq!(config.min_chunk_tokens, 100);
        assert_eq!(config.processing_method, "structure_aware_v1");
        assert!(config.rules_dir.is_none());
    }
}
