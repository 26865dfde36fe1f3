//! Keyword-to-label classification rule engine.
//!
//! This crate provides:
//! - YAML-based rule table definition with serde deserialization
//! - Filesystem loader (single file or directory scan)
//! - A compiled-in default rule set for proposal documents
//! - Deterministic first-match evaluation with confidence tiers

pub mod builtin;
pub mod evaluator;
pub mod loader;
pub mod schema;

pub use evaluator::{Labels, Signal};
pub use loader::{Result, RuleError};
pub use schema::{ClassificationRule, DefaultLabels, RuleSet, RuleStrength};
