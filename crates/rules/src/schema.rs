//! YAML rule table schema types with serde deserialization.
//!
//! A rule table is an ordered list of keyword rules plus the default
//! labels applied when nothing matches. Declaration order is evaluation
//! order; the table is loaded once per run and never mutated.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Rule strength ───────────────────────────────────────────────────

/// Strength of a rule's signal. A strong rule hitting the section title
/// yields high confidence; everything else yields medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleStrength {
    Strong,
    Weak,
}

impl Default for RuleStrength {
    fn default() -> Self {
        RuleStrength::Weak
    }
}

impl fmt::Display for RuleStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleStrength::Strong => write!(f, "strong"),
            RuleStrength::Weak => write!(f, "weak"),
        }
    }
}

// ── Classification rule ─────────────────────────────────────────────

/// A single keyword-to-label rule.
///
/// A rule contributes only the label slots it carries; slots left `None`
/// fall through to later rules or the table defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub name: String,
    /// Case-insensitive substrings matched against the section title and
    /// chunk content.
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_category: Option<String>,
    #[serde(default)]
    pub strength: RuleStrength,
}

impl ClassificationRule {
    /// True when any keyword occurs in `haystack` (already lowercased).
    pub fn matches(&self, haystack: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| haystack.contains(k.to_lowercase().as_str()))
    }
}

// ── Default labels ──────────────────────────────────────────────────

/// Labels applied when no rule matches a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultLabels {
    #[serde(default = "default_section_type")]
    pub section_type: String,
    #[serde(default = "default_domain")]
    pub domain_category: String,
    #[serde(default = "default_service")]
    pub service_category: String,
}

fn default_section_type() -> String {
    "general".to_string()
}

fn default_domain() -> String {
    "general".to_string()
}

fn default_service() -> String {
    "administrative".to_string()
}

impl Default for DefaultLabels {
    fn default() -> Self {
        Self {
            section_type: default_section_type(),
            domain_category: default_domain(),
            service_category: default_service(),
        }
    }
}

// ── Rule set ────────────────────────────────────────────────────────

fn default_version() -> u32 {
    1
}

/// An ordered classification rule table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub defaults: DefaultLabels,
    pub rules: Vec<ClassificationRule>,
}

impl RuleSet {
    /// Validate the table: every rule needs a non-empty name, at least one
    /// keyword, at least one label slot, and names must be unique.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let mut seen = std::collections::HashSet::new();
        for rule in &self.rules {
            if rule.name.trim().is_empty() {
                return Err("rule with empty name".to_string());
            }
            if !seen.insert(rule.name.as_str()) {
                return Err(format!("duplicate rule name: '{}'", rule.name));
            }
            if rule.keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(format!("rule '{}' has no usable keywords", rule.name));
            }
            if rule.section_type.is_none()
                && rule.domain_category.is_none()
                && rule.service_category.is_none()
            {
                return Err(format!("rule '{}' carries no label slot", rule.name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str, keywords: &[&str]) -> ClassificationRule {
        ClassificationRule {
            name: name.to_string(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            section_type: Some("general".to_string()),
            domain_category: None,
            service_category: None,
            strength: RuleStrength::Weak,
        }
    }

    #[test]
    fn keyword_matching_is_substring_based() {
        let r = rule("pricing", &["cost", "price"]);
        assert!(r.matches("total price breakdown"));
        assert!(!r.matches("schedule of values"));
    }

    #[test]
    fn yaml_round_trip_with_defaults() {
        let yaml = r#"
rules:
  - name: introduction
    keywords: [introduction, overview]
    section_type: introduction
    strength: strong
"#;
        let set: RuleSet = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(set.version, 1);
        assert_eq!(set.defaults.domain_category, "general");
        assert_eq!(set.defaults.service_category, "administrative");
        assert_eq!(set.rules[0].strength, RuleStrength::Strong);
        assert!(set.validate().is_ok());
    }

    #[test]
    fn duplicate_names_rejected() {
        let set = RuleSet {
            version: 1,
            defaults: DefaultLabels::default(),
            rules: vec![rule("a", &["x"]), rule("a", &["y"])],
        };
        assert!(set.validate().unwrap_err().contains("duplicate"));
    }

    #[test]
    fn rule_without_labels_rejected() {
        let mut r = rule("empty", &["x"]);
        r.section_type = None;
        let set = RuleSet {
            version: 1,
            defaults: DefaultLabels::default(),
            rules: vec![r],
        };
        assert!(set.validate().unwrap_err().contains("label slot"));
    }
}
