//! Deterministic rule evaluation with confidence tiers.
//!
//! Rules are evaluated top to bottom; the first matching rule wins each
//! label slot independently (section type, domain, service). A strong
//! rule hitting the section title yields high confidence, any other
//! match yields medium, and the default fallback yields low. Pure
//! function of (title, content, rule table) — identical input always
//! produces identical output.

use docchunk_core::ConfidenceLevel;
use tracing::warn;

use crate::schema::{ClassificationRule, RuleSet, RuleStrength};

/// Resolved label slots for one chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct Labels {
    pub section_type: String,
    pub domain_category: String,
    pub service_category: String,
}

/// Outcome of classifying one chunk against the rule table.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub labels: Labels,
    pub confidence: ConfidenceLevel,
}

/// The winning entry for one label slot, kept for conflict detection.
struct FilledSlot {
    label: String,
    rule_name: String,
    strength: RuleStrength,
}

fn fill_slot(
    slot: &mut Option<FilledSlot>,
    candidate: &Option<String>,
    rule: &ClassificationRule,
    slot_name: &str,
) {
    let Some(label) = candidate else { return };
    match slot {
        None => {
            *slot = Some(FilledSlot {
                label: label.clone(),
                rule_name: rule.name.clone(),
                strength: rule.strength,
            });
        }
        Some(existing) => {
            // Equal-strength conflict: declaration order already decided,
            // but surface it for rule table authors.
            if existing.strength == rule.strength && existing.label != *label {
                warn!(
                    slot = slot_name,
                    winner = %existing.rule_name,
                    loser = %rule.name,
                    "classification rule conflict resolved by declaration order"
                );
            }
        }
    }
}

impl RuleSet {
    /// Classify a chunk from its section title and content.
    pub fn classify(&self, section_title: &str, content: &str) -> Signal {
        let title = section_title.to_lowercase();
        let body = content.to_lowercase();

        let mut section_type: Option<FilledSlot> = None;
        let mut domain: Option<FilledSlot> = None;
        let mut service: Option<FilledSlot> = None;
        let mut confidence = ConfidenceLevel::Low;

        for rule in &self.rules {
            let title_hit = rule.matches(&title);
            let content_hit = title_hit || rule.matches(&body);
            if !content_hit {
                continue;
            }

            let rule_confidence = if title_hit && rule.strength == RuleStrength::Strong {
                ConfidenceLevel::High
            } else {
                ConfidenceLevel::Medium
            };
            confidence = confidence.max(rule_confidence);

            fill_slot(&mut section_type, &rule.section_type, rule, "section_type");
            fill_slot(&mut domain, &rule.domain_category, rule, "domain_category");
            fill_slot(&mut service, &rule.service_category, rule, "service_category");
        }

        let labels = Labels {
            section_type: section_type
                .map(|s| s.label)
                .unwrap_or_else(|| self.defaults.section_type.clone()),
            domain_category: domain
                .map(|s| s.label)
                .unwrap_or_else(|| self.defaults.domain_category.clone()),
            service_category: service
                .map(|s| s.label)
                .unwrap_or_else(|| self.defaults.service_category.clone()),
        };

        Signal { labels, confidence }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DefaultLabels;

    fn rule(
        name: &str,
        keywords: &[&str],
        section_type: Option<&str>,
        domain: Option<&str>,
        strength: RuleStrength,
    ) -> ClassificationRule {
        ClassificationRule {
            name: name.to_string(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            section_type: section_type.map(str::to_string),
            domain_category: domain.map(str::to_string),
            service_category: None,
            strength,
        }
    }

    fn table(rules: Vec<ClassificationRule>) -> RuleSet {
        RuleSet {
            version: 1,
            defaults: DefaultLabels::default(),
            rules,
        }
    }

    #[test]
    fn strong_title_hit_is_high_confidence() {
        let set = table(vec![rule(
            "intro",
            &["introduction"],
            Some("introduction"),
            None,
            RuleStrength::Strong,
        )]);
        let signal = set.classify("1. Introduction", "We invite proposals.");
        assert_eq!(signal.labels.section_type, "introduction");
        assert_eq!(signal.confidence, ConfidenceLevel::High);
    }

    #[test]
    fn content_only_hit_is_medium_confidence() {
        let set = table(vec![rule(
            "intro",
            &["introduction"],
            Some("introduction"),
            None,
            RuleStrength::Strong,
        )]);
        let signal = set.classify("3. Misc", "See the introduction above.");
        assert_eq!(signal.labels.section_type, "introduction");
        assert_eq!(signal.confidence, ConfidenceLevel::Medium);
    }

    #[test]
    fn weak_title_hit_is_medium_confidence() {
        let set = table(vec![rule(
            "eng",
            &["electrical"],
            None,
            Some("engineering"),
            RuleStrength::Weak,
        )]);
        let signal = set.classify("4. Electrical Design", "");
        assert_eq!(signal.labels.domain_category, "engineering");
        assert_eq!(signal.confidence, ConfidenceLevel::Medium);
    }

    #[test]
    fn no_match_falls_back_to_defaults_with_low_confidence() {
        let set = table(vec![rule(
            "intro",
            &["introduction"],
            Some("introduction"),
            None,
            RuleStrength::Strong,
        )]);
        let signal = set.classify("Appendix Q", "Blank forms follow.");
        assert_eq!(signal.labels.section_type, "general");
        assert_eq!(signal.labels.domain_category, "general");
        assert_eq!(signal.labels.service_category, "administrative");
        assert_eq!(signal.confidence, ConfidenceLevel::Low);
    }

    #[test]
    fn declaration_order_wins_on_conflict() {
        let set = table(vec![
            rule("first", &["cost"], None, Some("financial"), RuleStrength::Weak),
            rule("second", &["cost"], None, Some("legal"), RuleStrength::Weak),
        ]);
        let signal = set.classify("Fees", "cost schedule attached");
        assert_eq!(signal.labels.domain_category, "financial");
    }

    #[test]
    fn slots_fill_independently() {
        let set = table(vec![
            rule("intro", &["overview"], Some("introduction"), None, RuleStrength::Strong),
            rule("eng", &["structural"], None, Some("engineering"), RuleStrength::Weak),
        ]);
        let signal = set.classify("Project Overview", "Structural steel scope.");
        assert_eq!(signal.labels.section_type, "introduction");
        assert_eq!(signal.labels.domain_category, "engineering");
        // Strongest signal wins overall.
        assert_eq!(signal.confidence, ConfidenceLevel::High);
    }

    #[test]
    fn classification_is_deterministic() {
        let set = RuleSet::builtin();
        let a = set.classify("2. Scope of Work", "Install 230kV equipment.");
        let b = set.classify("2. Scope of Work", "Install 230kV equipment.");
        assert_eq!(a, b);
    }
}
