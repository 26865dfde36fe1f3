//! Compiled-in default rule set for procurement/engineering proposal
//! documents. Used when no external rule table is configured.
//!
//! Section-type rules come first (strong, title-oriented), followed by
//! weak domain and service rules. Order matters: evaluation is first
//! match wins per label slot.

use crate::schema::{ClassificationRule, DefaultLabels, RuleSet, RuleStrength};

fn rule(
    name: &str,
    keywords: &[&str],
    section_type: Option<&str>,
    domain: Option<&str>,
    service: Option<&str>,
    strength: RuleStrength,
) -> ClassificationRule {
    ClassificationRule {
        name: name.to_string(),
        keywords: keywords.iter().map(|s| s.to_string()).collect(),
        section_type: section_type.map(str::to_string),
        domain_category: domain.map(str::to_string),
        service_category: service.map(str::to_string),
        strength,
    }
}

impl RuleSet {
    /// The built-in proposal-document rule table.
    pub fn builtin() -> Self {
        use RuleStrength::{Strong, Weak};

        let rules = vec![
            // Section types — strong title signals.
            rule(
                "introduction",
                &["introduction", "overview", "background", "objectives"],
                Some("introduction"),
                None,
                None,
                Strong,
            ),
            rule(
                "scope-of-work",
                &["scope of work", "scope", "deliverables", "tasks"],
                Some("scope_of_work"),
                Some("technical"),
                None,
                Strong,
            ),
            rule(
                "technical-requirements",
                &["technical requirements", "specifications", "standards", "requirements"],
                Some("technical_requirements"),
                Some("technical"),
                None,
                Strong,
            ),
            rule(
                "pricing",
                &["pricing", "cost", "price", "budget", "payment"],
                Some("pricing"),
                Some("financial"),
                None,
                Strong,
            ),
            rule(
                "assumptions",
                &["assumptions"],
                Some("assumptions"),
                None,
                None,
                Strong,
            ),
            rule(
                "exclusions",
                &["exclusions", "excluded", "limitations"],
                Some("exclusions"),
                None,
                None,
                Strong,
            ),
            rule(
                "qualifications",
                &["qualifications", "experience", "certified", "licensed"],
                Some("qualifications"),
                None,
                None,
                Strong,
            ),
            rule(
                "timeline",
                &["schedule", "timeline", "milestones", "duration"],
                Some("timeline"),
                None,
                None,
                Strong,
            ),
            rule(
                "evaluation",
                &["evaluation", "selection criteria"],
                Some("evaluation"),
                None,
                Some("analysis"),
                Strong,
            ),
            rule(
                "contact-information",
                &["contact", "submission instructions"],
                Some("contact_information"),
                None,
                None,
                Strong,
            ),
            rule(
                "terms-conditions",
                &["terms", "conditions", "contract"],
                Some("terms_conditions"),
                Some("legal"),
                None,
                Strong,
            ),
            // Domain categories — weak content signals.
            rule(
                "engineering-domain",
                &["civil", "structural", "electrical", "mechanical", "engineering"],
                None,
                Some("engineering"),
                None,
                Weak,
            ),
            rule(
                "environmental-domain",
                &["environmental", "sustainability", "impact", "compliance"],
                None,
                Some("environmental"),
                None,
                Weak,
            ),
            rule(
                "financial-domain",
                &["cost", "price", "budget", "financial", "payment"],
                None,
                Some("financial"),
                None,
                Weak,
            ),
            rule(
                "legal-domain",
                &["legal", "contract", "terms", "regulatory"],
                None,
                Some("legal"),
                None,
                Weak,
            ),
            // Service categories — weak content signals.
            rule(
                "design-service",
                &["design", "planning", "concept", "development"],
                None,
                None,
                Some("design"),
                Weak,
            ),
            rule(
                "construction-service",
                &["construction", "installation", "implementation", "field"],
                None,
                None,
                Some("construction_support"),
                Weak,
            ),
            rule(
                "consulting-service",
                &["consulting", "advisory", "guidance", "recommendation"],
                None,
                None,
                Some("consulting"),
                Weak,
            ),
            rule(
                "maintenance-service",
                &["maintenance", "support", "operation", "ongoing"],
                None,
                None,
                Some("maintenance"),
                Weak,
            ),
            rule(
                "analysis-service",
                &["analysis", "study", "assessment"],
                None,
                None,
                Some("analysis"),
                Weak,
            ),
        ];

        let set = RuleSet {
            version: 1,
            defaults: DefaultLabels::default(),
            rules,
        };
        debug_assert!(set.validate().is_ok());
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_set_is_valid() {
        let set = RuleSet::builtin();
        assert!(set.validate().is_ok());
        assert!(set.rules.len() >= 15);
    }

    #[test]
    fn builtin_section_rules_are_strong() {
        let set = RuleSet::builtin();
        let intro = set.rules.iter().find(|r| r.name == "introduction").unwrap();
        assert_eq!(intro.strength, RuleStrength::Strong);
        assert_eq!(intro.section_type.as_deref(), Some("introduction"));
    }
}
