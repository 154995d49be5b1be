// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Heuristic rule tables.
//!
//! Substring heuristics that link scanner output to remediation text and to
//! catalog criteria. They are best-effort, not a verified mapping, and are
//! kept here so they can be tuned without touching scoring.

use crate::findings::AutomatedFinding;

/// A canned set of fix suggestions for scanner rules whose id contains `pattern`
#[derive(Debug, Clone, Copy)]
pub struct FixRule {
    pub pattern: &'static str,
    pub suggestions: &'static [&'static str],
}

/// Checked in order; the first matching pattern wins
pub const FIX_RULES: &[FixRule] = &[
    FixRule {
        pattern: "color-contrast",
        suggestions: &[
            "Increase color contrast ratio to meet WCAG standards",
            "Use darker text on light backgrounds or lighter text on dark backgrounds",
            "Test with color contrast analyzers",
        ],
    },
    FixRule {
        pattern: "image-alt",
        suggestions: &[
            "Add descriptive alt text to images",
            "Use empty alt=\"\" for decorative images",
            "Ensure alt text conveys the same information as the image",
        ],
    },
    FixRule {
        pattern: "heading",
        suggestions: &[
            "Use proper heading hierarchy (h1, h2, h3, etc.)",
            "Don't skip heading levels",
            "Ensure headings describe the content that follows",
        ],
    },
    FixRule {
        pattern: "label",
        suggestions: &[
            "Associate labels with form controls",
            "Use aria-label or aria-labelledby when visible labels aren't possible",
            "Ensure all form inputs have accessible names",
        ],
    },
];

/// First fix rule whose pattern occurs in the rule id
pub fn matching_fix_rule(rule_id: &str) -> Option<&'static FixRule> {
    FIX_RULES.iter().find(|rule| rule_id.contains(rule.pattern))
}

/// Fix suggestions for a violation; falls back to the violation's help text
pub fn fix_suggestions(violation: &AutomatedFinding) -> Vec<String> {
    match matching_fix_rule(&violation.id) {
        Some(rule) => rule.suggestions.iter().map(|s| s.to_string()).collect(),
        None => vec![violation.help.clone()],
    }
}

/// Whether a criterion id ("1.1.1") appears in any tag in compact form ("wcag111")
pub fn criterion_matches_tags(criterion_id: &str, tags: &[String]) -> bool {
    let compact = criterion_id.replace('.', "");
    tags.iter().any(|tag| tag.contains(&compact))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::findings::Impact;

    fn violation(id: &str, help: &str) -> AutomatedFinding {
        AutomatedFinding {
            id: id.to_string(),
            description: String::new(),
            help: help.to_string(),
            help_url: String::new(),
            impact: Impact::Serious,
            tags: vec![],
            nodes: vec![],
        }
    }

    #[test]
    fn test_known_rules_get_canned_suggestions() {
        let suggestions = fix_suggestions(&violation("color-contrast", "ignored"));
        assert_eq!(suggestions.len(), 3);
        assert!(suggestions[0].contains("contrast ratio"));

        let suggestions = fix_suggestions(&violation("image-alt", "ignored"));
        assert_eq!(suggestions[0], "Add descriptive alt text to images");
    }

    #[test]
    fn test_first_match_wins() {
        // contains both "heading" and "label"
        let rule = matching_fix_rule("empty-heading-label").unwrap();
        assert_eq!(rule.pattern, "heading");
    }

    #[test]
    fn test_unmatched_falls_back_to_help() {
        let suggestions = fix_suggestions(&violation(
            "region",
            "All page content should be contained by landmarks",
        ));
        assert_eq!(
            suggestions,
            vec!["All page content should be contained by landmarks"]
        );
    }

    #[test]
    fn test_criterion_tag_matching() {
        let tags = vec!["wcag2a".to_string(), "wcag111".to_string()];
        assert!(criterion_matches_tags("1.1.1", &tags));
        assert!(!criterion_matches_tags("1.4.3", &tags));
        assert!(!criterion_matches_tags("1.1.1", &[]));
    }
}
