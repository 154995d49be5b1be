// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Prioritized recommendations and automated/manual cross-references.

use crate::catalog::WcagLevel;
use crate::findings::{AutomatedFinding, ManualVerdict, Priority};
use crate::rules;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Remediation entry derived from an automated violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomatedRecommendation {
    pub rule_id: String,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    /// Number of flagged elements
    pub affected_elements: usize,
    pub wcag_reference: Vec<String>,
    pub help_url: String,
    pub fix_suggestions: Vec<String>,
}

/// Remediation entry derived from a failed or warned manual verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualRecommendation {
    pub criterion_id: String,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub wcag_level: WcagLevel,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Recommendation {
    Automated(AutomatedRecommendation),
    Manual(ManualRecommendation),
}

impl Recommendation {
    pub fn priority(&self) -> Priority {
        match self {
            Recommendation::Automated(r) => r.priority,
            Recommendation::Manual(r) => r.priority,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Recommendation::Automated(r) => &r.title,
            Recommendation::Manual(r) => &r.title,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Recommendation::Automated(r) => &r.description,
            Recommendation::Manual(r) => &r.description,
        }
    }

    /// "automated" or "manual"
    pub fn kind(&self) -> &'static str {
        match self {
            Recommendation::Automated(_) => "automated",
            Recommendation::Manual(_) => "manual",
        }
    }

    /// Actionable steps: fix suggestions or the verdict's own recommendations
    pub fn actions(&self) -> &[String] {
        match self {
            Recommendation::Automated(r) => &r.fix_suggestions,
            Recommendation::Manual(r) => &r.recommendations,
        }
    }
}

impl From<&AutomatedFinding> for Recommendation {
    fn from(violation: &AutomatedFinding) -> Self {
        Recommendation::Automated(AutomatedRecommendation {
            rule_id: violation.id.clone(),
            priority: violation.impact.priority(),
            title: violation.description.clone(),
            description: violation.help.clone(),
            affected_elements: violation.nodes.len(),
            wcag_reference: violation.tags.clone(),
            help_url: violation.help_url.clone(),
            fix_suggestions: rules::fix_suggestions(violation),
        })
    }
}

impl From<&ManualVerdict> for Recommendation {
    fn from(verdict: &ManualVerdict) -> Self {
        Recommendation::Manual(ManualRecommendation {
            criterion_id: verdict.criterion_id.clone(),
            priority: verdict.priority,
            title: format!("{}: {}", verdict.criterion_id, verdict.title),
            description: verdict.assessment.clone(),
            wcag_level: verdict.level,
            issues: verdict.issues.clone(),
            recommendations: verdict.recommendations.clone(),
            confidence: verdict.confidence,
        })
    }
}

/// Every violation and every failed or warned verdict, most urgent first.
///
/// Within a priority tier, automated entries keep scan order and precede
/// manual entries, which keep verdict order.
pub fn build_recommendations(
    violations: &[AutomatedFinding],
    verdicts: &[ManualVerdict],
) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = violations
        .iter()
        .map(Recommendation::from)
        .chain(
            verdicts
                .iter()
                .filter(|v| v.status.needs_action())
                .map(Recommendation::from),
        )
        .collect();
    // stable: ties keep insertion order
    recommendations.sort_by_key(Recommendation::priority);
    recommendations
}

/// Violation id → manual criteria whose compact id appears in its tags
pub fn cross_references(
    violations: &[AutomatedFinding],
    verdicts: &[ManualVerdict],
) -> BTreeMap<String, Vec<String>> {
    let mut references = BTreeMap::new();
    for violation in violations {
        let related: Vec<String> = verdicts
            .iter()
            .filter(|v| rules::criterion_matches_tags(&v.criterion_id, &violation.tags))
            .map(|v| v.criterion_id.clone())
            .collect();
        if !related.is_empty() {
            references.insert(violation.id.clone(), related);
        }
    }
    references
}
