// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Categorical tallies over normalized findings.
//!
//! Pure counting: results do not depend on input order.

use crate::catalog::WcagLevel;
use crate::findings::{AutomatedFinding, Impact, ManualVerdict, Priority, VerdictStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One value per WCAG level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerLevel<T> {
    #[serde(rename = "A")]
    pub a: T,
    #[serde(rename = "AA")]
    pub aa: T,
    #[serde(rename = "AAA")]
    pub aaa: T,
}

impl<T> PerLevel<T> {
    pub fn get(&self, level: WcagLevel) -> &T {
        match level {
            WcagLevel::A => &self.a,
            WcagLevel::AA => &self.aa,
            WcagLevel::AAA => &self.aaa,
        }
    }

    pub fn get_mut(&mut self, level: WcagLevel) -> &mut T {
        match level {
            WcagLevel::A => &mut self.a,
            WcagLevel::AA => &mut self.aa,
            WcagLevel::AAA => &mut self.aaa,
        }
    }
}

/// Violation counts by impact tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactSummary {
    pub critical: usize,
    pub serious: usize,
    pub moderate: usize,
    pub minor: usize,
}

impl ImpactSummary {
    fn record(&mut self, impact: Impact) {
        match impact {
            Impact::Critical => self.critical += 1,
            Impact::Serious => self.serious += 1,
            Impact::Moderate => self.moderate += 1,
            Impact::Minor => self.minor += 1,
        }
    }
}

/// Verdict counts by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub pass: usize,
    pub fail: usize,
    pub warning: usize,
    pub error: usize,
}

/// Verdict counts by status within one level; errors are not cross-tabulated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelStatusCounts {
    pub pass: usize,
    pub fail: usize,
    pub warning: usize,
}

/// Verdict counts by priority tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrioritySummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

pub fn impact_summary(violations: &[AutomatedFinding]) -> ImpactSummary {
    let mut summary = ImpactSummary::default();
    for violation in violations {
        summary.record(violation.impact);
    }
    summary
}

/// Count violations per `wcag*` tag
pub fn wcag_tag_counts(violations: &[AutomatedFinding]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for tag in violations.iter().flat_map(AutomatedFinding::wcag_tags) {
        *counts.entry(tag.to_string()).or_insert(0) += 1;
    }
    counts
}

pub fn status_summary(verdicts: &[ManualVerdict]) -> StatusSummary {
    let mut summary = StatusSummary::default();
    for verdict in verdicts {
        match verdict.status {
            VerdictStatus::Pass => summary.pass += 1,
            VerdictStatus::Fail => summary.fail += 1,
            VerdictStatus::Warning => summary.warning += 1,
            VerdictStatus::Error => summary.error += 1,
        }
    }
    summary
}

pub fn level_summary(verdicts: &[ManualVerdict]) -> PerLevel<LevelStatusCounts> {
    let mut summary = PerLevel::<LevelStatusCounts>::default();
    for verdict in verdicts {
        let counts = summary.get_mut(verdict.level);
        match verdict.status {
            VerdictStatus::Pass => counts.pass += 1,
            VerdictStatus::Fail => counts.fail += 1,
            VerdictStatus::Warning => counts.warning += 1,
            VerdictStatus::Error => {}
        }
    }
    summary
}

pub fn priority_summary(verdicts: &[ManualVerdict]) -> PrioritySummary {
    let mut summary = PrioritySummary::default();
    for verdict in verdicts {
        match verdict.priority {
            Priority::Critical => summary.critical += 1,
            Priority::High => summary.high += 1,
            Priority::Medium => summary.medium += 1,
            Priority::Low => summary.low += 1,
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(impact: Impact, tags: &[&str]) -> AutomatedFinding {
        AutomatedFinding {
            id: "rule".to_string(),
            description: String::new(),
            help: String::new(),
            help_url: String::new(),
            impact,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            nodes: vec![],
        }
    }

    fn verdict(level: WcagLevel, status: VerdictStatus, priority: Priority) -> ManualVerdict {
        ManualVerdict {
            criterion_id: "1.1.1".to_string(),
            title: String::new(),
            level,
            status,
            priority,
            confidence: 0.5,
            assessment: String::new(),
            issues: vec![],
            recommendations: vec![],
        }
    }

    #[test]
    fn test_impact_and_tag_counts() {
        let violations = vec![
            violation(Impact::Critical, &["wcag2a", "wcag111", "cat.text-alternatives"]),
            violation(Impact::Critical, &["wcag2a", "best-practice"]),
            violation(Impact::Minor, &["wcag2aa"]),
        ];
        let impacts = impact_summary(&violations);
        assert_eq!(impacts.critical, 2);
        assert_eq!(impacts.minor, 1);
        assert_eq!(impacts.serious, 0);

        let tags = wcag_tag_counts(&violations);
        assert_eq!(tags.get("wcag2a"), Some(&2));
        assert_eq!(tags.get("wcag111"), Some(&1));
        assert!(!tags.contains_key("best-practice"));
    }

    #[test]
    fn test_manual_cross_tab() {
        let verdicts = vec![
            verdict(WcagLevel::A, VerdictStatus::Pass, Priority::Low),
            verdict(WcagLevel::A, VerdictStatus::Fail, Priority::Critical),
            verdict(WcagLevel::AA, VerdictStatus::Warning, Priority::High),
            verdict(WcagLevel::AA, VerdictStatus::Error, Priority::Medium),
        ];
        let status = status_summary(&verdicts);
        assert_eq!(
            status,
            StatusSummary { pass: 1, fail: 1, warning: 1, error: 1 }
        );

        let levels = level_summary(&verdicts);
        assert_eq!(levels.a, LevelStatusCounts { pass: 1, fail: 1, warning: 0 });
        assert_eq!(levels.aa, LevelStatusCounts { pass: 0, fail: 0, warning: 1 });
        assert_eq!(levels.aaa, LevelStatusCounts::default());

        let priorities = priority_summary(&verdicts);
        assert_eq!(priorities.critical, 1);
        assert_eq!(priorities.high, 1);
        assert_eq!(priorities.medium, 1);
        assert_eq!(priorities.low, 1);
    }

    #[test]
    fn test_per_level_serializes_with_level_keys() {
        let json = serde_json::to_value(PerLevel::<LevelStatusCounts>::default()).unwrap();
        assert!(json.get("A").is_some());
        assert!(json.get("AA").is_some());
        assert!(json.get("AAA").is_some());
    }
}
