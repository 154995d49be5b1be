// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Report aggregation.
//!
//! [`build_report`] is the aggregation engine: a pure function from the two
//! raw findings streams plus run metadata to one [`Report`]. It performs no
//! I/O, reads no clock and never fails. A missing stream degrades its
//! sections to `available: false`; a malformed verdict degrades to an
//! `error` verdict for that criterion only.
//!
//! Exporting a finished report lives in [`export`].

pub mod export;

use crate::catalog::WcagLevel;
use crate::classify::{
    self, ImpactSummary, LevelStatusCounts, PerLevel, PrioritySummary, StatusSummary,
};
use crate::findings::{
    AffectedElement, AutomatedFinding, AutomatedResults, Impact, ManualVerdict, Priority,
    RawAutomatedResults, RawManualResults, VerdictStatus,
};
use crate::normalize;
use crate::recommend::{self, Recommendation};
use crate::scoring::{self, ComplianceEntry, OverallStatus};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

pub const WCAG_VERSION: &str = "2.1";
pub const REPORT_VERSION: &str = "1.0";
pub const MAX_KEY_FINDINGS: usize = 5;
/// Levels reported as tested when the caller does not name any
pub const DEFAULT_LEVELS: [WcagLevel; 2] = [WcagLevel::A, WcagLevel::AA];

/// Caller-supplied metadata about one analysis run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunMeta {
    /// What was analyzed, usually a URL
    pub target: String,
    /// ISO-8601 timestamp, passed through verbatim
    pub timestamp: String,
    pub levels: Vec<WcagLevel>,
}

impl RunMeta {
    pub fn new(target: &str, timestamp: &str, levels: &[WcagLevel]) -> Self {
        Self {
            target: target.to_string(),
            timestamp: timestamp.to_string(),
            levels: levels.to_vec(),
        }
    }
}

/// Everything the aggregation engine consumes
#[derive(Debug, Clone)]
pub struct AnalysisInput {
    pub meta: RunMeta,
    /// `None` when the automated scanner did not run
    pub automated: Option<RawAutomatedResults>,
    /// `None` when no criteria were judged
    pub manual: Option<RawManualResults>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestingMethods {
    pub automated: bool,
    pub manual_ai: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMeta {
    pub target: String,
    pub timestamp: String,
    pub wcag_version: &'static str,
    pub levels_tested: Vec<WcagLevel>,
    pub testing_methods: TestingMethods,
    pub report_version: &'static str,
}

/// Executive summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Automated violations plus failed manual verdicts
    pub total_issues: usize,
    pub automated_violations: usize,
    pub manual_failures: usize,
    pub manual_warnings: usize,
    /// Manual verdicts with critical priority
    pub critical_issues: usize,
    /// Manual verdicts with high priority plus critical-impact violations
    pub high_priority_issues: usize,
    pub overall_status: OverallStatus,
    pub key_findings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutomatedDetails {
    pub total_violations: usize,
    pub impact_summary: ImpactSummary,
    pub wcag_violations: BTreeMap<String, usize>,
    pub violations: Vec<AutomatedFinding>,
    pub passes: usize,
    pub incomplete: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutomatedSection {
    pub available: bool,
    #[serde(flatten)]
    pub details: Option<AutomatedDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManualDetails {
    pub total_criteria: usize,
    pub status_summary: StatusSummary,
    pub level_summary: PerLevel<LevelStatusCounts>,
    pub priority_summary: PrioritySummary,
    pub detailed_results: Vec<ManualVerdict>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManualSection {
    pub available: bool,
    #[serde(flatten)]
    pub details: Option<ManualDetails>,
}

/// A violation laid out for the detailed findings section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedViolation {
    pub id: String,
    pub description: String,
    pub impact: Impact,
    pub help: String,
    pub help_url: String,
    pub wcag_tags: Vec<String>,
    pub affected_elements: Vec<AffectedElement>,
}

impl From<&AutomatedFinding> for FormattedViolation {
    fn from(finding: &AutomatedFinding) -> Self {
        Self {
            id: finding.id.clone(),
            description: finding.description.clone(),
            impact: finding.impact,
            help: finding.help.clone(),
            help_url: finding.help_url.clone(),
            wcag_tags: finding.tags.clone(),
            affected_elements: finding.nodes.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedFindings {
    pub automated_findings: Vec<FormattedViolation>,
    pub manual_findings: Vec<ManualVerdict>,
    /// Violation id → related manual criteria
    pub cross_references: BTreeMap<String, Vec<String>>,
}

/// The complete, immutable result of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub summary: Summary,
    pub automated_results: AutomatedSection,
    pub manual_assessment: ManualSection,
    pub wcag_compliance: PerLevel<ComplianceEntry>,
    pub recommendations: Vec<Recommendation>,
    pub detailed_findings: DetailedFindings,
    pub compliance_score: u8,
}

/// Aggregate both findings streams into a report
pub fn build_report(input: &AnalysisInput) -> Report {
    let automated = input.automated.as_ref().map(normalize::normalize_automated);
    // an empty mapping carries no verdicts and counts as absent
    let manual = input
        .manual
        .as_ref()
        .filter(|results| !results.is_empty())
        .map(normalize::normalize_manual);

    let violations: &[AutomatedFinding] = automated
        .as_ref()
        .map(|a| a.violations.as_slice())
        .unwrap_or(&[]);
    let verdicts: &[ManualVerdict] = manual.as_deref().unwrap_or(&[]);

    let compliance_score = scoring::compliance_score(automated.as_ref(), manual.as_deref());
    let overall_status = OverallStatus::from_score(compliance_score);
    debug!(score = compliance_score, status = %overall_status, "Scored run");

    let report = Report {
        meta: build_meta(input),
        summary: build_summary(violations, verdicts, overall_status),
        automated_results: automated_section(automated.as_ref()),
        manual_assessment: manual_section(manual.as_deref()),
        wcag_compliance: scoring::compliance_table(verdicts),
        recommendations: recommend::build_recommendations(violations, verdicts),
        detailed_findings: DetailedFindings {
            automated_findings: violations.iter().map(FormattedViolation::from).collect(),
            manual_findings: verdicts.to_vec(),
            cross_references: recommend::cross_references(violations, verdicts),
        },
        compliance_score,
    };

    info!(
        target_id = %report.meta.target,
        score = report.compliance_score,
        issues = report.summary.total_issues,
        recommendations = report.recommendations.len(),
        "Built accessibility report"
    );
    report
}

fn build_meta(input: &AnalysisInput) -> ReportMeta {
    let levels_tested = if input.meta.levels.is_empty() {
        DEFAULT_LEVELS.to_vec()
    } else {
        input.meta.levels.clone()
    };
    ReportMeta {
        target: input.meta.target.clone(),
        timestamp: input.meta.timestamp.clone(),
        wcag_version: WCAG_VERSION,
        levels_tested,
        testing_methods: TestingMethods {
            automated: input.automated.is_some(),
            manual_ai: input.manual.is_some(),
        },
        report_version: REPORT_VERSION,
    }
}

fn build_summary(
    violations: &[AutomatedFinding],
    verdicts: &[ManualVerdict],
    overall_status: OverallStatus,
) -> Summary {
    let statuses = classify::status_summary(verdicts);
    let priorities = classify::priority_summary(verdicts);
    let critical_violations = count_critical(violations);

    Summary {
        total_issues: violations.len() + statuses.fail,
        automated_violations: violations.len(),
        manual_failures: statuses.fail,
        manual_warnings: statuses.warning,
        critical_issues: priorities.critical,
        high_priority_issues: priorities.high + critical_violations,
        overall_status,
        key_findings: key_findings(violations, verdicts),
    }
}

fn count_critical(violations: &[AutomatedFinding]) -> usize {
    violations
        .iter()
        .filter(|v| v.impact == Impact::Critical)
        .count()
}

/// Up to five headline strings, in fixed precedence order
pub fn key_findings(violations: &[AutomatedFinding], verdicts: &[ManualVerdict]) -> Vec<String> {
    let mut findings = Vec::new();

    let critical = count_critical(violations);
    if critical > 0 {
        findings.push(format!("{} critical accessibility violations found", critical));
    }

    let high_priority = verdicts
        .iter()
        .filter(|v| v.priority == Priority::High)
        .count();
    if high_priority > 0 {
        findings.push(format!(
            "{} high-priority WCAG compliance issues",
            high_priority
        ));
    }

    if critical == 0 && high_priority == 0 {
        findings.push("No critical accessibility issues detected".to_string());
    }

    if verdicts
        .iter()
        .any(|v| v.criterion_id == "1.1.1" && v.status == VerdictStatus::Fail)
    {
        findings.push("Image accessibility needs attention".to_string());
    }

    findings.truncate(MAX_KEY_FINDINGS);
    findings
}

fn automated_section(automated: Option<&AutomatedResults>) -> AutomatedSection {
    let Some(results) = automated else {
        return AutomatedSection {
            available: false,
            details: None,
        };
    };
    AutomatedSection {
        available: true,
        details: Some(AutomatedDetails {
            total_violations: results.violations.len(),
            impact_summary: classify::impact_summary(&results.violations),
            wcag_violations: classify::wcag_tag_counts(&results.violations),
            violations: results.violations.clone(),
            passes: results.passes.len(),
            incomplete: results.incomplete.len(),
        }),
    }
}

fn manual_section(verdicts: Option<&[ManualVerdict]>) -> ManualSection {
    let Some(verdicts) = verdicts else {
        return ManualSection {
            available: false,
            details: None,
        };
    };
    ManualSection {
        available: true,
        details: Some(ManualDetails {
            total_criteria: verdicts.len(),
            status_summary: classify::status_summary(verdicts),
            level_summary: classify::level_summary(verdicts),
            priority_summary: classify::priority_summary(verdicts),
            detailed_results: verdicts.to_vec(),
        }),
    }
}
