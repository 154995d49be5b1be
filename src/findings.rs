// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Findings data model.
//!
//! Two families of types live here:
//!
//! - **Raw** shapes as the collaborators hand them over: the automated
//!   scanner's rule results (axe-core layout) and the judgment provider's
//!   per-criterion verdict records. Every field is optional.
//! - **Canonical** shapes produced by [`crate::normalize`], with every
//!   default resolved, which the rest of the engine works on.

use crate::catalog::WcagLevel;
use serde::{Deserialize, Deserializer, Serialize};

/// Automated severity classification, as reported by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Critical,
    Serious,
    Moderate,
    Minor,
}

impl Impact {
    /// Parse a scanner impact string; unknown tiers are `None`
    pub fn parse(value: &str) -> Option<Impact> {
        match value.trim().to_lowercase().as_str() {
            "critical" => Some(Impact::Critical),
            "serious" => Some(Impact::Serious),
            "moderate" => Some(Impact::Moderate),
            "minor" => Some(Impact::Minor),
            _ => None,
        }
    }

    /// Unified priority tier for this impact
    pub fn priority(&self) -> Priority {
        match self {
            Impact::Critical => Priority::Critical,
            Impact::Serious => Priority::High,
            Impact::Moderate => Priority::Medium,
            Impact::Minor => Priority::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Critical => "critical",
            Impact::Serious => "serious",
            Impact::Moderate => "moderate",
            Impact::Minor => "minor",
        }
    }
}

impl Default for Impact {
    fn default() -> Self {
        Impact::Moderate
    }
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified priority tier across automated and manual findings.
///
/// Variant order is the sort order of the recommendation list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Parse a priority string; unknown values are `None`
    pub fn parse(value: &str) -> Option<Priority> {
        match value.trim().to_lowercase().as_str() {
            "critical" => Some(Priority::Critical),
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a manually judged criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    Pass,
    Fail,
    Warning,
    /// The verdict could not be produced or could not be normalized
    Error,
}

impl VerdictStatus {
    /// Parse a status string; unknown values are `None`
    pub fn parse(value: &str) -> Option<VerdictStatus> {
        match value.trim().to_lowercase().as_str() {
            "pass" => Some(VerdictStatus::Pass),
            "fail" => Some(VerdictStatus::Fail),
            "warning" => Some(VerdictStatus::Warning),
            "error" => Some(VerdictStatus::Error),
            _ => None,
        }
    }

    /// Whether this verdict needs follow-up in the recommendation list
    pub fn needs_action(&self) -> bool {
        matches!(self, VerdictStatus::Fail | VerdictStatus::Warning)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictStatus::Pass => "pass",
            VerdictStatus::Fail => "fail",
            VerdictStatus::Warning => "warning",
            VerdictStatus::Error => "error",
        }
    }
}

impl Default for VerdictStatus {
    fn default() -> Self {
        VerdictStatus::Warning
    }
}

impl std::fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Raw collaborator shapes
// ============================================================================

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Automated scanner output, partitioned the way axe-core partitions it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAutomatedResults {
    #[serde(default, deserialize_with = "null_as_default")]
    pub violations: Vec<RawRuleResult>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub passes: Vec<RawRuleResult>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub incomplete: Vec<RawRuleResult>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub inapplicable: Vec<RawRuleResult>,
}

impl RawAutomatedResults {
    /// Keep only rules tagged for one of `levels`, in every partition.
    ///
    /// Mirrors axe-core's `runOnly` tag selection, so untagged and
    /// best-practice rules are dropped.
    pub fn retain_levels(&mut self, levels: &[WcagLevel]) {
        let wanted: Vec<&str> = levels.iter().map(WcagLevel::scanner_tag).collect();
        let keep =
            |rule: &RawRuleResult| rule.tags.iter().any(|tag| wanted.iter().any(|w| tag == w));
        self.violations.retain(keep);
        self.passes.retain(keep);
        self.incomplete.retain(keep);
        self.inapplicable.retain(keep);
    }
}

/// One rule result from the scanner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRuleResult {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub help: Option<String>,
    #[serde(default, rename = "helpUrl")]
    pub help_url: Option<String>,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nodes: Vec<RawNode>,
}

/// One affected DOM node inside a rule result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawNode {
    /// Selectors; nested arrays appear for iframes and shadow roots
    #[serde(default, deserialize_with = "null_as_default")]
    pub target: Vec<serde_json::Value>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default, rename = "failureSummary")]
    pub failure_summary: Option<String>,
    #[serde(default)]
    pub impact: Option<String>,
}

/// Judgment provider output: criterion id → verdict record, in evaluation order.
///
/// Records stay untyped so that one malformed record can be downgraded on
/// its own instead of failing deserialization of the whole mapping.
pub type RawManualResults = serde_json::Map<String, serde_json::Value>;

// ============================================================================
// Canonical shapes
// ============================================================================

/// An element the scanner flagged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectedElement {
    pub target: Vec<String>,
    pub html: String,
    pub failure_summary: String,
    pub impact: Option<Impact>,
}

/// A normalized automated rule result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomatedFinding {
    pub id: String,
    pub description: String,
    pub help: String,
    pub help_url: String,
    pub impact: Impact,
    pub tags: Vec<String>,
    pub nodes: Vec<AffectedElement>,
}

impl AutomatedFinding {
    /// Tags naming a WCAG criterion or level ("wcag2aa", "wcag111", ...)
    pub fn wcag_tags(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .map(String::as_str)
            .filter(|t| t.starts_with("wcag"))
    }
}

/// All four partitions of a scan, normalized
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutomatedResults {
    pub violations: Vec<AutomatedFinding>,
    pub passes: Vec<AutomatedFinding>,
    pub incomplete: Vec<AutomatedFinding>,
    pub inapplicable: Vec<AutomatedFinding>,
}

/// A normalized judgment for one criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualVerdict {
    pub criterion_id: String,
    pub title: String,
    pub level: WcagLevel,
    pub status: VerdictStatus,
    pub priority: Priority,
    /// Always within [0.0, 1.0]
    pub confidence: f64,
    pub assessment: String,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}
