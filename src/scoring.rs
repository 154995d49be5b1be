// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Compliance scoring.
//!
//! The score blends the manual pass rate (70%) with the automated pass
//! rate (30%) when both sources ran, and uses whichever one ran otherwise.
//! Rounding is half-up throughout.

use crate::catalog::WcagLevel;
use crate::classify::PerLevel;
use crate::findings::{AutomatedResults, ManualVerdict, VerdictStatus};
use serde::{Deserialize, Serialize};

pub const MANUAL_WEIGHT: f64 = 0.7;
pub const AUTOMATED_WEIGHT: f64 = 0.3;

/// Overall status band for a compliance score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallStatus {
    Excellent,
    Good,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
    Poor,
}

impl OverallStatus {
    /// Bands are inclusive at their lower bound
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => OverallStatus::Excellent,
            75..=89 => OverallStatus::Good,
            50..=74 => OverallStatus::NeedsImprovement,
            _ => OverallStatus::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OverallStatus::Excellent => "Excellent",
            OverallStatus::Good => "Good",
            OverallStatus::NeedsImprovement => "Needs Improvement",
            OverallStatus::Poor => "Poor",
        }
    }
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Percentage of manual verdicts that passed; 0 without verdicts
pub fn manual_score(verdicts: &[ManualVerdict]) -> f64 {
    if verdicts.is_empty() {
        return 0.0;
    }
    let passed = verdicts
        .iter()
        .filter(|v| v.status == VerdictStatus::Pass)
        .count();
    passed as f64 / verdicts.len() as f64 * 100.0
}

/// Percentage of evaluated rules that passed.
///
/// A missing scan, or one with no passes and no violations, scores 100.
pub fn automated_score(automated: Option<&AutomatedResults>) -> f64 {
    let Some(results) = automated else {
        return 100.0;
    };
    let passes = results.passes.len();
    let total = passes + results.violations.len();
    if total == 0 {
        return 100.0;
    }
    passes as f64 / total as f64 * 100.0
}

/// Integer compliance score in [0, 100].
///
/// `manual` is `None` when no judgment results are available.
pub fn compliance_score(
    automated: Option<&AutomatedResults>,
    manual: Option<&[ManualVerdict]>,
) -> u8 {
    let overall = match (automated, manual) {
        (None, None) => return 0,
        (Some(_), Some(verdicts)) => {
            manual_score(verdicts) * MANUAL_WEIGHT + automated_score(automated) * AUTOMATED_WEIGHT
        }
        (None, Some(verdicts)) => manual_score(verdicts),
        (Some(_), None) => automated_score(automated),
    };
    overall.round().clamp(0.0, 100.0) as u8
}

/// Round to one decimal place, half-up
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Per-level compliance entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceEntry {
    pub total: usize,
    pub pass: usize,
    /// Everything that is not a pass: fail, warning and error
    pub fail: usize,
    pub compliance_rate: f64,
}

/// Per-level compliance table, built from manual verdicts only
pub fn compliance_table(verdicts: &[ManualVerdict]) -> PerLevel<ComplianceEntry> {
    let mut table = PerLevel::<ComplianceEntry>::default();
    for verdict in verdicts {
        let entry = table.get_mut(verdict.level);
        entry.total += 1;
        if verdict.status == VerdictStatus::Pass {
            entry.pass += 1;
        } else {
            entry.fail += 1;
        }
    }
    for level in WcagLevel::ALL {
        let entry = table.get_mut(level);
        if entry.total > 0 {
            entry.compliance_rate =
                round_to_tenth(entry.pass as f64 / entry.total as f64 * 100.0);
        }
    }
    table
}
