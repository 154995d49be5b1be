// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Findings normalizer.
//!
//! Converts the raw scanner output and raw judgment records into canonical
//! findings, resolving every default in one place. Nothing here fails: a
//! verdict that cannot be coerced becomes an `error` verdict for its
//! criterion and the remaining verdicts are unaffected.

use crate::catalog::{self, WcagLevel};
use crate::findings::{
    AffectedElement, AutomatedFinding, AutomatedResults, Impact, ManualVerdict, Priority,
    RawAutomatedResults, RawManualResults, RawNode, RawRuleResult, VerdictStatus,
};
use serde_json::Value;
use tracing::{debug, warn};

pub const DEFAULT_CONFIDENCE: f64 = 0.5;
pub const DEFAULT_ASSESSMENT: &str = "Assessment not available";
pub const UNKNOWN_RULE_ID: &str = "unknown";
const DEFAULT_DESCRIPTION: &str = "Unknown issue";
const DEFAULT_HELP: &str = "Review the element and apply accessibility best practices";
const UNKNOWN_CRITERION_TITLE: &str = "Unknown criteria";

/// Normalize every partition of a scan
pub fn normalize_automated(raw: &RawAutomatedResults) -> AutomatedResults {
    let results = AutomatedResults {
        violations: raw.violations.iter().map(normalize_rule).collect(),
        passes: raw.passes.iter().map(normalize_rule).collect(),
        incomplete: raw.incomplete.iter().map(normalize_rule).collect(),
        inapplicable: raw.inapplicable.iter().map(normalize_rule).collect(),
    };
    debug!(
        violations = results.violations.len(),
        passes = results.passes.len(),
        incomplete = results.incomplete.len(),
        "Normalized automated results"
    );
    results
}

fn normalize_rule(raw: &RawRuleResult) -> AutomatedFinding {
    AutomatedFinding {
        id: raw.id.clone().unwrap_or_else(|| UNKNOWN_RULE_ID.to_string()),
        description: raw
            .description
            .clone()
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        help: raw.help.clone().unwrap_or_else(|| DEFAULT_HELP.to_string()),
        help_url: raw.help_url.clone().unwrap_or_default(),
        impact: raw
            .impact
            .as_deref()
            .and_then(Impact::parse)
            .unwrap_or_default(),
        tags: raw.tags.clone(),
        nodes: raw.nodes.iter().map(normalize_node).collect(),
    }
}

fn normalize_node(raw: &RawNode) -> AffectedElement {
    AffectedElement {
        target: raw.target.iter().map(selector_text).collect(),
        html: raw.html.clone().unwrap_or_default(),
        failure_summary: raw.failure_summary.clone().unwrap_or_default(),
        impact: raw.impact.as_deref().and_then(Impact::parse),
    }
}

/// Flatten a selector entry; nested frame/shadow paths are joined in order
fn selector_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(parts) => parts
            .iter()
            .map(selector_text)
            .collect::<Vec<_>>()
            .join(" >>> "),
        other => other.to_string(),
    }
}

/// Normalize all verdicts, keeping the mapping's order
pub fn normalize_manual(raw: &RawManualResults) -> Vec<ManualVerdict> {
    raw.iter()
        .map(|(criterion_id, record)| normalize_verdict(criterion_id, record))
        .collect()
}

/// Normalize a single judgment record
pub fn normalize_verdict(criterion_id: &str, record: &Value) -> ManualVerdict {
    match try_normalize_verdict(criterion_id, record) {
        Ok(verdict) => verdict,
        Err(reason) => {
            warn!(criterion = criterion_id, %reason, "Downgrading malformed verdict to error");
            error_verdict(criterion_id, record, &reason)
        }
    }
}

fn try_normalize_verdict(criterion_id: &str, record: &Value) -> Result<ManualVerdict, String> {
    let fields = record
        .as_object()
        .ok_or_else(|| format!("expected an object, got {}", json_kind(record)))?;

    let confidence = coerce_confidence(fields.get("confidence"))?;
    let status = fields
        .get("status")
        .and_then(Value::as_str)
        .and_then(VerdictStatus::parse)
        .unwrap_or_default();
    let priority = fields
        .get("priority")
        .and_then(Value::as_str)
        .and_then(Priority::parse)
        .unwrap_or_default();

    let assessment = match fields.get("assessment") {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => match fields.get("error").and_then(Value::as_str) {
            Some(error) if status == VerdictStatus::Error => error.to_string(),
            _ => DEFAULT_ASSESSMENT.to_string(),
        },
        Some(other) => other.to_string(),
    };

    let (level, title) = resolve_identity(criterion_id, record);

    Ok(ManualVerdict {
        criterion_id: criterion_id.to_string(),
        title,
        level,
        status,
        priority,
        confidence,
        assessment,
        issues: coerce_list(fields.get("issues")),
        recommendations: coerce_list(fields.get("recommendations")),
    })
}

fn error_verdict(criterion_id: &str, record: &Value, reason: &str) -> ManualVerdict {
    let (level, title) = resolve_identity(criterion_id, record);
    ManualVerdict {
        criterion_id: criterion_id.to_string(),
        title,
        level,
        status: VerdictStatus::Error,
        priority: Priority::Medium,
        confidence: 0.0,
        assessment: format!("Verdict could not be normalized: {}", reason),
        issues: vec!["Verdict normalization failed".to_string()],
        recommendations: vec!["Manual review required".to_string()],
    }
}

/// Level and title: catalog first, then the record's own copies
fn resolve_identity(criterion_id: &str, record: &Value) -> (WcagLevel, String) {
    if let Some(criterion) = catalog::lookup(criterion_id) {
        return (criterion.level, criterion.title.to_string());
    }
    let level = record
        .get("level")
        .and_then(Value::as_str)
        .and_then(|l| l.parse().ok())
        .unwrap_or(WcagLevel::A);
    let title = record
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_CRITERION_TITLE)
        .to_string();
    (level, title)
}

fn coerce_confidence(value: Option<&Value>) -> Result<f64, String> {
    let raw = match value {
        None => return Ok(DEFAULT_CONFIDENCE),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| format!("confidence {} is not representable", n))?,
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("confidence {:?} is not a number", s))?,
        Some(other) => {
            return Err(format!("confidence is {}, not a number", json_kind(other)));
        }
    };
    if !raw.is_finite() {
        return Err(format!("confidence {} is not finite", raw));
    }
    Ok(raw.clamp(0.0, 1.0))
}

fn coerce_list(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(value_text).collect(),
        Some(other) => vec![value_text(other)],
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_record_passes_through() {
        let verdict = normalize_verdict(
            "1.1.1",
            &json!({
                "status": "Fail",
                "confidence": 0.9,
                "assessment": "Hero image has no alternative",
                "issues": ["hero.jpg missing alt"],
                "recommendations": ["Describe the hero image"],
                "priority": "HIGH"
            }),
        );
        assert_eq!(verdict.status, VerdictStatus::Fail);
        assert_eq!(verdict.priority, Priority::High);
        assert_eq!(verdict.level, WcagLevel::A);
        assert_eq!(verdict.title, "Non-text Content");
        assert_eq!(verdict.issues, vec!["hero.jpg missing alt"]);
        assert!((verdict.confidence - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let verdict = normalize_verdict("2.4.6", &json!({}));
        assert_eq!(verdict.status, VerdictStatus::Warning);
        assert_eq!(verdict.priority, Priority::Medium);
        assert_eq!(verdict.confidence, DEFAULT_CONFIDENCE);
        assert_eq!(verdict.assessment, DEFAULT_ASSESSMENT);
        assert!(verdict.issues.is_empty());
        assert!(verdict.recommendations.is_empty());
        assert_eq!(verdict.level, WcagLevel::AA);
    }

    #[test]
    fn test_invalid_enumerations_are_coerced() {
        let verdict = normalize_verdict(
            "1.3.1",
            &json!({"status": "unclear", "priority": "urgent", "confidence": 0.4}),
        );
        assert_eq!(verdict.status, VerdictStatus::Warning);
        assert_eq!(verdict.priority, Priority::Medium);
    }

    #[test]
    fn test_confidence_is_clamped() {
        let high = normalize_verdict("1.3.1", &json!({"confidence": 3.5}));
        let low = normalize_verdict("1.3.1", &json!({"confidence": -1}));
        let text = normalize_verdict("1.3.1", &json!({"confidence": " 0.25 "}));
        assert_eq!(high.confidence, 1.0);
        assert_eq!(low.confidence, 0.0);
        assert_eq!(text.confidence, 0.25);
    }

    #[test]
    fn test_non_numeric_confidence_becomes_error_verdict() {
        let verdict = normalize_verdict(
            "2.1.1",
            &json!({"status": "pass", "confidence": "very sure"}),
        );
        assert_eq!(verdict.status, VerdictStatus::Error);
        assert_eq!(verdict.criterion_id, "2.1.1");
        assert_eq!(verdict.confidence, 0.0);
        assert_eq!(verdict.title, "Keyboard");
        assert!(verdict.assessment.contains("very sure"));
    }

    #[test]
    fn test_null_confidence_and_non_object_are_errors() {
        assert_eq!(
            normalize_verdict("2.1.1", &json!({"confidence": null})).status,
            VerdictStatus::Error
        );
        assert_eq!(
            normalize_verdict("2.1.1", &json!("pass")).status,
            VerdictStatus::Error
        );
    }

    #[test]
    fn test_scalar_lists_are_wrapped() {
        let verdict = normalize_verdict(
            "1.3.1",
            &json!({"issues": "Tables lack headers", "recommendations": [1, "Add th"]}),
        );
        assert_eq!(verdict.issues, vec!["Tables lack headers"]);
        assert_eq!(verdict.recommendations, vec!["1", "Add th"]);
    }

    #[test]
    fn test_provider_error_record_keeps_message() {
        let verdict = normalize_verdict(
            "3.3.1",
            &json!({"status": "error", "error": "provider timed out", "level": "A"}),
        );
        assert_eq!(verdict.status, VerdictStatus::Error);
        assert_eq!(verdict.assessment, "provider timed out");
    }

    #[test]
    fn test_unknown_criterion_uses_record_identity() {
        let verdict = normalize_verdict(
            "2.5.3",
            &json!({"status": "pass", "level": "aaa", "title": "Label in Name"}),
        );
        assert_eq!(verdict.level, WcagLevel::AAA);
        assert_eq!(verdict.title, "Label in Name");

        let bare = normalize_verdict("9.9.9", &json!({"level": "Z"}));
        assert_eq!(bare.level, WcagLevel::A);
        assert_eq!(bare.title, "Unknown criteria");
    }

    #[test]
    fn test_manual_order_is_preserved() {
        let raw: RawManualResults = serde_json::from_value(json!({
            "4.1.2": {"status": "pass"},
            "1.1.1": {"status": "fail"},
            "2.4.2": {"status": "warning"}
        }))
        .unwrap();
        let ids: Vec<_> = normalize_manual(&raw)
            .into_iter()
            .map(|v| v.criterion_id)
            .collect();
        assert_eq!(ids, vec!["4.1.2", "1.1.1", "2.4.2"]);
    }

    #[test]
    fn test_automated_defaults() {
        let raw: RawAutomatedResults = serde_json::from_value(json!({
            "violations": [{
                "nodes": [{"target": ["#main", ["iframe", "button"]]}]
            }]
        }))
        .unwrap();
        let results = normalize_automated(&raw);
        let finding = &results.violations[0];
        assert_eq!(finding.id, UNKNOWN_RULE_ID);
        assert_eq!(finding.impact, Impact::Moderate);
        assert!(finding.tags.is_empty());
        assert_eq!(finding.nodes[0].target, vec!["#main", "iframe >>> button"]);
        assert!(finding.nodes[0].impact.is_none());
    }

    #[test]
    fn test_unknown_impact_coerces_to_moderate() {
        let raw: RawAutomatedResults = serde_json::from_value(json!({
            "violations": [{"id": "region", "impact": "catastrophic"}]
        }))
        .unwrap();
        assert_eq!(normalize_automated(&raw).violations[0].impact, Impact::Moderate);
    }
}
