// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Report export.
//!
//! Supports multiple output formats:
//! - JSON: the full report, pretty-printed
//! - HTML: standalone page for sharing with stakeholders
//! - CSV: one row per recommendation, for issue trackers and spreadsheets
//! - Text: human-readable console report

use super::Report;
use crate::catalog::WcagLevel;
use crate::error::{AuditError, Result};
use crate::recommend::Recommendation;

/// Recommendations shown in the HTML export
pub const HTML_RECOMMENDATION_LIMIT: usize = 10;
/// Longest CSV description before truncation
pub const CSV_DESCRIPTION_LIMIT: usize = 200;

const CSV_HEADER: [&str; 6] = ["Type", "Priority", "Title", "Description", "WCAG Level", "Status"];

/// Export format for a finished report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Html,
    Csv,
    Text,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Html => write!(f, "html"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = AuditError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "html" => Ok(ExportFormat::Html),
            "csv" => Ok(ExportFormat::Csv),
            "text" => Ok(ExportFormat::Text),
            other => Err(AuditError::UnsupportedExportFormat(other.to_string())),
        }
    }
}

/// Render a report in the requested format
pub fn export_report(report: &Report, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        ExportFormat::Html => generate_html_report(report),
        ExportFormat::Csv => Ok(generate_csv_report(report)),
        ExportFormat::Text => Ok(generate_text_report(report)),
    }
}

/// Render by format name; unknown names are rejected
pub fn export_report_as(report: &Report, format: &str) -> Result<String> {
    export_report(report, format.parse()?)
}

fn levels_label(levels: &[WcagLevel]) -> String {
    levels
        .iter()
        .map(WcagLevel::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// HTML
// ============================================================================

const HTML_STYLE: &str = "
    body { font-family: Arial, sans-serif; line-height: 1.6; margin: 40px; }
    .header { background: #f8f9fa; padding: 20px; border-radius: 8px; margin-bottom: 30px; }
    .summary { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; margin-bottom: 30px; }
    .metric { background: white; padding: 15px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
    .recommendation { background: #fff5f5; border-left: 4px solid #dc3545; padding: 15px; margin: 10px 0; }
    .priority-critical { border-left-color: #dc3545; }
    .priority-high { border-left-color: #fd7e14; }
    .priority-medium { border-left-color: #ffc107; }
    .priority-low { border-left-color: #28a745; }
    .score { font-size: 2em; font-weight: bold; }
    table { width: 100%; border-collapse: collapse; margin: 20px 0; }
    th, td { padding: 12px; text-align: left; border-bottom: 1px solid #ddd; }
    th { background-color: #f8f9fa; }
";

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn generate_html_report(report: &Report) -> Result<String> {
    let meta = &report.meta;
    let summary = &report.summary;
    let mut html = String::new();

    html.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>Accessibility Report - {}</title>\n<style>{}</style>\n</head>\n<body>\n",
        escape_html(&meta.target),
        HTML_STYLE
    ));

    html.push_str(&format!(
        "<div class=\"header\">\n<h1>Web Accessibility Report</h1>\n\
         <p><strong>Target:</strong> {}</p>\n\
         <p><strong>Generated:</strong> {}</p>\n\
         <p><strong>WCAG Version:</strong> {}</p>\n\
         <p><strong>Levels Tested:</strong> {}</p>\n</div>\n",
        escape_html(&meta.target),
        escape_html(&meta.timestamp),
        escape_html(meta.wcag_version),
        escape_html(&levels_label(&meta.levels_tested)),
    ));

    html.push_str("<div class=\"summary\">\n");
    for (label, value) in [
        ("Compliance Score", format!("{}%", report.compliance_score)),
        ("Overall Status", summary.overall_status.to_string()),
        ("Total Issues", summary.total_issues.to_string()),
        ("Critical Issues", summary.critical_issues.to_string()),
    ] {
        html.push_str(&format!(
            "<div class=\"metric\"><h3>{}</h3><div class=\"score\">{}</div></div>\n",
            label,
            escape_html(&value)
        ));
    }
    html.push_str("</div>\n");

    html.push_str("<h2>Key Findings</h2>\n<ul>\n");
    for finding in &summary.key_findings {
        html.push_str(&format!("<li>{}</li>\n", escape_html(finding)));
    }
    html.push_str("</ul>\n");

    html.push_str(
        "<h2>WCAG Compliance Summary</h2>\n<table>\n<tr><th>Level</th><th>Total Criteria</th>\
         <th>Passed</th><th>Failed</th><th>Compliance Rate</th></tr>\n",
    );
    for level in WcagLevel::ALL {
        let entry = report.wcag_compliance.get(level);
        html.push_str(&format!(
            "<tr><td>WCAG {}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.1}%</td></tr>\n",
            level, entry.total, entry.pass, entry.fail, entry.compliance_rate
        ));
    }
    html.push_str("</table>\n");

    html.push_str("<h2>Recommendations</h2>\n");
    for rec in report.recommendations.iter().take(HTML_RECOMMENDATION_LIMIT) {
        html.push_str(&recommendation_html(rec));
    }

    let details = serde_json::to_string_pretty(&report.detailed_findings)?;
    html.push_str(&format!(
        "<h2>Detailed Findings</h2>\n<pre>{}</pre>\n</body>\n</html>\n",
        escape_html(&details)
    ));

    Ok(html)
}

fn recommendation_html(rec: &Recommendation) -> String {
    let priority = rec.priority();
    let mut block = format!(
        "<div class=\"recommendation priority-{}\">\n<h4>{}</h4>\n\
         <p><strong>Priority:</strong> {}</p>\n<p>{}</p>\n",
        priority,
        escape_html(rec.title()),
        title_case(priority.as_str()),
        escape_html(rec.description())
    );
    let actions = rec.actions();
    if !actions.is_empty() {
        block.push_str("<p><strong>Recommendations:</strong></p>\n<ul>\n");
        for action in actions {
            block.push_str(&format!("<li>{}</li>\n", escape_html(action)));
        }
        block.push_str("</ul>\n");
    }
    block.push_str("</div>\n");
    block
}

// ============================================================================
// CSV
// ============================================================================

/// Quote a CSV field when it contains a delimiter, quote or line break
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_row(fields: &[&str]) -> String {
    let mut row = fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",");
    row.push_str("\r\n");
    row
}

fn truncate_description(description: &str) -> String {
    if description.chars().count() > CSV_DESCRIPTION_LIMIT {
        let head: String = description.chars().take(CSV_DESCRIPTION_LIMIT).collect();
        format!("{}...", head)
    } else {
        description.to_string()
    }
}

fn generate_csv_report(report: &Report) -> String {
    let mut output = csv_row(&CSV_HEADER);
    for rec in &report.recommendations {
        let (level, status) = match rec {
            Recommendation::Manual(m) => (m.wcag_level.as_str(), "Issue"),
            Recommendation::Automated(_) => ("", "Violation"),
        };
        let description = truncate_description(rec.description());
        output.push_str(&csv_row(&[
            rec.kind(),
            rec.priority().as_str(),
            rec.title(),
            &description,
            level,
            status,
        ]));
    }
    output
}

// ============================================================================
// Text
// ============================================================================

fn generate_text_report(report: &Report) -> String {
    let mut output = String::new();
    let meta = &report.meta;
    let summary = &report.summary;

    output.push_str("=== WCAG Accessibility Report ===\n\n");
    output.push_str(&format!("Target:    {}\n", meta.target));
    output.push_str(&format!("Generated: {}\n", meta.timestamp));
    output.push_str(&format!(
        "WCAG {} levels tested: {}\n\n",
        meta.wcag_version,
        levels_label(&meta.levels_tested)
    ));

    output.push_str(&format!(
        "Compliance score: {}% ({})\n",
        report.compliance_score, summary.overall_status
    ));
    output.push_str(&format!(
        "Found {} issue(s): {} automated violation(s), {} manual failure(s), {} warning(s)\n\n",
        summary.total_issues,
        summary.automated_violations,
        summary.manual_failures,
        summary.manual_warnings
    ));

    output.push_str("--- Key findings ---\n");
    for finding in &summary.key_findings {
        output.push_str(&format!("* {}\n", finding));
    }
    output.push('\n');

    if !report.manual_assessment.available {
        output.push_str("Manual assessment: not available\n");
    }
    if !report.automated_results.available {
        output.push_str("Automated scan: not available\n");
    }

    output.push_str("--- Compliance by level ---\n");
    for level in WcagLevel::ALL {
        let entry = report.wcag_compliance.get(level);
        if entry.total == 0 {
            continue;
        }
        output.push_str(&format!(
            "Level {:<3} {}/{} passed ({:.1}%)\n",
            level.as_str(),
            entry.pass,
            entry.total,
            entry.compliance_rate
        ));
    }
    output.push('\n');

    if report.recommendations.is_empty() {
        output.push_str("No recommendations. All checks passed.\n");
        return output;
    }

    output.push_str(&format!(
        "--- Recommendations ({}) ---\n",
        report.recommendations.len()
    ));
    for rec in &report.recommendations {
        output.push_str(&format!("[{}] {}\n", rec.priority(), rec.title()));
        if !rec.description().is_empty() {
            output.push_str(&format!("  {}\n", rec.description()));
        }
        match rec {
            Recommendation::Automated(a) => {
                output.push_str(&format!("  Affects: {} element(s)\n", a.affected_elements));
            }
            Recommendation::Manual(m) => {
                output.push_str(&format!(
                    "  WCAG: {} (Level {}), confidence {:.2}\n",
                    m.criterion_id, m.wcag_level, m.confidence
                ));
            }
        }
        for action in rec.actions() {
            output.push_str(&format!("  Fix: {}\n", action));
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{build_report, AnalysisInput, RunMeta};
    use serde_json::json;

    fn sample_report() -> Report {
        build_report(&AnalysisInput {
            meta: RunMeta::new(
                "https://example.org/?q=<script>",
                "2026-10-18T09:00:00Z",
                &[WcagLevel::A, WcagLevel::AA],
            ),
            automated: Some(
                serde_json::from_value(json!({
                    "violations": [{
                        "id": "image-alt",
                        "impact": "critical",
                        "description": "Images must have alternate text",
                        "help": "Ensure <img> elements have alternate text",
                        "tags": ["wcag2a", "wcag111"],
                        "nodes": [{"target": ["img.hero"], "html": "<img class=\"hero\">"}]
                    }],
                    "passes": [{"id": "document-title"}]
                }))
                .unwrap(),
            ),
            manual: Some(
                serde_json::from_value(json!({
                    "2.4.4": {
                        "status": "fail",
                        "priority": "high",
                        "confidence": 0.8,
                        "assessment": format!("Links, \"read more\" {}", "x".repeat(250)),
                        "issues": ["Ambiguous link text"],
                        "recommendations": ["Name the destination"]
                    },
                    "2.4.2": {"status": "pass", "priority": "low", "confidence": 0.9}
                }))
                .unwrap(),
            ),
        })
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("html".parse::<ExportFormat>().unwrap(), ExportFormat::Html);
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("text".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        let err = "pdf".parse::<ExportFormat>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported export format: pdf");
    }

    #[test]
    fn test_unknown_format_by_name_is_rejected() {
        let report = sample_report();
        assert!(matches!(
            export_report_as(&report, "xml"),
            Err(AuditError::UnsupportedExportFormat(name)) if name == "xml"
        ));
    }

    #[test]
    fn test_json_export_is_the_full_report() {
        let report = sample_report();
        let output = export_report(&report, ExportFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
        assert_eq!(parsed["compliance_score"], report.compliance_score);
        assert_eq!(parsed["meta"]["wcag_version"], "2.1");
        assert_eq!(parsed["recommendations"][0]["type"], "automated");
        assert_eq!(parsed["wcag_compliance"]["A"]["total"], 2);
    }

    #[test]
    fn test_html_export_escapes_text() {
        let output = export_report(&sample_report(), ExportFormat::Html).unwrap();
        assert!(output.starts_with("<!DOCTYPE html>"));
        assert!(output.contains("q=&lt;script&gt;"));
        assert!(!output.contains("<script>"));
        assert!(output.contains("Ensure &lt;img&gt; elements have alternate text"));
        assert!(output.contains("<td>WCAG AA</td>"));
        assert!(output.contains("Priority:</strong> Critical"));
    }

    #[test]
    fn test_html_shows_top_ten_recommendations() {
        let mut manual = serde_json::Map::new();
        for i in 0..12 {
            manual.insert(format!("9.9.{}", i), json!({"status": "fail"}));
        }
        let report = build_report(&AnalysisInput {
            meta: RunMeta::new("page", "ts", &[]),
            automated: None,
            manual: Some(manual),
        });
        assert_eq!(report.recommendations.len(), 12);
        let output = export_report(&report, ExportFormat::Html).unwrap();
        assert_eq!(
            output.matches("<div class=\"recommendation").count(),
            HTML_RECOMMENDATION_LIMIT
        );
    }

    #[test]
    fn test_csv_export() {
        let output = export_report(&sample_report(), ExportFormat::Csv).unwrap();
        let lines: Vec<&str> = output.split("\r\n").collect();
        assert_eq!(lines[0], "Type,Priority,Title,Description,WCAG Level,Status");
        assert!(lines[1].starts_with("automated,critical,Images must have alternate text,"));
        assert!(lines[1].ends_with(",,Violation"));
        // quoted because of the comma and embedded quotes
        assert!(lines[2]
            .starts_with("manual,high,2.4.4: Link Purpose (In Context),\"Links, \"\"read more\"\""));
        assert!(lines[2].ends_with("...\",A,Issue"));
        assert_eq!(lines[3], "");
    }

    #[test]
    fn test_csv_truncation_counts_chars() {
        let short = "é".repeat(CSV_DESCRIPTION_LIMIT);
        assert_eq!(truncate_description(&short), short);
        let long = "é".repeat(CSV_DESCRIPTION_LIMIT + 1);
        let truncated = truncate_description(&long);
        assert_eq!(truncated.chars().count(), CSV_DESCRIPTION_LIMIT + 3);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_text_export() {
        let output = export_report(&sample_report(), ExportFormat::Text).unwrap();
        assert!(output.contains("=== WCAG Accessibility Report ==="));
        assert!(output.contains("Compliance score:"));
        assert!(output.contains("[critical] Images must have alternate text"));
        assert!(output.contains("Fix: Add descriptive alt text to images"));
    }
}
