// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Run orchestration.
//!
//! Collects both findings streams and hands them to the aggregation
//! engine. The automated scanner and the judgment provider sit behind
//! traits; the two sources run concurrently on scoped threads and both must
//! finish before [`build_report`] sees anything.

use crate::catalog::{self, Criterion, WcagLevel};
use crate::error::{AuditError, Result};
use crate::findings::{RawAutomatedResults, RawManualResults};
use crate::report::{build_report, AnalysisInput, Report, RunMeta, DEFAULT_LEVELS};
use serde_json::{json, Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

/// Characters of an unparseable response kept in its error record
const RESPONSE_EXCERPT_CHARS: usize = 200;

/// Produces raw automated results for a target
pub trait AutomatedScanner: Send + Sync {
    fn scan(&self, target: &str, levels: &[WcagLevel]) -> Result<RawAutomatedResults>;
}

/// Produces a raw text judgment for one criterion
pub trait JudgmentProvider: Send + Sync {
    fn judge(&self, criterion: &Criterion, page_content: &Value) -> Result<String>;
}

/// Scanner backed by a previously captured axe-core JSON result
#[derive(Debug, Clone)]
pub struct AxeReportFile {
    path: PathBuf,
}

impl AxeReportFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AutomatedScanner for AxeReportFile {
    fn scan(&self, target: &str, levels: &[WcagLevel]) -> Result<RawAutomatedResults> {
        debug!(
            path = %self.path.display(),
            target_id = target,
            ?levels,
            "Loading captured axe results"
        );
        let content = std::fs::read_to_string(&self.path)?;
        let value: Value = serde_json::from_str(&content)?;
        // axe's CLI writes one result object per scanned page
        let value = match value {
            Value::Array(mut pages) => {
                if pages.is_empty() {
                    return Err(AuditError::Scanner(format!(
                        "{} contains no scan results",
                        self.path.display()
                    )));
                }
                pages.swap_remove(0)
            }
            other => other,
        };

        if let Some(error) = value.get("error") {
            let message = match error {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            return Err(AuditError::Scanner(format!("axe-core error: {}", message)));
        }

        let mut results: RawAutomatedResults = serde_json::from_value(value)?;
        let levels: &[WcagLevel] = if levels.is_empty() {
            &DEFAULT_LEVELS
        } else {
            levels
        };
        results.retain_levels(levels);
        Ok(results)
    }
}

/// Judgment provider that runs an external command per criterion.
///
/// The command receives `{"criterion": ..., "page_content": ...}` as JSON
/// on stdin and answers with its verdict on stdout.
#[derive(Debug, Clone)]
pub struct CommandJudge {
    command: String,
    args: Vec<String>,
}

impl CommandJudge {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }
}

impl JudgmentProvider for CommandJudge {
    fn judge(&self, criterion: &Criterion, page_content: &Value) -> Result<String> {
        let request = json!({
            "criterion": criterion,
            "page_content": page_content,
        });
        let payload = serde_json::to_vec(&request)?;

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                AuditError::Judgment(format!("failed to start {}: {}", self.command, e))
            })?;

        let stdin = child.stdin.take();

        // stdin is written while stdout drains
        let (sent, output) = std::thread::scope(|s| {
            let writer = s.spawn(move || -> std::io::Result<()> {
                if let Some(mut stdin) = stdin {
                    stdin.write_all(&payload)?;
                    stdin.flush()?;
                }
                Ok(())
            });
            let output = child.wait_with_output();
            (writer.join(), output)
        });

        let output = output?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AuditError::Judgment(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        match sent {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(AuditError::Judgment(format!(
                    "failed to send request to {}: {}",
                    self.command, e
                )))
            }
            Err(_) => {
                return Err(AuditError::Judgment(
                    "request writer thread panicked".to_string(),
                ))
            }
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Extract the verdict object from a provider response.
///
/// Tries the whole response first, then the outermost `{...}` span, which
/// covers answers wrapped in prose or markdown fences.
pub fn parse_judgment_response(raw: &str) -> Option<Map<String, Value>> {
    let trimmed = raw.trim();

    if let Ok(Value::Object(record)) = serde_json::from_str::<Value>(trimmed) {
        return Some(record);
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str::<Value>(&trimmed[start..=end]) {
        Ok(Value::Object(record)) => Some(record),
        _ => None,
    }
}

/// Turn one provider outcome into a raw verdict record
fn judgment_record(criterion: &Criterion, outcome: Result<String>) -> Value {
    match outcome {
        Ok(response) => match parse_judgment_response(&response) {
            Some(mut record) => {
                record.insert("level".to_string(), json!(criterion.level));
                record.insert("title".to_string(), json!(criterion.title));
                Value::Object(record)
            }
            None => {
                warn!(criterion = criterion.id, "Unparseable judgment response");
                let excerpt: String = response.chars().take(RESPONSE_EXCERPT_CHARS).collect();
                json!({
                    "status": "error",
                    "confidence": 0.0,
                    "assessment": format!("Failed to parse AI response: {}...", excerpt),
                    "issues": ["AI response parsing failed"],
                    "recommendations": ["Manual review required"],
                    "priority": "medium",
                    "level": criterion.level,
                    "title": criterion.title,
                })
            }
        },
        Err(e) => {
            warn!(criterion = criterion.id, error = %e, "Judgment provider failed");
            json!({
                "status": "error",
                "error": e.to_string(),
                "level": criterion.level,
                "title": criterion.title,
            })
        }
    }
}

/// Judge every manual-assessment criterion at the requested levels.
///
/// A failure for one criterion is recorded against that criterion only.
pub fn evaluate_manual_criteria(
    provider: &dyn JudgmentProvider,
    levels: &[WcagLevel],
    page_content: &Value,
) -> RawManualResults {
    let criteria = catalog::criteria_for_levels(levels);
    info!(criteria = criteria.len(), "Evaluating manual criteria");

    let mut results = RawManualResults::new();
    for criterion in criteria {
        let outcome = provider.judge(criterion, page_content);
        results.insert(criterion.id.to_string(), judgment_record(criterion, outcome));
    }
    results
}

/// Load a pre-recorded criterion → verdict mapping
pub fn load_manual_results(path: &Path) -> Result<RawManualResults> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load extracted page content for the judgment provider
pub fn load_page_content(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Where manual verdicts come from in a run
pub enum ManualSource {
    /// No manual assessment
    Disabled,
    /// Verdicts recorded ahead of time
    Recorded(RawManualResults),
    /// Judge each criterion now
    Judge(Box<dyn JudgmentProvider>),
}

/// One analysis run request
#[derive(Debug, Clone)]
pub struct AuditRequest {
    pub meta: RunMeta,
    /// Extracted page content handed to the judgment provider
    pub page_content: Value,
}

/// Runs the collaborators and builds the report
pub struct Auditor {
    scanner: Option<Box<dyn AutomatedScanner>>,
    manual: ManualSource,
}

impl Default for Auditor {
    fn default() -> Self {
        Self::new()
    }
}

impl Auditor {
    pub fn new() -> Self {
        Self {
            scanner: None,
            manual: ManualSource::Disabled,
        }
    }

    pub fn with_scanner(mut self, scanner: Box<dyn AutomatedScanner>) -> Self {
        self.scanner = Some(scanner);
        self
    }

    pub fn with_manual(mut self, manual: ManualSource) -> Self {
        self.manual = manual;
        self
    }

    /// Collect both streams concurrently, then aggregate
    pub fn run(&self, request: &AuditRequest) -> Result<Report> {
        let meta = &request.meta;
        let levels: &[WcagLevel] = if meta.levels.is_empty() {
            &DEFAULT_LEVELS
        } else {
            &meta.levels
        };

        let (automated, manual) = std::thread::scope(|s| {
            let scan = s.spawn(|| {
                self.scanner
                    .as_ref()
                    .map(|scanner| scanner.scan(&meta.target, levels))
                    .transpose()
            });
            let judged = s.spawn(|| match &self.manual {
                ManualSource::Disabled => None,
                ManualSource::Recorded(results) => Some(results.clone()),
                ManualSource::Judge(provider) => Some(evaluate_manual_criteria(
                    provider.as_ref(),
                    levels,
                    &request.page_content,
                )),
            });
            (scan.join(), judged.join())
        });

        let automated = automated
            .map_err(|_| AuditError::Scanner("scanner thread panicked".to_string()))??;
        let manual =
            manual.map_err(|_| AuditError::Judgment("judgment thread panicked".to_string()))?;

        Ok(build_report(&AnalysisInput {
            meta: meta.clone(),
            automated,
            manual,
        }))
    }
}
