// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error types for wcag-auditor
//!
//! Report construction itself is infallible; these errors come from the
//! edges: loading inputs and configuration, running collaborators, and
//! exporting a finished report.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AuditError>;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported export format: {0}")]
    UnsupportedExportFormat(String),

    #[error("Automated scanner error: {0}")]
    Scanner(String),

    #[error("Judgment provider error: {0}")]
    Judgment(String),
}
