// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! wcag-auditor - WCAG 2.1 Compliance Report Engine
//!
//! Combines two independent streams of accessibility findings for one web
//! page into a single compliance report:
//!
//! - **Automated** rule results from a scanner (axe-core layout), with
//!   impact tiers and WCAG tags
//! - **Manual** per-criterion verdicts from a judgment provider, for the
//!   criteria a scanner cannot decide
//!
//! The aggregation engine ([`report::build_report`]) is pure and
//! deterministic: the same inputs always produce the same report, and a
//! malformed verdict never prevents a report from being built.
//!
//! ## Pipeline
//!
//! - **Normalize** ([`normalize`]): resolve every default in the raw inputs
//! - **Classify** ([`classify`]): impact, status, level and priority tallies
//! - **Score** ([`scoring`]): weighted 0-100 compliance score and status band
//! - **Recommend** ([`recommend`]): one prioritized remediation list
//! - **Export** ([`report::export`]): JSON, HTML, CSV or text

pub mod catalog;
pub mod classify;
pub mod config;
pub mod error;
pub mod findings;
pub mod normalize;
pub mod orchestrator;
pub mod recommend;
pub mod report;
pub mod rules;
pub mod scoring;

pub use catalog::WcagLevel;
pub use error::{AuditError, Result};
pub use report::export::{export_report, ExportFormat};
pub use report::{build_report, AnalysisInput, Report, RunMeta};
