// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! wcag-auditor CLI - WCAG 2.1 Compliance Report Engine

use anyhow::Context;
use chrono::{SecondsFormat, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wcag_auditor::catalog::{self, Criterion};
use wcag_auditor::config::{self, Config};
use wcag_auditor::orchestrator::{
    self, AuditRequest, Auditor, AxeReportFile, CommandJudge, ManualSource,
};
use wcag_auditor::{export_report, ExportFormat, RunMeta, WcagLevel};

/// WCAG 2.1 compliance reports from automated and AI-judged findings
#[derive(Parser)]
#[command(name = "wcag-auditor")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter (trace, debug, info, warn, error); overrides the config file
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a compliance report for one page
    Report {
        /// What was analyzed, usually the page URL
        #[arg(long)]
        target: String,

        /// Captured axe-core results (JSON)
        #[arg(long)]
        automated: Option<PathBuf>,

        /// Pre-recorded manual verdicts (JSON object keyed by criterion)
        #[arg(long)]
        manual: Option<PathBuf>,

        /// Extracted page content for the judgment provider (JSON)
        #[arg(long)]
        content: Option<PathBuf>,

        /// WCAG levels to test (repeatable); defaults to the config file
        #[arg(long = "level")]
        levels: Vec<WcagLevelArg>,

        /// Report timestamp (defaults to now, RFC 3339)
        #[arg(long)]
        timestamp: Option<String>,

        /// Output format; defaults to the config file
        #[arg(long)]
        format: Option<FormatArg>,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List the criteria catalog
    Criteria {
        /// Only this level
        #[arg(long)]
        level: Option<WcagLevelArg>,

        /// Only criteria that need manual judgment
        #[arg(long, conflicts_with = "automated_only")]
        manual_only: bool,

        /// Only criteria the automated scanner covers
        #[arg(long)]
        automated_only: bool,
    },

    /// Initialize configuration file
    Init {
        /// Output format (yaml, toml)
        #[arg(long, default_value = "yaml")]
        format: String,
    },

    /// Show current configuration
    Show,
}

/// WCAG conformance level CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum WcagLevelArg {
    /// Level A - minimum
    A,
    /// Level AA - standard
    Aa,
    /// Level AAA - enhanced
    Aaa,
}

impl From<WcagLevelArg> for WcagLevel {
    fn from(arg: WcagLevelArg) -> Self {
        match arg {
            WcagLevelArg::A => WcagLevel::A,
            WcagLevelArg::Aa => WcagLevel::AA,
            WcagLevelArg::Aaa => WcagLevel::AAA,
        }
    }
}

/// Export format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Full report as JSON
    Json,
    /// Standalone HTML page
    Html,
    /// Recommendations as CSV
    Csv,
    /// Human-readable text
    Text,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Html => ExportFormat::Html,
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Text => ExportFormat::Text,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(config::default_config_path);

    let config = match config::load_config(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(cli.log_level.as_deref().unwrap_or(&config.log.level));

    let result = match cli.command {
        Commands::Report {
            target,
            automated,
            manual,
            content,
            levels,
            timestamp,
            format,
            output,
        } => handle_report(
            &config,
            ReportArgs {
                target,
                automated,
                manual,
                content,
                levels: levels.into_iter().map(WcagLevel::from).collect(),
                timestamp,
                format: format.map(ExportFormat::from),
                output,
            },
        ),
        Commands::Criteria {
            level,
            manual_only,
            automated_only,
        } => {
            handle_criteria(level.map(WcagLevel::from), manual_only, automated_only);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { format } => handle_init(&config_path, &format),
        Commands::Show => {
            handle_show(&config);
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

struct ReportArgs {
    target: String,
    automated: Option<PathBuf>,
    manual: Option<PathBuf>,
    content: Option<PathBuf>,
    levels: Vec<WcagLevel>,
    timestamp: Option<String>,
    format: Option<ExportFormat>,
    output: Option<PathBuf>,
}

fn handle_report(config: &Config, args: ReportArgs) -> anyhow::Result<ExitCode> {
    let levels = if args.levels.is_empty() {
        config.levels.clone()
    } else {
        args.levels
    };
    let format = match args.format {
        Some(format) => format,
        None => config.export_format.parse()?,
    };
    let timestamp = args
        .timestamp
        .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));

    let page_content = match &args.content {
        Some(path) => orchestrator::load_page_content(path)
            .with_context(|| format!("loading page content from {}", path.display()))?,
        None => Value::Object(Default::default()),
    };

    let mut auditor = Auditor::new();
    match (&args.automated, config.automated) {
        (Some(path), true) => auditor = auditor.with_scanner(Box::new(AxeReportFile::new(path))),
        (Some(_), false) => warn!("Automated scanning is disabled in config, ignoring --automated"),
        (None, _) => info!("No automated results supplied"),
    }

    let manual = match (&args.manual, &config.ai_assessment.command) {
        (Some(path), _) => ManualSource::Recorded(
            orchestrator::load_manual_results(path)
                .with_context(|| format!("loading manual verdicts from {}", path.display()))?,
        ),
        (None, Some(command)) if config.judge_enabled() => {
            if args.content.is_none() {
                warn!("Judging without --content; the provider sees no page content");
            }
            ManualSource::Judge(Box::new(CommandJudge::new(
                command.clone(),
                config.ai_assessment.args.clone(),
            )))
        }
        _ => ManualSource::Disabled,
    };
    let auditor = auditor.with_manual(manual);

    let request = AuditRequest {
        meta: RunMeta {
            target: args.target,
            timestamp,
            levels,
        },
        page_content,
    };
    let report = auditor.run(&request)?;
    let rendered = export_report(&report, format)?;
    write_output(&rendered, args.output.as_deref())?;

    if let Some(threshold) = config.fail_under {
        if report.compliance_score < threshold {
            eprintln!(
                "Compliance score {} is below the configured minimum of {}",
                report.compliance_score, threshold
            );
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn handle_criteria(level: Option<WcagLevel>, manual_only: bool, automated_only: bool) {
    let listed: Vec<&Criterion> = match level {
        Some(level) => catalog::by_level(level),
        None => catalog::CATALOG.iter().collect(),
    };
    let kind_filter = if manual_only {
        Some(catalog::manual_criteria())
    } else if automated_only {
        Some(catalog::automated_criteria())
    } else {
        None
    };

    for criterion in listed {
        if let Some(allowed) = &kind_filter {
            if !allowed.iter().any(|c| c.id == criterion.id) {
                continue;
            }
        }
        let kind = if criterion.requires_manual_assessment {
            "manual"
        } else {
            "automated"
        };
        println!(
            "{:<7} {:<4} {:<10} {}",
            criterion.id,
            criterion.level.as_str(),
            kind,
            criterion.title
        );
    }
}

fn handle_init(config_path: &Path, format: &str) -> anyhow::Result<ExitCode> {
    let path = match format {
        "toml" => config_path.with_extension("toml"),
        "yaml" | "yml" => config_path.to_path_buf(),
        other => anyhow::bail!("Unknown config format: {} (expected yaml or toml)", other),
    };

    config::write_default_config(&path)
        .with_context(|| format!("creating config at {}", path.display()))?;
    println!("Created configuration file: {}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn handle_show(config: &Config) {
    println!("\nCurrent Configuration:");
    println!("======================\n");

    let levels: Vec<&str> = config.levels.iter().map(WcagLevel::as_str).collect();
    println!("Levels: {}", levels.join(", "));
    println!("Automated scan: {}", config.automated);
    println!("Export format: {}", config.export_format);
    match config.fail_under {
        Some(threshold) => println!("Fail under: {}", threshold),
        None => println!("Fail under: (none)"),
    }
    println!();

    println!("AI assessment:");
    println!("  Enabled: {}", config.ai_assessment.enabled);
    println!(
        "  Command: {}",
        config.ai_assessment.command.as_deref().unwrap_or("(none)")
    );
    if !config.ai_assessment.args.is_empty() {
        println!("  Args: {}", config.ai_assessment.args.join(" "));
    }
    println!();

    println!("Log level: {}", config.log.level);
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
