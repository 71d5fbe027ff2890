//! Output formatting for human and JSON modes
//!
//! Every command result implements [`Report`]: a human rendering, plus the
//! JSON API envelope for machine consumers.

use std::fmt::Write as _;

use colored::Colorize;
use serde::Serialize;

use crate::api::{
    AnalysisData, ApiError, ApiErrorData, ApiResponse, DiffData, HealthData, RulesData,
    ServicesData, ValidationData,
};
use crate::core::models::{ChangeKind, RiskLevel};
use crate::core::services::{RiskAnalysis, Verification};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

impl OutputMode {
    /// Mode selected by the `--json` flag
    #[must_use]
    pub const fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Human }
    }
}

/// A command result that can be printed in either mode
pub trait Report: Serialize {
    /// Human-readable rendering
    fn to_human(&self) -> String;

    /// JSON envelope rendering
    fn to_json(&self) -> String {
        serde_json::to_string_pretty(&ApiResponse::success(self)).unwrap_or_default()
    }

    /// Render the result based on output mode
    fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.to_human()),
            OutputMode::Json => println!("{}", self.to_json()),
        }
    }
}

/// Print an API error in the given mode
pub fn render_error(err: &ApiError, mode: OutputMode) {
    match mode {
        OutputMode::Human => eprintln!("{} {}", "error:".red().bold(), err.message),
        OutputMode::Json => {
            let data = ApiErrorData::from(err);
            let body = ApiResponse::error(&data.code, &data.message);
            println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
        },
    }
}

fn level_label(level: RiskLevel) -> String {
    let tag = format!("[{}]", level.tag());
    match level {
        RiskLevel::Critical => tag.red().bold().to_string(),
        RiskLevel::High => tag.red().to_string(),
        RiskLevel::Medium => tag.yellow().to_string(),
        RiskLevel::Low => tag.blue().to_string(),
        RiskLevel::Unknown => tag.dimmed().to_string(),
    }
}

fn change_marker(kind: ChangeKind) -> String {
    match kind {
        ChangeKind::ConnectionAdded | ChangeKind::ServiceAdded => "+".green().to_string(),
        ChangeKind::ConnectionRemoved | ChangeKind::ServiceRemoved => "-".red().to_string(),
    }
}

// =============================================================================
// DIAGRAMS
// =============================================================================

impl Report for ValidationData {
    fn to_human(&self) -> String {
        let mut out = String::new();
        if !self.valid {
            let reason = self.reason.as_deref().unwrap_or("Invalid diagram format");
            let _ = writeln!(out, "{} {reason}", "✗".red());
            return out;
        }

        let _ = writeln!(
            out,
            "{} Valid diagram: {} connection(s), {} service(s)",
            "✓".green(),
            self.connections.len(),
            self.services.len()
        );
        for service in &self.services {
            if self.unsupported_services.contains(service) {
                let _ = writeln!(out, "  {service} {}", "(not in catalog)".yellow());
            } else {
                let _ = writeln!(out, "  {service}");
            }
        }
        out
    }
}

impl Report for DiffData {
    fn to_human(&self) -> String {
        if self.changes.is_empty() {
            return "No changes.\n".to_string();
        }
        let mut out = String::new();
        for change in &self.changes {
            let _ = writeln!(
                out,
                "{} {} {}",
                change_marker(change.kind),
                change.description,
                format!("({})", change.reason).dimmed()
            );
        }
        out
    }
}

// =============================================================================
// ANALYSIS AND VERIFICATION
// =============================================================================

impl Report for RiskAnalysis {
    fn to_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} {}/100", "Risk score:".bold(), self.overall_risk_score);
        let _ = writeln!(out, "\n{}", self.summary);

        if self.risks.is_empty() {
            let _ = writeln!(out, "\nNo risks identified.");
        } else {
            let _ = writeln!(out, "\n{}", "Risks:".bold());
            for risk in &self.risks {
                let _ = writeln!(out, "  {} {}", level_label(risk.level), risk.title);
                if let Some(service) = &risk.service_affected {
                    let _ = writeln!(out, "      Affects: {service}");
                }
                let _ = writeln!(out, "      {}", risk.description);
                let _ = writeln!(out, "      Fix: {}", risk.recommendation);
            }
        }

        if !self.compliance_issues.is_empty() {
            let _ = writeln!(out, "\n{}", "Compliance issues:".bold());
            for issue in &self.compliance_issues {
                let _ = writeln!(out, "  {} {}", level_label(issue.severity), issue.rule);
                let _ = writeln!(out, "      {}", issue.description);
                if !issue.affected_services.is_empty() {
                    let _ = writeln!(out, "      Affects: {}", issue.affected_services.join(", "));
                }
            }
        }
        out
    }
}

impl Report for Verification {
    fn to_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", "Corrected diagram:".bold());
        let _ = writeln!(out, "{}", self.corrected.trim());
        let _ = writeln!(out, "\n{}", "Changes:".bold());
        if self.changes.is_empty() {
            let _ = writeln!(out, "  none");
        }
        for change in &self.changes {
            let _ = writeln!(out, "  {} {}", change_marker(change.kind), change.description);
        }
        let _ = writeln!(out, "\n{}", self.explanation);
        out
    }
}

impl Report for AnalysisData {
    fn to_human(&self) -> String {
        let mut out = self.analysis.to_human();
        if let Some(verification) = &self.verification {
            out.push('\n');
            out.push_str(&verification.to_human());
        }
        out
    }
}

// =============================================================================
// SERVICE STATUS AND CATALOG
// =============================================================================

impl Report for HealthData {
    fn to_human(&self) -> String {
        let mut out = String::new();
        let status = if self.is_healthy() {
            self.status.green().to_string()
        } else {
            self.status.yellow().to_string()
        };
        let _ = writeln!(out, "Status: {status} (archsec {})", self.version);
        for (name, state) in &self.services {
            let mark = if state.starts_with("unhealthy") { "✗".red() } else { "✓".green() };
            let _ = writeln!(out, "  {mark} {name}: {state}");
        }
        out
    }
}

impl Report for ServicesData {
    fn to_human(&self) -> String {
        let mut out = String::new();
        let mut provider = "";
        for service in &self.services {
            if service.provider != provider {
                provider = &service.provider;
                let _ = writeln!(out, "{}", provider.bold());
            }
            let _ = writeln!(out, "  {:<20} {} ({})", service.id, service.name, service.category);
        }
        out
    }
}

impl Report for RulesData {
    fn to_human(&self) -> String {
        if self.rules.is_empty() {
            return "No matching rules.\n".to_string();
        }
        let mut out = String::new();
        for rule in &self.rules {
            let level = RiskLevel::lenient(&rule.severity);
            let _ = writeln!(out, "{} {} {}", level_label(level), rule.id.dimmed(), rule.title);
            let _ = writeln!(out, "      {}", rule.description);
        }
        out
    }
}
