//! Risk analysis orchestrator
//!
//! validate → extract services → gather rules → prompt → complete →
//! check contract → convert → score. Any step failure aborts the whole
//! analysis; nothing partial is returned.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::{DiagramError, OrchestrationError, ResponseError, StepError};
use crate::core::models::{ComplianceIssue, ComplianceRule, RiskItem, RiskLevel, ServiceCatalog};
use crate::core::ports::{RuleStore, TextCompletion};

use super::parser::extract_services;
use super::prompt::{ANALYSIS_KEYS, analysis_messages};
use super::response::{field, parse_contract};
use super::scorer::RiskScorer;
use super::validator;

/// Tunables for the analysis call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisOptions {
    /// Sampling temperature
    pub temperature: f32,
    /// How many rules the general free-text query may return
    pub general_query_limit: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            general_query_limit: 10,
        }
    }
}

/// Result of analysing one diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    /// Risk findings
    pub risks: Vec<RiskItem>,
    /// Compliance issues
    pub compliance_issues: Vec<ComplianceIssue>,
    /// Model-written summary
    pub summary: String,
    /// 0..=100 severity score
    pub overall_risk_score: u32,
}

/// Analyses diagrams against the catalog and the rule store
#[derive(Clone, Copy)]
pub struct RiskAnalyzer<'a> {
    completion: &'a dyn TextCompletion,
    rules: &'a dyn RuleStore,
    catalog: &'a ServiceCatalog,
    scorer: RiskScorer,
    options: AnalysisOptions,
}

impl std::fmt::Debug for RiskAnalyzer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiskAnalyzer")
            .field("completion", &self.completion.name())
            .field("rules", &self.rules.name())
            .field("catalog", &self.catalog.len())
            .field("scorer", &self.scorer)
            .field("options", &self.options)
            .finish()
    }
}

impl<'a> RiskAnalyzer<'a> {
    /// Create an analyzer over the given collaborators
    #[must_use]
    pub fn new(
        completion: &'a dyn TextCompletion,
        rules: &'a dyn RuleStore,
        catalog: &'a ServiceCatalog,
        scorer: RiskScorer,
    ) -> Self {
        Self {
            completion,
            rules,
            catalog,
            scorer,
            options: AnalysisOptions::default(),
        }
    }

    /// Override the default options
    #[must_use]
    pub const fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }

    /// Analyse `diagram`
    pub fn analyze(&self, diagram: &str) -> Result<RiskAnalysis, OrchestrationError> {
        log::info!("Starting risk analysis");
        self.run(diagram).map_err(|e| {
            log::error!("Risk analysis failed: {e}");
            OrchestrationError::Analysis(e)
        })
    }

    fn run(&self, diagram: &str) -> Result<RiskAnalysis, StepError> {
        validator::check(diagram).map_err(DiagramError::Input)?;

        let services = extract_services(diagram);
        let unsupported = self.catalog.unsupported(&services);
        if !unsupported.is_empty() {
            log::warn!("Diagram references services outside the catalog: {unsupported:?}");
        }

        let rules = self.gather_rules(&services, diagram);
        log::info!("Using {} compliance rules for {} services", rules.len(), services.len());

        let messages = analysis_messages(self.catalog, &rules, diagram, &services);
        let raw = self.completion.complete(&messages, self.options.temperature)?;
        let object = parse_contract(&raw, &ANALYSIS_KEYS)?;

        let risks = convert_risks(&field::<Vec<Value>>(&object, "risks")?)?;
        let compliance_issues =
            convert_issues(&field::<Vec<Value>>(&object, "compliance_issues")?)?;
        let summary: String = field(&object, "summary")?;

        let overall_risk_score = self.scorer.score(&risks);
        log::info!(
            "Risk analysis complete: {} risks, {} compliance issues, score {overall_risk_score}",
            risks.len(),
            compliance_issues.len()
        );

        Ok(RiskAnalysis {
            risks,
            compliance_issues,
            summary,
            overall_risk_score,
        })
    }

    /// Service-specific rules followed by general ones, first occurrence of each id kept
    fn gather_rules(&self, services: &BTreeSet<String>, diagram: &str) -> Vec<ComplianceRule> {
        let mut all = Vec::new();
        for service in services {
            all.extend(self.rules.rules_by_service(service));
        }
        let query = format!("architecture security best practices {diagram}");
        all.extend(self.rules.rules_by_free_text(&query, self.options.general_query_limit));

        dedupe_rules(all)
    }
}

/// Drop rules whose id was already seen, preserving first-seen order
#[must_use]
pub fn dedupe_rules(rules: Vec<ComplianceRule>) -> Vec<ComplianceRule> {
    let mut seen = HashSet::new();
    rules.into_iter().filter(|r| seen.insert(r.id.clone())).collect()
}

#[derive(Deserialize)]
struct RawRisk {
    #[serde(default)]
    id: Option<String>,
    level: String,
    title: String,
    description: String,
    #[serde(default)]
    service_affected: Option<String>,
    recommendation: String,
    #[serde(default)]
    compliance_rule: Option<String>,
}

#[derive(Deserialize)]
struct RawIssue {
    #[serde(default)]
    id: Option<String>,
    rule: String,
    description: String,
    severity: String,
    #[serde(default)]
    affected_services: Option<Vec<String>>,
}

fn fresh_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn level_of(tag: &str) -> RiskLevel {
    let level = RiskLevel::lenient(tag);
    if level == RiskLevel::Unknown {
        log::warn!("Unrecognized severity '{tag}' from model, scoring it as 0");
    }
    level
}

fn convert_risks(values: &[Value]) -> Result<Vec<RiskItem>, ResponseError> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let raw: RawRisk = serde_json::from_value(value.clone())
                .map_err(|e| ResponseError::InvalidStructure(format!("risks[{i}]: {e}")))?;
            Ok(RiskItem {
                id: raw.id.unwrap_or_else(fresh_id),
                level: level_of(&raw.level),
                title: raw.title,
                description: raw.description,
                service_affected: raw.service_affected,
                recommendation: raw.recommendation,
                compliance_rule: raw.compliance_rule,
            })
        })
        .collect()
}

fn convert_issues(values: &[Value]) -> Result<Vec<ComplianceIssue>, ResponseError> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let raw: RawIssue = serde_json::from_value(value.clone()).map_err(|e| {
                ResponseError::InvalidStructure(format!("compliance_issues[{i}]: {e}"))
            })?;
            Ok(ComplianceIssue {
                id: raw.id.unwrap_or_else(fresh_id),
                rule: raw.rule,
                description: raw.description,
                severity: level_of(&raw.severity),
                affected_services: raw.affected_services.unwrap_or_default(),
            })
        })
        .collect()
}
