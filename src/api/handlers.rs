//! Pure API handlers
//!
//! These handlers contain business logic and are HTTP-agnostic.
//! They take typed input and return `Result<T, ApiError>`.

use std::collections::{BTreeMap, BTreeSet};

use crate::VERSION;
use crate::adapters::completion_from_config;
use crate::config::Settings;
use crate::core::error::DiagramError;
use crate::core::models::ServiceCatalog;
use crate::core::ports::{RuleStore, TextCompletion};
use crate::core::services::verification::DEFAULT_VERIFICATION_TEMPERATURE;
use crate::core::services::{
    AnalysisOptions, RiskAnalyzer, RiskScorer, SeverityWeights, Verification, Verifier,
    extract_connections, extract_services, validator,
};

use super::error::ApiError;
use super::types::{
    AnalysisData, AnalysisRequest, DiffData, DiffRequest, HealthData, RulesData, RulesQuery,
    ServicesData, ValidateRequest, ValidationData, VerificationRequest,
};

// =============================================================================
// CONTEXT
// =============================================================================

/// Collaborators and settings shared by every handler
///
/// Built once per process; handlers only borrow it, so requests stay
/// independent of each other.
pub struct ApiContext {
    completion: Box<dyn TextCompletion>,
    rules: Box<dyn RuleStore>,
    catalog: ServiceCatalog,
    weights: SeverityWeights,
    options: AnalysisOptions,
    verification_temperature: f32,
}

impl std::fmt::Debug for ApiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiContext")
            .field("completion", &self.completion.name())
            .field("rules", &self.rules.name())
            .field("catalog", &self.catalog.len())
            .field("weights", &self.weights)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl ApiContext {
    /// Context with default catalog, weights and options
    #[must_use]
    pub fn new(completion: Box<dyn TextCompletion>, rules: Box<dyn RuleStore>) -> Self {
        Self {
            completion,
            rules,
            catalog: ServiceCatalog::builtin(),
            weights: SeverityWeights::default(),
            options: AnalysisOptions::default(),
            verification_temperature: DEFAULT_VERIFICATION_TEMPERATURE,
        }
    }

    /// Context wired from configuration
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let completion = completion_from_config(&settings.llm)?;
        let rules = settings.rule_store()?;
        Ok(Self::new(completion, Box::new(rules))
            .with_catalog(settings.services.clone())
            .with_weights(settings.scoring)
            .with_options(settings.analysis_options())
            .with_verification_temperature(settings.llm.verification_temperature))
    }

    /// Replace the service catalog
    #[must_use]
    pub fn with_catalog(mut self, catalog: ServiceCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replace the severity weights
    #[must_use]
    pub const fn with_weights(mut self, weights: SeverityWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Replace the analysis options
    #[must_use]
    pub const fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the correction temperature
    #[must_use]
    pub const fn with_verification_temperature(mut self, temperature: f32) -> Self {
        self.verification_temperature = temperature;
        self
    }

    fn analyzer(&self) -> RiskAnalyzer<'_> {
        RiskAnalyzer::new(
            self.completion.as_ref(),
            self.rules.as_ref(),
            &self.catalog,
            RiskScorer::new(self.weights),
        )
        .with_options(self.options)
    }

    fn verifier(&self) -> Verifier<'_> {
        Verifier::new(self.completion.as_ref(), &self.catalog)
            .with_temperature(self.verification_temperature)
    }
}

// =============================================================================
// ANALYSIS
// =============================================================================

/// Analyse a diagram, then correct it against the risks found
pub fn analyze(ctx: &ApiContext, req: &AnalysisRequest) -> Result<AnalysisData, ApiError> {
    let analysis = ctx.analyzer().analyze(&req.diagram)?;
    let verification = ctx.verifier().verify(&req.diagram, &analysis.risks)?;
    Ok(AnalysisData {
        analysis,
        verification: Some(verification),
    })
}

/// Same as [`analyze`]
pub fn analyze_and_verify(
    ctx: &ApiContext,
    req: &AnalysisRequest,
) -> Result<AnalysisData, ApiError> {
    analyze(ctx, req)
}

/// Analyse a diagram without asking for a correction
pub fn analyze_only(ctx: &ApiContext, req: &AnalysisRequest) -> Result<AnalysisData, ApiError> {
    let analysis = ctx.analyzer().analyze(&req.diagram)?;
    Ok(AnalysisData {
        analysis,
        verification: None,
    })
}

// =============================================================================
// VERIFICATION
// =============================================================================

/// Correct a diagram against caller-supplied risks
pub fn verify(ctx: &ApiContext, req: &VerificationRequest) -> Result<Verification, ApiError> {
    Ok(ctx.verifier().verify(&req.original_diagram, &req.risks)?)
}

// =============================================================================
// HEALTH
// =============================================================================

/// Probe every collaborator
#[must_use]
pub fn health(ctx: &ApiContext) -> HealthData {
    let mut services = BTreeMap::new();

    let completion = ctx
        .completion
        .health_check()
        .map_or_else(|e| format!("unhealthy: {e}"), |()| "healthy".to_string());
    services.insert(ctx.completion.name().to_string(), completion);

    let rules = if ctx.rules.health_check() { "healthy" } else { "unhealthy: no rules loaded" };
    services.insert(ctx.rules.name().to_string(), rules.to_string());

    let degraded = services.values().any(|status| status.starts_with("unhealthy"));
    if degraded {
        log::warn!("Health check degraded: {services:?}");
    }

    HealthData {
        status: if degraded { "degraded" } else { "healthy" }.to_string(),
        version: VERSION.to_string(),
        services,
        checked_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Turn a degraded health report into an error
pub fn ensure_healthy(report: &HealthData) -> Result<(), ApiError> {
    if report.is_healthy() {
        return Ok(());
    }
    let failing: Vec<&str> = report
        .services
        .iter()
        .filter(|(_, status)| status.starts_with("unhealthy"))
        .map(|(name, _)| name.as_str())
        .collect();
    Err(ApiError::unavailable(format!("Degraded services: {}", failing.join(", "))))
}

// =============================================================================
// CATALOG AND RULES
// =============================================================================

/// List supported cloud services
#[must_use]
pub fn list_services(ctx: &ApiContext) -> ServicesData {
    ServicesData {
        services: ctx.catalog.services().to_vec(),
    }
}

/// Look up compliance rules by service id or free text
pub fn rules(ctx: &ApiContext, query: &RulesQuery) -> Result<RulesData, ApiError> {
    let rules = match (query.service.as_deref(), query.query.as_deref()) {
        (Some(_), Some(_)) => {
            return Err(ApiError::bad_request("Use either a service id or a query, not both"));
        },
        (Some(id), None) => {
            if !ctx.catalog.contains(id) {
                return Err(ApiError::not_found(format!("Service '{id}' not found")));
            }
            ctx.rules.rules_by_service(id)
        },
        (None, Some(text)) if !text.trim().is_empty() => {
            let limit = query.limit.unwrap_or(ctx.options.general_query_limit);
            ctx.rules.rules_by_free_text(text, limit)
        },
        _ => return Err(ApiError::bad_request("Provide a service id or a query")),
    };
    Ok(RulesData { rules })
}

// =============================================================================
// DIAGRAMS
// =============================================================================

/// Check a diagram's format and summarise what it references
#[must_use]
pub fn validate(ctx: &ApiContext, req: &ValidateRequest) -> ValidationData {
    if let Err(violation) = validator::check(&req.diagram) {
        return ValidationData {
            valid: false,
            reason: Some(DiagramError::Input(violation).to_string()),
            services: BTreeSet::new(),
            connections: Vec::new(),
            unsupported_services: BTreeSet::new(),
        };
    }

    let services = extract_services(&req.diagram);
    ValidationData {
        valid: true,
        reason: None,
        connections: extract_connections(&req.diagram),
        unsupported_services: ctx.catalog.unsupported(&services),
        services,
    }
}

/// Structural changes between two well-formed diagrams
pub fn diff(req: &DiffRequest) -> Result<DiffData, ApiError> {
    validator::check(&req.original)
        .map_err(|v| ApiError::bad_request(DiagramError::Original(v).to_string()))?;
    validator::check(&req.corrected)
        .map_err(|v| ApiError::bad_request(DiagramError::Input(v).to_string()))?;
    Ok(DiffData {
        changes: crate::core::services::diff(&req.original, &req.corrected),
    })
}
