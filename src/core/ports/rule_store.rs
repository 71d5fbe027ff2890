//! Compliance rule store port
//!
//! Defines the interface for retrieving compliance rules. Lookups are
//! best-effort: implementations absorb their own failures and return an
//! empty list so analysis can continue with less context.

use super::super::models::ComplianceRule;

/// Source of compliance rule records
pub trait RuleStore: Send + Sync {
    /// All rules scoped to one catalog service
    fn rules_by_service(&self, service_id: &str) -> Vec<ComplianceRule>;

    /// Rules ranked by relevance to a free-text query, at most `limit`
    fn rules_by_free_text(&self, query: &str, limit: usize) -> Vec<ComplianceRule>;

    /// Short name for health reports
    fn name(&self) -> &str {
        "rules"
    }

    /// Whether the store can serve lookups
    fn health_check(&self) -> bool {
        true
    }
}
