//! Risk findings and compliance issues

use serde::{Deserialize, Serialize};

use super::RiskLevel;

/// A single security risk found in a diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskItem {
    /// Identifier, generated when the model omits one
    #[serde(default)]
    pub id: String,

    /// Severity level
    pub level: RiskLevel,

    /// Short title
    pub title: String,

    /// What is wrong and why it matters
    pub description: String,

    /// Catalog id of the affected service, if the risk is service-specific
    #[serde(default)]
    pub service_affected: Option<String>,

    /// How to fix it
    pub recommendation: String,

    /// Compliance rule the risk relates to
    #[serde(default)]
    pub compliance_rule: Option<String>,
}

impl RiskItem {
    /// Create a risk with no affected service or rule reference
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        level: RiskLevel,
        title: impl Into<String>,
        description: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            level,
            title: title.into(),
            description: description.into(),
            service_affected: None,
            recommendation: recommendation.into(),
            compliance_rule: None,
        }
    }

    /// Attach the affected service
    #[must_use]
    pub fn affecting(mut self, service: impl Into<String>) -> Self {
        self.service_affected = Some(service.into());
        self
    }
}

/// A violated compliance rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceIssue {
    /// Identifier, generated when the model omits one
    #[serde(default)]
    pub id: String,

    /// Name of the violated rule
    pub rule: String,

    /// Description of the violation
    pub description: String,

    /// Severity level
    pub severity: RiskLevel,

    /// Catalog ids of the services involved
    #[serde(default)]
    pub affected_services: Vec<String>,
}
