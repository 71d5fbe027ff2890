//! API request and response types
//!
//! All types are framework-agnostic and can be used by any client.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::core::models::{Change, CloudService, ComplianceRule, RiskItem};
use crate::core::services::{RiskAnalysis, Verification};

use super::error::ApiErrorData;

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Standard API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorData>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    #[must_use]
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorData {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request body for analysis
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    /// Diagram text
    pub diagram: String,
}

/// Request body for verification
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationRequest {
    /// Diagram to correct
    pub original_diagram: String,
    /// Risks the correction should address
    #[serde(default)]
    pub risks: Vec<RiskItem>,
}

/// Request body for format validation
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateRequest {
    /// Diagram text
    pub diagram: String,
}

/// Request body for a structural diff
#[derive(Debug, Clone, Deserialize)]
pub struct DiffRequest {
    /// Diagram before
    pub original: String,
    /// Diagram after
    pub corrected: String,
}

/// Query for compliance rules
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulesQuery {
    /// Exact service id match
    #[serde(default)]
    pub service: Option<String>,
    /// Free-text search
    #[serde(default)]
    pub query: Option<String>,
    /// Cap on free-text results
    #[serde(default)]
    pub limit: Option<usize>,
}

// =============================================================================
// RESPONSE DATA TYPES
// =============================================================================

/// Combined analysis and verification result
#[derive(Debug, Serialize)]
pub struct AnalysisData {
    /// Risk analysis
    pub analysis: RiskAnalysis,
    /// Corrected diagram; absent when verification was not requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<Verification>,
}

/// Health report
#[derive(Debug, Serialize)]
pub struct HealthData {
    /// `healthy` or `degraded`
    pub status: String,
    /// archsec version
    pub version: String,
    /// Per-collaborator status: `healthy` or `unhealthy: <reason>`
    pub services: BTreeMap<String, String>,
    /// When the probe ran (RFC3339)
    pub checked_at: String,
}

impl HealthData {
    /// Whether every collaborator answered
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Supported cloud services
#[derive(Debug, Serialize)]
pub struct ServicesData {
    /// Services in catalog order
    pub services: Vec<CloudService>,
}

/// Validation result for one diagram
#[derive(Debug, Serialize)]
pub struct ValidationData {
    /// Whether the diagram is well-formed
    pub valid: bool,
    /// First format violation, when invalid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Services referenced by the diagram
    pub services: BTreeSet<String>,
    /// Connection lines
    pub connections: Vec<String>,
    /// Referenced services missing from the catalog
    pub unsupported_services: BTreeSet<String>,
}

/// Structural differences between two diagrams
#[derive(Debug, Serialize)]
pub struct DiffData {
    /// Changes, grouped by kind
    pub changes: Vec<Change>,
}

/// Compliance rules matching a query
#[derive(Debug, Serialize)]
pub struct RulesData {
    /// Matching rules
    pub rules: Vec<ComplianceRule>,
}
