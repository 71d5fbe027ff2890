//! Compliance rule records
//!
//! Rules come from the rule store and are only read by the core: formatted
//! into prompt text and deduplicated by `id`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A compliance rule or best practice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRule {
    /// Unique identifier within the store
    #[serde(default)]
    pub id: String,

    /// Rule title
    pub title: String,

    /// One-sentence statement of the rule
    pub description: String,

    /// Longer guidance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Catalog service the rule applies to; `None` for architecture-wide rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,

    /// Category, e.g. "Network Security"
    #[serde(default)]
    pub category: String,

    /// Severity tag as stored (free text)
    #[serde(default = "default_severity")]
    pub severity: String,

    /// Cloud provider, or "General"
    #[serde(default)]
    pub provider: String,

    /// Arbitrary extra attributes (control ids, OWASP category, ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

fn default_severity() -> String {
    "medium".to_string()
}

impl ComplianceRule {
    /// Text the free-text search ranks against
    #[must_use]
    pub fn searchable_text(&self) -> String {
        format!(
            "{} {} {}",
            self.title,
            self.description,
            self.details.as_deref().unwrap_or_default()
        )
    }
}
