//! Diagram change records produced by the differ

use serde::{Deserialize, Serialize};

/// What kind of difference a [`Change`] records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    /// A connection line present only in the corrected diagram
    #[serde(rename = "added")]
    ConnectionAdded,
    /// A connection line present only in the original diagram
    #[serde(rename = "removed")]
    ConnectionRemoved,
    /// A service type referenced only by the corrected diagram
    #[serde(rename = "service_added")]
    ServiceAdded,
    /// A service type referenced only by the original diagram
    #[serde(rename = "service_removed")]
    ServiceRemoved,
}

impl ChangeKind {
    /// Fixed reason attached to every change of this kind
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::ConnectionAdded => "Security improvement",
            Self::ConnectionRemoved => "Security risk mitigation",
            Self::ServiceAdded => "Security enhancement",
            Self::ServiceRemoved => "Security risk elimination",
        }
    }

    const fn verb(self) -> &'static str {
        match self {
            Self::ConnectionAdded => "Added connection",
            Self::ConnectionRemoved => "Removed connection",
            Self::ServiceAdded => "Added service",
            Self::ServiceRemoved => "Removed service",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ConnectionAdded => "added",
            Self::ConnectionRemoved => "removed",
            Self::ServiceAdded => "service_added",
            Self::ServiceRemoved => "service_removed",
        };
        f.write_str(s)
    }
}

/// One difference between an original and a corrected diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// Kind of change
    #[serde(rename = "type")]
    pub kind: ChangeKind,

    /// Human-readable description, e.g. `Added connection: <line>`
    pub description: String,

    /// Human-readable reason
    pub reason: String,
}

impl Change {
    /// Build the change record for `subject` (a connection line or service id)
    #[must_use]
    pub fn new(kind: ChangeKind, subject: &str) -> Self {
        Self {
            kind,
            description: format!("{}: {subject}", kind.verb()),
            reason: kind.reason().to_string(),
        }
    }
}
