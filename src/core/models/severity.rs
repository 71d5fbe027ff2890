//! Risk severity levels
//!
//! Shared by risk findings and compliance issues. Levels are ordered
//! `critical > high > medium > low`; anything the model invents outside
//! that set lands in [`RiskLevel::Unknown`] and ranks below `low`.

use serde::{Deserialize, Serialize};

/// Severity of a risk finding or compliance issue
///
/// Serialized as the lowercase wire name; deserialized leniently, so any
/// casing is accepted and unrecognized tags become [`RiskLevel::Unknown`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "String", into = "&'static str")]
pub enum RiskLevel {
    /// Unrecognized severity tag
    #[default]
    Unknown,
    /// Low severity
    Low,
    /// Medium severity
    Medium,
    /// High severity
    High,
    /// Critical severity
    Critical,
}

impl RiskLevel {
    /// All recognized levels, most severe first
    pub const RANKED: [Self; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    /// Lowercase wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Unknown => "unknown",
        }
    }

    /// Uppercase tag used in prompts and human output
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Parse a severity tag, mapping anything unrecognized to `Unknown`
    #[must_use]
    pub fn lenient(s: &str) -> Self {
        s.parse().unwrap_or(Self::Unknown)
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for RiskLevel {
    fn from(s: String) -> Self {
        let level = Self::lenient(&s);
        if level == Self::Unknown {
            log::warn!("Unrecognized severity '{s}', treating it as unknown");
        }
        level
    }
}

impl From<RiskLevel> for &'static str {
    fn from(level: RiskLevel) -> Self {
        level.as_str()
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(format!("Invalid severity: {s}. Use: critical, high, medium, low")),
        }
    }
}
