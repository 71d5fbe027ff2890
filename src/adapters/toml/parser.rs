//! TOML parser for compliance rule files
//!
//! A rule file is a list of `[[rules]]` tables. The bundled rule set is
//! compiled into the binary; users can point at their own file instead.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::core::models::ComplianceRule;

/// The rule set shipped with archsec
pub const BUILTIN_RULES: &str = include_str!("../../../rules/compliance_rules.toml");

/// A compliance rule file
#[derive(Debug, Default, Deserialize)]
pub struct RuleFile {
    /// Rules in file order
    #[serde(default)]
    pub rules: Vec<ComplianceRule>,
}

impl RuleFile {
    /// Give every id-less rule a `RULE-<n>` id, `n` being its 1-based position
    fn assign_missing_ids(&mut self) {
        for (i, rule) in self.rules.iter_mut().enumerate() {
            if rule.id.trim().is_empty() {
                rule.id = format!("RULE-{}", i + 1);
            }
        }
    }
}

/// Parse rule file content
pub fn parse_str(content: &str) -> anyhow::Result<RuleFile> {
    let mut file: RuleFile = toml::from_str(content).context("invalid rule file")?;
    file.assign_missing_ids();
    Ok(file)
}

/// Load and parse a rule file from disk
pub fn load_file(path: &Path) -> anyhow::Result<RuleFile> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_str(&content).with_context(|| format!("parsing {}", path.display()))
}

/// The bundled rule set
pub fn builtin() -> anyhow::Result<RuleFile> {
    parse_str(BUILTIN_RULES)
}
