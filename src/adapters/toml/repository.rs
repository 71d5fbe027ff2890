//! TOML-backed rule store
//!
//! Implements the `RuleStore` port over an in-memory rule list loaded from a
//! rule file. Free-text lookup ranks rules by how many distinct query terms
//! appear in their text; embedding search is left to external stores.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::models::ComplianceRule;
use crate::core::ports::RuleStore;

use super::parser::{builtin, load_file};

static TERM: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[a-z0-9]+").ok());

/// Terms shorter than this carry no signal (`->`, ids like `db`)
const MIN_TERM_LEN: usize = 3;

/// Rule store backed by a TOML rule file
#[derive(Debug, Clone, Default)]
pub struct TomlRuleStore {
    rules: Vec<ComplianceRule>,
}

impl TomlRuleStore {
    /// Store over an explicit rule list
    #[must_use]
    pub const fn new(rules: Vec<ComplianceRule>) -> Self {
        Self { rules }
    }

    /// Store over the bundled rule set
    pub fn builtin() -> anyhow::Result<Self> {
        Ok(Self::new(builtin()?.rules))
    }

    /// Store over a rule file on disk
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let file = load_file(path)?;
        log::debug!("Loaded {} compliance rules from {}", file.rules.len(), path.display());
        Ok(Self::new(file.rules))
    }

    /// Every rule in file order
    #[must_use]
    pub fn rules(&self) -> &[ComplianceRule] {
        &self.rules
    }
}

fn terms(text: &str) -> HashSet<String> {
    let lower = text.to_lowercase();
    TERM.as_ref()
        .map(|re| {
            re.find_iter(&lower)
                .map(|m| m.as_str())
                .filter(|t| t.len() >= MIN_TERM_LEN)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

impl RuleStore for TomlRuleStore {
    fn rules_by_service(&self, service_id: &str) -> Vec<ComplianceRule> {
        self.rules
            .iter()
            .filter(|r| r.service_id.as_deref() == Some(service_id))
            .cloned()
            .collect()
    }

    fn rules_by_free_text(&self, query: &str, limit: usize) -> Vec<ComplianceRule> {
        let wanted = terms(query);
        if wanted.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(usize, usize)> = self
            .rules
            .iter()
            .enumerate()
            .map(|(i, rule)| (terms(&rule.searchable_text()).intersection(&wanted).count(), i))
            .filter(|(hits, _)| *hits > 0)
            .collect();

        // Highest overlap first; file order breaks ties.
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        scored.into_iter().take(limit).map(|(_, i)| self.rules[i].clone()).collect()
    }

    fn health_check(&self) -> bool {
        !self.rules.is_empty()
    }
}
