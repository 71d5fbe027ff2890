//! Diagram parsing
//!
//! Extraction over already-validated text. On malformed input these degrade
//! to whatever can be salvaged (usually nothing) instead of failing.

use std::collections::BTreeSet;

use crate::core::models::Connection;
use crate::core::models::diagram;

/// Distinct service types referenced by the diagram body
///
/// Fields 0 and 3 of every body line with at least four tokens.
#[must_use]
pub fn extract_services(text: &str) -> BTreeSet<String> {
    let lines = diagram::lines(text);
    let mut services = BTreeSet::new();

    for line in diagram::body(&lines) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() >= 4 {
            services.insert(tokens[0].to_string());
            services.insert(tokens[3].to_string());
        }
    }

    services
}

/// Trimmed, non-empty body lines in diagram order, duplicates kept
#[must_use]
pub fn extract_connections(text: &str) -> Vec<String> {
    let lines = diagram::lines(text);
    diagram::body(&lines)
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Typed connections for every body line that parses
#[must_use]
pub fn parse_connections(text: &str) -> Vec<Connection> {
    extract_connections(text).iter().filter_map(|line| Connection::parse(line)).collect()
}
