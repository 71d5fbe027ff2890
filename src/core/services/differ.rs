//! Diagram diffing
//!
//! Compares two diagrams by raw connection text and by referenced service
//! types. Lines that differ only in inner whitespace count as different
//! connections.
//!
//! Output order is fixed: added connections, removed connections, added
//! services, removed services; each group sorted lexicographically.

use std::collections::BTreeSet;

use crate::core::models::{Change, ChangeKind};

use super::parser::{extract_connections, extract_services};

/// Changes that turn `original` into `corrected`
#[must_use]
pub fn diff(original: &str, corrected: &str) -> Vec<Change> {
    let mut changes = Vec::new();

    let before: BTreeSet<String> = extract_connections(original).into_iter().collect();
    let after: BTreeSet<String> = extract_connections(corrected).into_iter().collect();
    push_group(&mut changes, ChangeKind::ConnectionAdded, after.difference(&before));
    push_group(&mut changes, ChangeKind::ConnectionRemoved, before.difference(&after));

    let before = extract_services(original);
    let after = extract_services(corrected);
    push_group(&mut changes, ChangeKind::ServiceAdded, after.difference(&before));
    push_group(&mut changes, ChangeKind::ServiceRemoved, before.difference(&after));

    changes
}

fn push_group<'a>(
    changes: &mut Vec<Change>,
    kind: ChangeKind,
    subjects: impl Iterator<Item = &'a String>,
) {
    changes.extend(subjects.map(|subject| Change::new(kind, subject)));
}
