//! Domain models for archsec
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`diagram`] - The diagram micro-format ([`Connection`], [`Connector`])
//! - [`RiskItem`] / [`ComplianceIssue`] - Findings produced by analysis
//! - [`RiskLevel`] - Severity shared by findings
//! - [`Change`] - One difference between two diagrams
//! - [`ComplianceRule`] - A rule record supplied by the rule store
//! - [`ServiceCatalog`] - The fixed set of supported cloud services

mod catalog;
mod change;
pub mod diagram;
mod risk;
mod rule;
mod severity;

pub use catalog::{CloudService, ServiceCatalog};
pub use change::{Change, ChangeKind};
pub use diagram::{Connection, Connector, END_MARKER, START_MARKER};
pub use risk::{ComplianceIssue, RiskItem};
pub use rule::ComplianceRule;
pub use severity::RiskLevel;
