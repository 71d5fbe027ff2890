//! Business logic services
//!
//! The pure pieces ([`validator`], [`parser`], [`scorer`], [`differ`],
//! [`response`], [`prompt`]) operate on data passed in. The orchestrators
//! ([`analysis`], [`verification`]) compose them with the port traits.

pub mod analysis;
pub mod differ;
pub mod parser;
pub mod prompt;
pub mod response;
pub mod scorer;
pub mod validator;
pub mod verification;

pub use analysis::{AnalysisOptions, RiskAnalysis, RiskAnalyzer, dedupe_rules};
pub use differ::diff;
pub use parser::{extract_connections, extract_services, parse_connections};
pub use scorer::{MAX_SCORE, RiskScorer, SeverityWeights};
pub use validator::{FormatViolation, is_valid};
pub use verification::{Verification, Verifier};
