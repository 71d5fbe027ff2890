//! Error taxonomy for the analysis pipeline
//!
//! Each orchestration step fails with a [`StepError`]; the orchestrators wrap
//! it into a single [`OrchestrationError`] per operation. Diagram format
//! errors are the only client-classified failures.

use thiserror::Error;

use super::ports::CompletionError;
use super::services::validator::FormatViolation;

/// A diagram failed the micro-format grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagramError {
    /// The diagram submitted for analysis
    #[error("Invalid diagram format: {0}")]
    Input(FormatViolation),

    /// The original diagram submitted for verification
    #[error("Invalid original diagram format: {0}")]
    Original(FormatViolation),

    /// The corrected diagram returned by the model
    #[error("Generated diagram has invalid format: {0}")]
    Generated(FormatViolation),
}

impl DiagramError {
    /// The grammar rule that was broken
    #[must_use]
    pub const fn violation(&self) -> &FormatViolation {
        match self {
            Self::Input(v) | Self::Original(v) | Self::Generated(v) => v,
        }
    }
}

/// Model output broke the JSON response contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    /// Output is not parseable as JSON, fenced or not
    #[error("Invalid response format from AI: {0}")]
    InvalidFormat(String),

    /// Output is JSON but a required key is missing or mistyped
    #[error("Invalid response structure: {0}")]
    InvalidStructure(String),
}

/// Failure of a single orchestration step
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// Diagram grammar violation
    #[error(transparent)]
    Diagram(#[from] DiagramError),

    /// Response-contract violation
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// Completion service failure
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

/// The single failure signal an orchestration surfaces
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestrationError {
    /// Risk analysis did not complete
    #[error("Risk analysis failed: {0}")]
    Analysis(#[source] StepError),

    /// Verification did not complete
    #[error("Verification failed: {0}")]
    Verification(#[source] StepError),
}

impl OrchestrationError {
    /// The step failure that caused this error
    #[must_use]
    pub const fn step(&self) -> &StepError {
        match self {
            Self::Analysis(e) | Self::Verification(e) => e,
        }
    }

    /// Whether this is a format error, reported to callers as their fault
    ///
    /// Includes a malformed corrected diagram: the caller may retry with a
    /// different diagram or risk list.
    #[must_use]
    pub const fn is_client_fault(&self) -> bool {
        matches!(self.step(), StepError::Diagram(_))
    }
}
