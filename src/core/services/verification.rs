//! Verification orchestrator
//!
//! Asks the model for a corrected diagram, insists the correction is itself
//! well-formed, then diffs it against the original.

use serde::{Deserialize, Serialize};

use crate::core::error::{DiagramError, OrchestrationError, StepError};
use crate::core::models::{Change, RiskItem, ServiceCatalog};
use crate::core::ports::TextCompletion;

use super::differ::diff;
use super::prompt::{VERIFICATION_KEYS, verification_messages};
use super::response::{field, parse_contract};
use super::validator;

/// Default sampling temperature for the correction call
pub const DEFAULT_VERIFICATION_TEMPERATURE: f32 = 0.2;

/// Result of verifying one diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    /// Diagram as submitted
    pub original: String,
    /// Diagram as corrected by the model
    pub corrected: String,
    /// Differences between the two
    pub changes: Vec<Change>,
    /// Model-written explanation of the changes
    pub explanation: String,
}

/// Produces corrected diagrams for a list of risks
#[derive(Clone, Copy)]
pub struct Verifier<'a> {
    completion: &'a dyn TextCompletion,
    catalog: &'a ServiceCatalog,
    temperature: f32,
}

impl std::fmt::Debug for Verifier<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier")
            .field("completion", &self.completion.name())
            .field("catalog", &self.catalog.len())
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl<'a> Verifier<'a> {
    /// Create a verifier over the given collaborators
    #[must_use]
    pub const fn new(completion: &'a dyn TextCompletion, catalog: &'a ServiceCatalog) -> Self {
        Self {
            completion,
            catalog,
            temperature: DEFAULT_VERIFICATION_TEMPERATURE,
        }
    }

    /// Override the sampling temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Correct `original` so it addresses `risks`
    pub fn verify(&self, original: &str, risks: &[RiskItem]) -> Result<Verification, OrchestrationError> {
        log::info!("Starting verification with {} risks", risks.len());
        self.run(original, risks).map_err(|e| {
            log::error!("Verification failed: {e}");
            OrchestrationError::Verification(e)
        })
    }

    fn run(&self, original: &str, risks: &[RiskItem]) -> Result<Verification, StepError> {
        validator::check(original).map_err(DiagramError::Original)?;

        let messages = verification_messages(self.catalog, original, risks);
        let raw = self.completion.complete(&messages, self.temperature)?;
        let object = parse_contract(&raw, &VERIFICATION_KEYS)?;

        let corrected: String = field(&object, "corrected_diagram")?;
        let explanation: String = field(&object, "explanation")?;
        validator::check(&corrected).map_err(DiagramError::Generated)?;

        let changes = diff(original, &corrected);
        log::info!("Verification complete: {} changes", changes.len());

        Ok(Verification {
            original: original.to_string(),
            corrected,
            changes,
            explanation,
        })
    }
}
