//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between core business logic
//! and the outside world (language model, rule store).
//!
//! Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The orchestrators depend only on these traits, never on concrete
//! implementations, so tests drive them with in-memory fakes.

mod completion;
mod rule_store;

pub use completion::{ChatMessage, CompletionError, Role, TextCompletion};
pub use rule_store::RuleStore;
