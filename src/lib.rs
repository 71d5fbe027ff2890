//! archsec - Security analysis for cloud architecture diagrams
//!
//! This library validates and parses a small text format for cloud
//! architecture diagrams, scores and diffs them, and orchestrates a
//! language model to find security risks and propose corrected diagrams.
//!
//! - [`core`] - Domain models, port traits and pure services
//! - [`adapters`] - TOML rule store and the chat-completions client
//! - [`api`] - Transport-agnostic request handlers
//! - [`config`] - Settings loading
//! - [`output`] - Human and JSON rendering

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod output;
pub mod paths;
