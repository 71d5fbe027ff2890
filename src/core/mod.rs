//! Core domain logic for archsec
//!
//! This module contains pure business logic with no I/O dependencies.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (diagram format, risks, changes, rules, catalog)
//! - `services/` - Validation, parsing, scoring, diffing and the orchestrators
//! - `ports/` - Trait definitions for the language model and the rule store
//! - `error` - Failure taxonomy shared by the orchestrators

pub mod error;
pub mod models;
pub mod ports;
pub mod services;
