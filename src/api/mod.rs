//! HTTP-agnostic API layer
//!
//! This module provides typed request/response structures and pure business logic
//! handlers that can be used by any HTTP server implementation or directly by
//! clients such as the CLI.
//!
//! ## Design
//!
//! - **Handlers are pure functions**: Take an [`ApiContext`] and typed input, return `Result<T, ApiError>`
//! - **Types are framework-agnostic**: No HTTP types leak into this module
//! - **Errors carry HTTP semantics**: `ApiError` knows its status code for translation
//! - **Handlers block**: with the `llm` feature the model client drives its own
//!   tokio runtime, so an async server must call handlers via
//!   `tokio::task::spawn_blocking` rather than directly from a task

mod error;
mod handlers;
mod types;

pub use error::{ApiError, ApiErrorData, ErrorCode};
pub use handlers::{
    ApiContext, analyze, analyze_and_verify, analyze_only, diff, ensure_healthy, health,
    list_services, rules, validate, verify,
};
pub use types::{
    AnalysisData, AnalysisRequest, ApiResponse, DiffData, DiffRequest, HealthData, RulesData,
    RulesQuery, ServicesData, ValidateRequest, ValidationData, VerificationRequest,
};
