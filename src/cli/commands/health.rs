//! Health command - probe the model and the rule store

use std::path::Path;
use std::process::ExitCode;

use archsec::api;
use archsec::output::{OutputMode, Report};

use super::full_context;

/// Report collaborator health; exits 1 when degraded
pub fn health(config: Option<&Path>, mode: OutputMode) -> anyhow::Result<ExitCode> {
    let ctx = full_context(config)?;
    let report = api::health(&ctx);
    report.render(mode);

    if let Err(err) = api::ensure_healthy(&report) {
        log::warn!("{err}");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
