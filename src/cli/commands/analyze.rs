//! Analyze command - risk analysis, optionally followed by a correction

use std::path::Path;
use std::process::ExitCode;

use archsec::api::{self, AnalysisRequest};
use archsec::output::OutputMode;

use super::{finish, full_context, read_input};

/// Analyse a diagram
pub fn analyze(
    file: &str,
    with_verification: bool,
    config: Option<&Path>,
    mode: OutputMode,
) -> anyhow::Result<ExitCode> {
    let ctx = full_context(config)?;
    let req = AnalysisRequest {
        diagram: read_input(file)?,
    };

    let result = if with_verification {
        api::analyze(&ctx, &req)
    } else {
        api::analyze_only(&ctx, &req)
    };
    Ok(finish(result, mode))
}
