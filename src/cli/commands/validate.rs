//! Validate command - check a diagram's format

use std::path::Path;
use std::process::ExitCode;

use archsec::api::{self, ValidateRequest};
use archsec::output::{OutputMode, Report};

use super::{offline_context, read_input};

/// Validate a diagram; exits 1 when it is malformed
pub fn validate(file: &str, config: Option<&Path>, mode: OutputMode) -> anyhow::Result<ExitCode> {
    let ctx = offline_context(config)?;
    let req = ValidateRequest {
        diagram: read_input(file)?,
    };

    let report = api::validate(&ctx, &req);
    report.render(mode);

    Ok(if report.valid { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
