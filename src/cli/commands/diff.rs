//! Diff command - structural changes between two diagrams

use std::process::ExitCode;

use archsec::api::{self, DiffRequest};
use archsec::output::OutputMode;

use super::{finish, read_input};

/// Show what changed from `original` to `corrected`
pub fn diff(original: &str, corrected: &str, mode: OutputMode) -> anyhow::Result<ExitCode> {
    let req = DiffRequest {
        original: read_input(original)?,
        corrected: read_input(corrected)?,
    };
    Ok(finish(api::diff(&req), mode))
}
