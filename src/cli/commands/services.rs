//! Services command - list the catalog

use std::path::Path;
use std::process::ExitCode;

use archsec::api;
use archsec::output::{OutputMode, Report};

use super::offline_context;

/// List supported cloud services
pub fn services(config: Option<&Path>, mode: OutputMode) -> anyhow::Result<ExitCode> {
    let ctx = offline_context(config)?;
    api::list_services(&ctx).render(mode);
    Ok(ExitCode::SUCCESS)
}
