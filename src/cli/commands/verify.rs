//! Verify command - correct a diagram against known risks

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use serde::Deserialize;

use archsec::api::{self, VerificationRequest};
use archsec::core::models::RiskItem;
use archsec::output::OutputMode;

use super::{finish, full_context, read_input};

/// Accepted shapes of the risks file
#[derive(Deserialize)]
#[serde(untagged)]
enum RisksFile {
    List(Vec<RiskItem>),
    Wrapped { risks: Vec<RiskItem> },
}

fn load_risks(path: &Path) -> anyhow::Result<Vec<RiskItem>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let file: RisksFile = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a risk list", path.display()))?;
    Ok(match file {
        RisksFile::List(risks) | RisksFile::Wrapped { risks } => risks,
    })
}

/// Propose a corrected diagram for the risks in `risks_path`
pub fn verify(
    file: &str,
    risks_path: &Path,
    config: Option<&Path>,
    mode: OutputMode,
) -> anyhow::Result<ExitCode> {
    let req = VerificationRequest {
        original_diagram: read_input(file)?,
        risks: load_risks(risks_path)?,
    };
    let ctx = full_context(config)?;
    Ok(finish(api::verify(&ctx, &req), mode))
}
