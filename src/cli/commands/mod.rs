//! Command implementations

mod analyze;
mod diff;
mod health;
mod rules;
mod services;
mod validate;
mod verify;

use std::fs;
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;

use archsec::adapters::OfflineCompletion;
use archsec::api::{ApiContext, ApiError};
use archsec::config::Settings;
use archsec::output::{OutputMode, Report, render_error};

pub use analyze::analyze;
pub use diff::diff;
pub use health::health;
pub use rules::rules;
pub use services::services;
pub use validate::validate;
pub use verify::verify;

/// Read a file argument, `-` meaning stdin
fn read_input(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("reading {path}"))
}

fn load_settings(config: Option<&Path>) -> anyhow::Result<Settings> {
    let cwd = std::env::current_dir().context("resolving current directory")?;
    Settings::load(config, &cwd)
}

/// Full context: model client and rule store
fn full_context(config: Option<&Path>) -> anyhow::Result<ApiContext> {
    ApiContext::from_settings(&load_settings(config)?)
}

/// Context for commands that never call the model
fn offline_context(config: Option<&Path>) -> anyhow::Result<ApiContext> {
    let settings = load_settings(config)?;
    let rules = settings.rule_store()?;
    let options = settings.analysis_options();
    let completion = OfflineCompletion::new("not used by this command");
    Ok(ApiContext::new(Box::new(completion), Box::new(rules))
        .with_catalog(settings.services)
        .with_options(options))
}

/// Print a handler result; failures exit with status 1
fn finish<T: Report>(result: Result<T, ApiError>, mode: OutputMode) -> ExitCode {
    match result {
        Ok(data) => {
            data.render(mode);
            ExitCode::SUCCESS
        },
        Err(err) => {
            log::debug!("Command failed with {} ({})", err.code.as_str(), err.status_code());
            render_error(&err, mode);
            ExitCode::FAILURE
        },
    }
}
