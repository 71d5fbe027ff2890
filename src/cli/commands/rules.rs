//! Rules command - look up compliance rules

use std::path::Path;
use std::process::ExitCode;

use archsec::api::{self, RulesQuery};
use archsec::output::OutputMode;

use super::{finish, offline_context};

/// Look up rules by service id or free text
pub fn rules(
    service: Option<String>,
    query: Option<String>,
    limit: Option<usize>,
    config: Option<&Path>,
    mode: OutputMode,
) -> anyhow::Result<ExitCode> {
    let ctx = offline_context(config)?;
    let query = RulesQuery {
        service,
        query,
        limit,
    };
    Ok(finish(api::rules(&ctx, &query), mode))
}
