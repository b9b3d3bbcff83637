use anyhow::Context;
use statesearch_core::SearchOptions;

/// Search options from `STATESEARCH_*` environment variables, with command
/// line flags taking precedence.
pub fn resolve_options(verbose: bool, lap: Option<u32>) -> anyhow::Result<SearchOptions> {
    let mut opts = SearchOptions::from_env().context("reading search options from environment")?;
    if verbose {
        opts.verbose = true;
    }
    if let Some(lap) = lap {
        opts.lap = lap;
    }
    opts.validate().context("invalid --lap")?;
    Ok(opts)
}
