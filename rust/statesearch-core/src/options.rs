use serde::{Deserialize, Serialize};
use std::env;

use crate::error::SearchError;

pub const DEFAULT_LAP: u32 = 10_000;

pub const ENV_VERBOSE: &str = "STATESEARCH_VERBOSE";
pub const ENV_LAP: &str = "STATESEARCH_LAP";

/// Per-search diagnostics switch. Passed to an engine at construction and
/// never shared between searches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Emit a progress event while searching.
    pub verbose: bool,
    /// Expansions between two progress events.
    pub lap: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { verbose: false, lap: DEFAULT_LAP }
    }
}

impl SearchOptions {
    pub fn verbose(lap: u32) -> Self {
        Self { verbose: true, lap }
    }

    /// Reads `STATESEARCH_VERBOSE` and `STATESEARCH_LAP`, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, SearchError> {
        let mut opts = Self::default();
        if let Ok(raw) = env::var(ENV_VERBOSE) {
            opts.verbose = parse_flag(&raw).ok_or(SearchError::InvalidEnv { name: ENV_VERBOSE, value: raw })?;
        }
        if let Ok(raw) = env::var(ENV_LAP) {
            opts.lap = raw
                .trim()
                .parse::<u32>()
                .map_err(|_| SearchError::InvalidEnv { name: ENV_LAP, value: raw.clone() })?;
        }
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.lap == 0 {
            return Err(SearchError::ZeroLap);
        }
        Ok(())
    }

    /// True when a progress event is due after `expanded` expansions.
    #[inline]
    pub(crate) fn lap_due(&self, expanded: u64) -> bool {
        self.verbose && self.lap > 0 && expanded % u64::from(self.lap) == 0
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
