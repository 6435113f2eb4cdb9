//! Report configuration read from the environment.

use crate::generate::GeneratorConfig;
use crate::ReportError;
use social_graph::SearchLimits;
use std::path::PathBuf;
use std::str::FromStr;

/// Runtime options for the report driver.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// JSON snapshot to load; when absent a network is generated.
    pub input: Option<PathBuf>,
    /// CSV summary destination.
    pub output: PathBuf,
    /// Optional full JSON report destination.
    pub json_output: Option<PathBuf>,
    pub seed: u64,
    pub generator: GeneratorConfig,
    /// Limits applied to the engagement-path search.
    pub limits: SearchLimits,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: PathBuf::from("network_summary.csv"),
            json_output: None,
            seed: 42,
            generator: GeneratorConfig::default(),
            limits: SearchLimits::unbounded(),
        }
    }
}

impl ReportConfig {
    /// Read `SOCIAL_*` variables, falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self, ReportError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ReportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let mut generator = defaults.generator.clone();
        if let Some(n) = parse_var(&lookup, "SOCIAL_MEMBERS")? {
            generator.member_count = n;
        }
        if let Some(n) = parse_var(&lookup, "SOCIAL_MAX_FOLLOWING")? {
            generator.max_following = n;
        }
        if generator.max_following == 0 {
            return Err(ReportError::Config(
                "SOCIAL_MAX_FOLLOWING must be at least 1".to_string(),
            ));
        }

        let limits = SearchLimits {
            max_depth: parse_var(&lookup, "SOCIAL_MAX_DEPTH")?,
            max_expansions: parse_var(&lookup, "SOCIAL_MAX_EXPANSIONS")?,
        };

        Ok(Self {
            input: lookup("SOCIAL_INPUT").map(PathBuf::from),
            output: lookup("SOCIAL_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.output),
            json_output: lookup("SOCIAL_JSON_OUTPUT").map(PathBuf::from),
            seed: parse_var(&lookup, "SOCIAL_SEED")?.unwrap_or(defaults.seed),
            generator,
            limits,
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ReportError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ReportError::Config(format!("{key}={raw:?}: {e}"))),
    }
}
