//! Configuration plumbing shared by the docs-versions crates.
//!
//! Every crate that needs settings exposes a `Config` struct implementing
//! [`AppConfig`], filled from `DOCSVERSIONS_*` environment variables through
//! the helpers below.

use anyhow::{Context as _, Result, anyhow};
use std::{env::VarError, error::Error, str::FromStr};
use tracing::trace;

/// The main config trait for an application or library config.
pub trait AppConfig: Sized {
    fn from_environment() -> Result<Self>;

    #[cfg(feature = "testing")]
    fn test_config() -> Result<Self> {
        Self::from_environment()
    }
}

/// Read and parse `var`, falling back to `default` when it is unset.
pub fn env<T>(var: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Error + Send + Sync + 'static,
{
    Ok(maybe_env(var)?.unwrap_or(default))
}

/// Read and parse `var`, failing when it is unset.
pub fn require_env<T>(var: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Error + Send + Sync + 'static,
{
    maybe_env(var)?.with_context(|| anyhow!("configuration variable {var} is missing"))
}

/// Read and parse `var`.
///
/// An unset variable is `Ok(None)`, a set but unparsable one is an error.
pub fn maybe_env<T>(var: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Error + Send + Sync + 'static,
{
    match std::env::var(var) {
        Ok(content) => content
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("failed to parse configuration variable {var}")),
        Err(VarError::NotPresent) => {
            trace!(var, "optional configuration variable is not set");
            Ok(None)
        }
        Err(VarError::NotUnicode(_)) => Err(anyhow!("configuration variable {var} is not UTF-8")),
    }
}
