use docs_versions_config::{AppConfig, maybe_env};
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct Config {
    /// Manifest to load instead of the built-in history.
    pub manifest: Option<PathBuf>,
}

impl AppConfig for Config {
    fn from_environment() -> anyhow::Result<Self> {
        Ok(Self {
            manifest: maybe_env("DOCSVERSIONS_MANIFEST")?,
        })
    }
}
