//! Registry of the documentation versions of a site.
//!
//! Each version is described by a [`VersionRecord`]. A new version usually
//! starts as a copy of the previous version's record with a few fields
//! changed, see [`VersionRecordBuilder`]. The [`VersionRegistry`] keeps all
//! records in an explicit order and decides which one is shown by default.

mod builder;
mod config;
mod errors;
mod export;
pub mod history;
mod manifest;
mod registry;

pub use builder::{Overrides, VersionRecordBuilder};
pub use config::Config;
pub use docs_versions_types::{Fields, Version, VersionRecord};
pub use errors::RegistryError;
pub use export::Export;
pub use registry::{Entry, VersionRegistry};

use tracing::debug;

impl VersionRegistry {
    /// The registry from the configured manifest, or the built-in history
    /// when none is configured.
    pub fn load(config: &Config) -> Result<Self, RegistryError> {
        match &config.manifest {
            Some(path) => Self::from_manifest(path),
            None => {
                debug!("no manifest configured, using built-in history");
                history::builtin()
            }
        }
    }
}
