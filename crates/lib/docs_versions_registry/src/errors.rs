use docs_versions_types::{FieldError, Version};
use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    #[error("failed to read manifest {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse manifest")]
    Parse(#[from] toml::de::Error),

    #[error("version {0} is registered twice")]
    DuplicateVersion(Version),

    #[error("version {version} derives from {from}, which is not registered before it")]
    UnknownPredecessor { version: Version, from: Version },

    #[error("version {0} needs a title, it doesn't derive from another version")]
    MissingTitle(Version),

    #[error("field `{field}` of version {version} is not a finite number")]
    NonFiniteFloat { version: Version, field: String },

    #[error("invalid field override for version {version}")]
    InvalidOverride {
        version: Version,
        #[source]
        source: FieldError,
    },
}
