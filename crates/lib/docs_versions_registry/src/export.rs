use crate::{Entry, VersionRegistry};
use docs_versions_types::Version;
use serde::Serialize;
use std::io;

/// The document handed to the site: every version for the selector plus
/// the one to show by default.
///
/// The version key is kept next to the record instead of being merged into
/// it, records may carry their own `version` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Export<'a> {
    pub default: Option<&'a Version>,
    pub latest: Option<&'a Version>,
    pub versions: Vec<Entry<'a>>,
}

impl VersionRegistry {
    pub fn export(&self) -> Export<'_> {
        Export {
            default: self.default_version(),
            latest: self.latest(),
            versions: self.entries(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self.export())
    }

    pub fn write_json<W: io::Write>(&self, writer: W, pretty: bool) -> serde_json::Result<()> {
        if pretty {
            serde_json::to_writer_pretty(writer, &self.export())
        } else {
            serde_json::to_writer(writer, &self.export())
        }
    }
}
