use crate::{Overrides, RegistryError, VersionRecordBuilder};
use docs_versions_types::{Version, VersionRecord};
use serde::Serialize;
use tracing::debug;

/// The documentation versions of a site, in the order they were registered.
///
/// Every record is built once, either from scratch or from a record
/// registered earlier, and can't be changed afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionRegistry {
    entries: Vec<(Version, VersionRecord)>,
}

/// One line of the version selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Entry<'a> {
    pub version: &'a Version,
    pub is_default: bool,
    pub record: &'a VersionRecord,
}

impl VersionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, version: Version, record: VersionRecord) -> Result<(), RegistryError> {
        if self.contains(&version) {
            return Err(RegistryError::DuplicateVersion(version));
        }
        debug!(
            %version,
            title = record.title(),
            prerelease = record.prerelease(),
            "registering version"
        );
        self.entries.push((version, record));
        Ok(())
    }

    /// Register `version` with a copy of the record of `from`, changed by
    /// `overrides`.
    pub fn derive(
        &mut self,
        version: Version,
        from: &Version,
        overrides: &Overrides,
    ) -> Result<(), RegistryError> {
        let previous = self.predecessor(&version, from)?;
        let record = match VersionRecordBuilder::from_previous(previous).apply(overrides) {
            Ok(builder) => builder.build(),
            Err(source) => return Err(RegistryError::InvalidOverride { version, source }),
        };
        self.push(version, record)
    }

    /// Register `version` with a record built by `derive` from the record
    /// of `from`.
    pub fn derive_with<F>(
        &mut self,
        version: Version,
        from: &Version,
        derive: F,
    ) -> Result<(), RegistryError>
    where
        F: FnOnce(&VersionRecord) -> VersionRecord,
    {
        let record = derive(self.predecessor(&version, from)?);
        self.push(version, record)
    }

    fn predecessor(
        &self,
        version: &Version,
        from: &Version,
    ) -> Result<&VersionRecord, RegistryError> {
        self.get(from).ok_or_else(|| RegistryError::UnknownPredecessor {
            version: version.clone(),
            from: from.clone(),
        })
    }

    pub fn get(&self, version: &Version) -> Option<&VersionRecord> {
        self.entries
            .iter()
            .find(|(v, _)| v == version)
            .map(|(_, record)| record)
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.get(version).is_some()
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Version, &VersionRecord)> {
        self.entries.iter().map(|(version, record)| (version, record))
    }

    pub fn versions(&self) -> impl Iterator<Item = &Version> {
        self.entries.iter().map(|(version, _)| version)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The version shown when the reader didn't pick one: the newest
    /// version that isn't a prerelease.
    pub fn default_version(&self) -> Option<&Version> {
        self.iter()
            .filter(|(_, record)| !record.prerelease())
            .map(|(version, _)| version)
            .max()
    }

    /// The newest version, prereleases included.
    pub fn latest(&self) -> Option<&Version> {
        self.versions().max()
    }

    /// Selector entries, newest first.
    pub fn entries(&self) -> Vec<Entry<'_>> {
        let default = self.default_version();
        let mut entries: Vec<_> = self
            .iter()
            .map(|(version, record)| Entry {
                version,
                is_default: Some(version) == default,
                record,
            })
            .collect();
        entries.sort_unstable_by(|a, b| b.version.cmp(a.version));
        entries
    }
}
