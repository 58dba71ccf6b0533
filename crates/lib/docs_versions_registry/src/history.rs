//! The versions of the documentation site, built in release order.

use crate::{RegistryError, VersionRecordBuilder, VersionRegistry};
use docs_versions_types::{Fields, Version, VersionRecord};
use serde_json::json;

pub const V4_0_3: Version = Version::new(4, 0, 3);
pub const V4_1_0: Version = Version::new(4, 1, 0);

pub fn v4_0_3() -> VersionRecord {
    let mut fields = Fields::new();
    fields.insert("version".into(), json!("4.0.3"));
    VersionRecord::from_parts(false, "4.0.3", fields)
}

/// First beta of the 4.1 line.
pub fn v4_1_0(previous: &VersionRecord) -> VersionRecord {
    VersionRecordBuilder::from_previous(previous)
        // selectable from the dropdown, the default entry stays on the latest GA release
        .prerelease(true)
        .title("4.1.0.Beta1")
        .build()
}

pub fn builtin() -> Result<VersionRegistry, RegistryError> {
    let mut registry = VersionRegistry::new();
    registry.push(V4_0_3, v4_0_3())?;
    registry.derive_with(V4_1_0, &V4_0_3, v4_1_0)?;
    Ok(registry)
}
