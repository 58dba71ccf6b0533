use crate::{Version, VersionRecord};
use serde_json::json;

// versions of the documented project, as test constants
pub const V3_11_0: Version = Version::new(3, 11, 0);
pub const V4_0_0: Version = Version::new(4, 0, 0);

/// The GA record `4.1.0` is derived from.
pub fn record_4_0_3() -> VersionRecord {
    json!({ "version": "4.0.3", "prerelease": false, "title": "4.0.3" })
        .try_into()
        .expect("valid record literal")
}
