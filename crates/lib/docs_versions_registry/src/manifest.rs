//! The `versions.toml` manifest.
//!
//! ```text
//! [[version]]
//! version = "4.0.3"
//! title = "4.0.3"
//!
//! [version.fields]
//! version = "4.0.3"
//!
//! [[version]]
//! version = "4.1.0"
//! derive-from = "4.0.3"
//! prerelease = true
//! title = "4.1.0.Beta1"
//! ```
//!
//! Entries are registered in file order, so `derive-from` can only name an
//! entry further up.
//!
//! TOML dates and datetimes in `fields` are stored as their RFC 3339 string.

use crate::{Overrides, RegistryError, VersionRecordBuilder, VersionRegistry};
use docs_versions_types::{Fields, Version, VersionRecord};
use serde::Deserialize;
use serde_json::{Number, Value};
use std::{fs, path::Path, str::FromStr};
use tracing::{info, instrument};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    #[serde(default, rename = "version")]
    versions: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ManifestEntry {
    version: Version,
    derive_from: Option<Version>,
    prerelease: Option<bool>,
    title: Option<String>,
    #[serde(default)]
    fields: toml::Table,
    #[serde(default)]
    without_fields: Vec<String>,
}

impl ManifestEntry {
    fn register(self, registry: &mut VersionRegistry) -> Result<(), RegistryError> {
        let version = self.version;
        let mut fields = Fields::new();
        for (name, value) in self.fields {
            let Some(value) = json_value(value) else {
                return Err(RegistryError::NonFiniteFloat {
                    version,
                    field: name,
                });
            };
            fields.insert(name, value);
        }
        let overrides = Overrides {
            prerelease: self.prerelease,
            title: self.title,
            fields,
            without_fields: self.without_fields,
        };

        match self.derive_from {
            Some(from) => registry.derive(version, &from, &overrides),
            None => {
                let Some(title) = &overrides.title else {
                    return Err(RegistryError::MissingTitle(version));
                };
                let root = VersionRecord::new(title.clone());
                let record = match VersionRecordBuilder::from_previous(&root).apply(&overrides) {
                    Ok(builder) => builder.build(),
                    Err(source) => return Err(RegistryError::InvalidOverride { version, source }),
                };
                registry.push(version, record)
            }
        }
    }
}

/// `None` if the value holds a float JSON can't represent (`nan`, `inf`).
fn json_value(value: toml::Value) -> Option<Value> {
    Some(match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::Number(Number::from_f64(f)?),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(values) => Value::Array(
            values
                .into_iter()
                .map(json_value)
                .collect::<Option<_>>()?,
        ),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| Some((key, json_value(value)?)))
                .collect::<Option<_>>()?,
        ),
    })
}

impl VersionRegistry {
    /// Read the manifest at `path`, then build the registry it describes.
    ///
    /// If you already have the TOML as a string, use [`from_str`] instead.
    ///
    /// [`from_str`]: std::str::FromStr
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_manifest<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let buf = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry: Self = buf.parse()?;
        info!(
            versions = registry.len(),
            default = ?registry.default_version().map(ToString::to_string),
            "loaded version manifest"
        );
        Ok(registry)
    }
}

impl FromStr for VersionRegistry {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let manifest: Manifest = toml::from_str(s)?;
        let mut registry = VersionRegistry::new();
        for entry in manifest.versions {
            entry.register(&mut registry)?;
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{V4_0_3, V4_1_0};
    use docs_versions_types::testing::record_4_0_3;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io::Write as _;
    use test_case::test_case;

    const MANIFEST: &str = indoc! {r#"
        [[version]]
        version = "4.0.3"
        title = "4.0.3"
        prerelease = false

        [version.fields]
        version = "4.0.3"

        [[version]]
        version = "4.1.0"
        derive-from = "4.0.3"
        prerelease = true
        title = "4.1.0.Beta1"
    "#};

    #[test]
    fn parse_manifest() {
        let registry: VersionRegistry = MANIFEST.parse().unwrap();

        assert_eq!(registry.get(&V4_0_3), Some(&record_4_0_3()));
        assert_eq!(
            registry.get(&V4_1_0).unwrap().to_json(),
            json!({ "version": "4.0.3", "prerelease": true, "title": "4.1.0.Beta1" })
        );
    }

    #[test]
    fn empty_manifest_is_empty_registry() {
        let registry: VersionRegistry = "".parse().unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn nested_fields_and_removals() {
        let registry: VersionRegistry = indoc! {r#"
            [[version]]
            version = "4.0.3"
            title = "4.0.3"
            fields = { path = "/docs/4.0.3", search = { index = "v4" }, legacy = true }

            [[version]]
            version = "4.1.0"
            derive-from = "4.0.3"
            without-fields = ["legacy"]
            fields = { path = "/docs/4.1.0" }
        "#}
        .parse()
        .unwrap();

        assert_eq!(
            registry.get(&V4_1_0).unwrap().to_json(),
            json!({
                "prerelease": false,
                "title": "4.0.3",
                "path": "/docs/4.1.0",
                "search": { "index": "v4" },
            })
        );
        assert_eq!(
            registry.get(&V4_0_3).unwrap().field("legacy"),
            Some(json!(true))
        );
    }

    #[test]
    fn dates_export_as_rfc3339_strings() {
        let registry: VersionRegistry = indoc! {r#"
            [[version]]
            version = "4.0.3"
            title = "4.0.3"

            [version.fields]
            released = 2024-01-02
            ratio = 0.5
            history = [{ tagged = 1979-05-27T07:32:00Z }, { tagged = 1979-05-27T00:32:00-07:00 }]

            [[version]]
            version = "4.1.0"
            derive-from = "4.0.3"
            prerelease = true
            title = "4.1.0.Beta1"
        "#}
        .parse()
        .unwrap();

        let inherited = json!({
            "released": "2024-01-02",
            "ratio": 0.5,
            "history": [
                { "tagged": "1979-05-27T07:32:00Z" },
                { "tagged": "1979-05-27T00:32:00-07:00" },
            ],
        });
        assert_eq!(
            registry.to_json().unwrap()["versions"][0]["record"],
            json!({
                "prerelease": true,
                "title": "4.1.0.Beta1",
                "released": inherited["released"],
                "ratio": inherited["ratio"],
                "history": inherited["history"],
            })
        );
        assert_eq!(
            registry.get(&V4_0_3).unwrap().field("history"),
            Some(inherited["history"].clone())
        );
    }

    #[test_case("nan" ; "nan")]
    #[test_case("[1.0, -inf]" ; "nested infinity")]
    fn non_finite_floats_are_rejected(value: &str) {
        let err = format!("[[version]]\nversion = \"4.0.3\"\ntitle = \"4.0.3\"\nfields = {{ weight = {value} }}\n")
            .parse::<VersionRegistry>()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "field `weight` of version 4.0.3 is not a finite number"
        );
    }

    #[test]
    fn forward_reference_fails() {
        let err = indoc! {r#"
            [[version]]
            version = "4.1.0"
            derive-from = "4.0.3"

            [[version]]
            version = "4.0.3"
            title = "4.0.3"
        "#}
        .parse::<VersionRegistry>()
        .unwrap_err();

        assert!(matches!(
            err,
            RegistryError::UnknownPredecessor { version, from } if version == V4_1_0 && from == V4_0_3
        ));
    }

    #[test]
    fn root_entry_needs_title() {
        let err = indoc! {r#"
            [[version]]
            version = "4.0.3"
        "#}
        .parse::<VersionRegistry>()
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "version 4.0.3 needs a title, it doesn't derive from another version"
        );
    }

    #[test]
    fn duplicate_version_fails() {
        let manifest = format!("{MANIFEST}\n[[version]]\nversion = \"4.1.0\"\ntitle = \"again\"\n");
        assert!(matches!(
            manifest.parse::<VersionRegistry>(),
            Err(RegistryError::DuplicateVersion(v)) if v == V4_1_0
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = indoc! {r#"
            [[version]]
            version = "4.0.3"
            title = "4.0.3"
            prerelase = true
        "#}
        .parse::<VersionRegistry>()
        .unwrap_err();

        assert!(matches!(err, RegistryError::Parse(_)));
    }

    #[test]
    fn invalid_version_is_a_parse_error() {
        let err = indoc! {r#"
            [[version]]
            version = "4.1.0.Beta1"
            title = "4.1.0.Beta1"
        "#}
        .parse::<VersionRegistry>()
        .unwrap_err();

        assert!(matches!(err, RegistryError::Parse(_)));
    }

    #[test]
    fn load_from_disk() {
        docs_versions_logging::testing::init();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MANIFEST.as_bytes()).unwrap();

        let registry = VersionRegistry::from_manifest(file.path()).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.default_version(), Some(&V4_0_3));
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("versions.toml");

        let err = VersionRegistry::from_manifest(&path).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("failed to read manifest {}", path.display())
        );
    }
}
