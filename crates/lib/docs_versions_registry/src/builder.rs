use docs_versions_types::{FieldError, Fields, VersionRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field overrides applied on top of a copied record.
///
/// Unset options keep the predecessor's value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Overrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Fields::is_empty")]
    pub fields: Fields,
    /// Inherited fields that should not be carried over.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub without_fields: Vec<String>,
}

/// Builds a new record from the record of a previous version.
///
/// ```
/// use docs_versions_registry::VersionRecordBuilder;
/// use docs_versions_types::VersionRecord;
///
/// let ga = VersionRecord::new("4.0.3");
/// let beta = VersionRecordBuilder::from_previous(&ga)
///     .prerelease(true)
///     .title("4.1.0.Beta1")
///     .build();
///
/// assert!(beta.prerelease());
/// assert_eq!(ga.title(), "4.0.3");
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct VersionRecordBuilder {
    record: VersionRecord,
}

impl VersionRecordBuilder {
    /// Start from a deep copy of `previous`.
    pub fn from_previous(previous: &VersionRecord) -> Self {
        Self {
            record: previous.clone(),
        }
    }

    pub fn prerelease(mut self, prerelease: bool) -> Self {
        self.record.set_prerelease(prerelease);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.record.set_title(title);
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: Value) -> Result<Self, FieldError> {
        self.record.set_field(name, value)?;
        Ok(self)
    }

    pub fn without_field(mut self, name: &str) -> Self {
        self.record.remove_field(name);
        self
    }

    /// Removals run before the field overrides, so a field can be dropped
    /// and re-added in one go. `title` and `prerelease` win over a same-named
    /// entry in `fields`.
    pub fn apply(mut self, overrides: &Overrides) -> Result<Self, FieldError> {
        for name in &overrides.without_fields {
            self = self.without_field(name);
        }
        for (name, value) in &overrides.fields {
            self = self.field(name.clone(), value.clone())?;
        }
        if let Some(prerelease) = overrides.prerelease {
            self = self.prerelease(prerelease);
        }
        if let Some(title) = &overrides.title {
            self = self.title(title.clone());
        }
        Ok(self)
    }

    pub fn build(self) -> VersionRecord {
        self.record
    }
}
