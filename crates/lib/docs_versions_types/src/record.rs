use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The fields of a record we don't interpret ourselves.
///
/// Insertion ordered, so exported records keep the field order of the manifest.
pub type Fields = serde_json::Map<String, Value>;

const TITLE: &str = "title";
const PRERELEASE: &str = "prerelease";

#[derive(Debug, Error, PartialEq)]
pub enum FieldError {
    #[error("field `{field}` must be a {expected}, got `{got}`")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        got: Value,
    },
}

/// Metadata describing one documentation version.
///
/// `prerelease` and `title` are what the version selector needs. Everything
/// else the site stores about a version is carried along untouched in
/// [`Fields`]. The record owns all of its data; cloning it gives a fully
/// independent copy, nested objects and arrays included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    /// Not generally available yet. Prereleases can be picked from the
    /// version selector but never become the default entry.
    #[serde(default)]
    prerelease: bool,
    title: String,
    #[serde(flatten)]
    fields: Fields,
}

impl VersionRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            prerelease: false,
            title: title.into(),
            fields: Fields::new(),
        }
    }

    /// Assemble a record from its parts.
    ///
    /// `title` and `prerelease` entries in `fields` are dropped, the typed
    /// arguments win.
    pub fn from_parts(prerelease: bool, title: impl Into<String>, mut fields: Fields) -> Self {
        fields.remove(TITLE);
        fields.remove(PRERELEASE);
        Self {
            prerelease,
            title: title.into(),
            fields,
        }
    }

    pub fn prerelease(&self) -> bool {
        self.prerelease
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn set_prerelease(&mut self, prerelease: bool) {
        self.prerelease = prerelease;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Look up any field by its serialized name, including `title` and
    /// `prerelease`.
    pub fn field(&self, name: &str) -> Option<Value> {
        match name {
            TITLE => Some(Value::String(self.title.clone())),
            PRERELEASE => Some(Value::Bool(self.prerelease)),
            _ => self.fields.get(name).cloned(),
        }
    }

    /// Set any field by its serialized name.
    ///
    /// `title` and `prerelease` are routed to their typed slots and have to
    /// carry a string and a bool respectively.
    pub fn set_field(&mut self, name: impl Into<String>, value: Value) -> Result<(), FieldError> {
        let name = name.into();
        match name.as_str() {
            TITLE => match value {
                Value::String(title) => self.title = title,
                got => {
                    return Err(FieldError::WrongType {
                        field: TITLE,
                        expected: "string",
                        got,
                    });
                }
            },
            PRERELEASE => match value {
                Value::Bool(prerelease) => self.prerelease = prerelease,
                got => {
                    return Err(FieldError::WrongType {
                        field: PRERELEASE,
                        expected: "bool",
                        got,
                    });
                }
            },
            _ => {
                self.fields.insert(name, value);
            }
        }
        Ok(())
    }

    /// Mutable access to an untyped field, for in-place edits of nested
    /// values.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.get_mut(name)
    }

    /// Drop an untyped field. `title` and `prerelease` always exist and
    /// can't be removed.
    pub fn remove_field(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    pub fn to_json(&self) -> Value {
        let mut object = Fields::new();
        object.insert(PRERELEASE.into(), Value::Bool(self.prerelease));
        object.insert(TITLE.into(), Value::String(self.title.clone()));
        object.extend(self.fields.clone());
        Value::Object(object)
    }
}

impl TryFrom<Value> for VersionRecord {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}

impl From<&VersionRecord> for Value {
    fn from(record: &VersionRecord) -> Self {
        record.to_json()
    }
}
