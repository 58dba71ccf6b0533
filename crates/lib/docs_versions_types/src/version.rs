use derive_more::{Deref, Display, From, Into};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::str::FromStr;

/// Key of a documentation version in the registry.
///
/// NewType around semver::Version, (de)serialized as its display string
/// and ordered by semver precedence.
#[derive(
    Clone,
    Debug,
    Deref,
    DeserializeFromStr,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    SerializeDisplay,
)]
pub struct Version(pub semver::Version);

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(semver::Version::new(major, minor, patch))
    }

    pub fn parse(text: &str) -> Result<Self, semver::Error> {
        Version::from_str(text)
    }
}

impl FromStr for Version {
    type Err = semver::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Version(semver::Version::from_str(s.trim())?))
    }
}

impl TryFrom<&str> for Version {
    type Error = semver::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Version {
    type Error = semver::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
