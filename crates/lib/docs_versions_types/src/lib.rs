mod record;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
mod version;

pub use record::{FieldError, Fields, VersionRecord};
pub use version::Version;
