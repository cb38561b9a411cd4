//! Type-safe location identifier.
//!
//! [`LocationCode`] is a newtype around the opaque string key the data
//! feed uses for each tracked region, so codes cannot be confused with
//! captions or other free-form strings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque key identifying a tracked geographic region.
///
/// Used as the map key in the location table and the snapshot table, as
/// the last path segment of the remote snapshot URL, and as the cache
/// file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationCode(String);

impl LocationCode {
    /// Creates a `LocationCode` from any string-like value.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a variant of the code safe to use as a single file name.
    ///
    /// Anything other than ASCII alphanumerics, `-` and `_` is replaced by
    /// `_`, so the result never contains a path separator or `..`.
    #[must_use]
    pub fn file_stem(&self) -> String {
        self.0
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}

impl fmt::Display for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<String> for LocationCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl AsRef<str> for LocationCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
