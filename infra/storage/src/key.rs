use crate::error::StorageError;
use std::fmt;

/// Longest accepted key, in bytes.
pub const MAX_KEY_LEN: usize = 128;

/// A validated storage key.
///
/// Keys map one-to-one onto file names inside the storage root, so they are limited
/// to ASCII letters, digits, `_`, `-` and `.`, must not start with a dot, and can
/// never contain a path separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageKey(String);

impl StorageKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for StorageKey {
    type Error = StorageError;

    fn try_from(value: &str) -> Result<Self, StorageError> {
        if value.is_empty() {
            return Err(StorageError::InvalidKey {
                message: "EMPTY".into(),
                context: Some("Key cannot be empty".into()),
            });
        }

        if value.len() > MAX_KEY_LEN {
            return Err(StorageError::InvalidKey {
                message: value.to_owned().into(),
                context: Some(format!("Key exceeds {MAX_KEY_LEN} bytes").into()),
            });
        }

        if value.starts_with('.') {
            return Err(StorageError::InvalidKey {
                message: value.to_owned().into(),
                context: Some("Key cannot start with a dot".into()),
            });
        }

        if !value.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')) {
            return Err(StorageError::InvalidKey {
                message: value.to_owned().into(),
                context: Some("Key contains illegal characters".into()),
            });
        }

        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for StorageKey {
    type Error = StorageError;

    fn try_from(value: String) -> Result<Self, StorageError> {
        Self::try_from(value.as_str())
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_keys() {
        for key in ["app_settings", "dashboard.v2", "cache-01"] {
            assert!(StorageKey::try_from(key).is_ok(), "{key} should be accepted");
        }
    }

    #[test]
    fn rejects_traversal_and_separators() {
        for key in ["", "../etc/passwd", "a/b", "a\\b", ".hidden", "with space"] {
            assert!(
                matches!(StorageKey::try_from(key), Err(StorageError::InvalidKey { .. })),
                "{key:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_overlong_keys() {
        let key = "k".repeat(MAX_KEY_LEN + 1);
        assert!(StorageKey::try_from(key).is_err());
        assert!(StorageKey::try_from("k".repeat(MAX_KEY_LEN)).is_ok());
    }
}
