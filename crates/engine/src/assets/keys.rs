use std::borrow::Cow;
use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetKeyError {
    #[error("asset key must not be empty")]
    Empty,
    #[error("asset key contains invalid character '{character}'")]
    InvalidCharacter { character: char },
}

/// Resource name: a file name without folder or extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetKey(Cow<'static, str>);

impl AssetKey {
    /// Validated at compile time when evaluated in a `const`.
    pub const fn from_static(key: &'static str) -> Self {
        assert!(is_valid_key(key.as_bytes()), "invalid asset key");
        Self(Cow::Borrowed(key))
    }

    pub fn new(key: impl Into<String>) -> Result<Self, AssetKeyError> {
        let key = key.into();
        validate_asset_key(&key)?;
        Ok(Self(Cow::Owned(key)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate_asset_key(key: &str) -> Result<(), AssetKeyError> {
    if key.is_empty() {
        return Err(AssetKeyError::Empty);
    }
    for ch in key.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-') {
            continue;
        }
        return Err(AssetKeyError::InvalidCharacter { character: ch });
    }
    Ok(())
}

const fn is_valid_key(bytes: &[u8]) -> bool {
    if bytes.is_empty() {
        return false;
    }
    let mut index = 0;
    while index < bytes.len() {
        let byte = bytes[index];
        if !(byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-') {
            return false;
        }
        index += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_keys() {
        for key in ["player", "heart_full", "space-bg", "Lesson2"] {
            assert!(AssetKey::new(key).is_ok(), "key={key}");
        }
    }

    #[test]
    fn rejects_invalid_keys() {
        assert_eq!(AssetKey::new(""), Err(AssetKeyError::Empty));
        for key in ["a/b", "a.b", "with space", r"a\b", "caf\u{e9}"] {
            assert!(AssetKey::new(key).is_err(), "key={key}");
        }
    }

    #[test]
    fn static_and_owned_keys_compare_equal() {
        const PLAYER: AssetKey = AssetKey::from_static("player");
        let owned = AssetKey::new("player").expect("valid");
        assert_eq!(PLAYER, owned);
        assert_eq!(PLAYER.to_string(), "player");
    }

    #[test]
    fn const_validation_matches_runtime_validation() {
        for key in ["", "ok_key", "bad key", "x-1"] {
            assert_eq!(is_valid_key(key.as_bytes()), AssetKey::new(key).is_ok());
        }
    }
}
