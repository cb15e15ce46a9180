//! Newtype wrappers for type safety
//!
//! This module contains newtype wrappers that provide type safety by wrapping
//! primitive types (like String) into distinct types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CapabilityError, Result};

// ============================================================================
// Newtype Wrappers for Type Safety
// ============================================================================

/// Session ID newtype, unique per engine session created by a manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh session ID
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Capability name newtype, used in diagnostics and availability probes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityName(String);

impl CapabilityName {
    /// Create a new capability name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the capability name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CapabilityName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CapabilityName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CapabilityName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&CapabilityName> for CapabilityName {
    fn from(name: &CapabilityName) -> Self {
        name.clone()
    }
}

/// BCP 47 language tag newtype (e.g. `en`, `pt-BR`, `zh-Hant`)
///
/// Construction does not validate; call [`LanguageTag::validate`] before
/// handing the tag to an engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Create a new language tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Get the language tag as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Primary language subtag (`pt` for `pt-BR`)
    #[must_use]
    pub fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }

    /// Check the tag is well formed
    ///
    /// Accepts a 2-3 letter (or 4-8 letter registered) primary subtag followed by
    /// alphanumeric subtags of 1-8 characters separated by `-`.
    ///
    /// # Errors
    /// Returns `CapabilityError::Configuration` describing the malformed tag
    pub fn validate(&self) -> Result<()> {
        let mut subtags = self.0.split('-');
        let primary = subtags.next().unwrap_or_default();
        if !(2..=8).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(CapabilityError::configuration(format!(
                "malformed language tag '{}'",
                self.0
            )));
        }
        for subtag in subtags {
            if !(1..=8).contains(&subtag.len())
                || !subtag.chars().all(|c| c.is_ascii_alphanumeric())
            {
                return Err(CapabilityError::configuration(format!(
                    "malformed subtag '{subtag}' in language tag '{}'",
                    self.0
                )));
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for LanguageTag {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LanguageTag {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Validate every tag in a list, reporting the first malformed one
pub(crate) fn validate_tags(tags: &[LanguageTag]) -> Result<()> {
    tags.iter().try_for_each(LanguageTag::validate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_tag_validation() {
        assert!(LanguageTag::new("en").validate().is_ok());
        assert!(LanguageTag::new("pt-BR").validate().is_ok());
        assert!(LanguageTag::new("zh-Hant-TW").validate().is_ok());
        assert!(LanguageTag::new("").validate().is_err());
        assert!(LanguageTag::new("e").validate().is_err());
        assert!(LanguageTag::new("en-").validate().is_err());
        assert!(LanguageTag::new("en_US").validate().is_err());
    }

    #[test]
    fn test_primary_subtag() {
        assert_eq!(LanguageTag::new("pt-BR").primary(), "pt");
        assert_eq!(LanguageTag::new("ja").primary(), "ja");
    }

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }
}
