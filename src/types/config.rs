//! Session configuration contract
//!
//! A session configuration is the cache key of a manager: a new session is
//! created whenever the requested configuration is not structurally equal to
//! the one that produced the cached session.

use std::fmt::Debug;

use crate::error::Result;

/// Per-call session configuration
///
/// Equality is the derived, structural `PartialEq` of the implementing type.
/// List-valued fields compare element by element, so reordering a list is a
/// configuration change.
pub trait SessionConfig: Clone + Debug + PartialEq + Send + Sync + 'static {
    /// Reject malformed configuration before any engine call is made
    ///
    /// # Errors
    /// Returns `CapabilityError::Configuration` describing the problem
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Whether `next` differs from the configuration of the cached session
#[must_use]
pub fn config_changed<C: SessionConfig>(current: Option<&C>, next: &C) -> bool {
    current != Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Tags(Vec<&'static str>);

    impl SessionConfig for Tags {}

    #[test]
    fn test_first_use_is_a_change() {
        assert!(config_changed(None, &Tags(vec!["en"])));
    }

    #[test]
    fn test_structural_equality() {
        let cached = Tags(vec!["en", "fr"]);
        assert!(!config_changed(Some(&cached), &Tags(vec!["en", "fr"])));
    }

    #[test]
    fn test_reordering_is_a_change() {
        let cached = Tags(vec!["en", "fr"]);
        assert!(config_changed(Some(&cached), &Tags(vec!["fr", "en"])));
    }
}
