//! Capability kinds and capability sets

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::identifiers::CapabilityName;

/// The four capability kinds managed by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CapabilityKind {
    /// Text translation between a language pair
    Translation,
    /// Tone/format/length rewriting
    Rewriting,
    /// Summarization
    Summarization,
    /// Language identification
    LanguageDetection,
}

impl CapabilityKind {
    /// Every capability kind
    pub const ALL: [Self; 4] = [
        Self::Translation,
        Self::Rewriting,
        Self::Summarization,
        Self::LanguageDetection,
    ];

    /// Engine-facing capability name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Translation => "translator",
            Self::Rewriting => "rewriter",
            Self::Summarization => "summarizer",
            Self::LanguageDetection => "languageDetector",
        }
    }

    /// Capability name for diagnostics and probes
    #[must_use]
    pub fn name(self) -> CapabilityName {
        CapabilityName::new(self.as_str())
    }

    /// The single-bit set for this kind
    #[must_use]
    pub const fn flag(self) -> CapabilitySet {
        match self {
            Self::Translation => CapabilitySet::TRANSLATION,
            Self::Rewriting => CapabilitySet::REWRITING,
            Self::Summarization => CapabilitySet::SUMMARIZATION,
            Self::LanguageDetection => CapabilitySet::LANGUAGE_DETECTION,
        }
    }
}

impl std::fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CapabilityKind> for CapabilityName {
    fn from(kind: CapabilityKind) -> Self {
        kind.name()
    }
}

bitflags! {
    /// Set of capability kinds, e.g. those with a ready session
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CapabilitySet: u8 {
        /// Translation
        const TRANSLATION = 0b0001;
        /// Rewriting
        const REWRITING = 0b0010;
        /// Summarization
        const SUMMARIZATION = 0b0100;
        /// Language detection
        const LANGUAGE_DETECTION = 0b1000;
    }
}

impl CapabilitySet {
    /// Whether `kind` is a member of this set
    #[must_use]
    pub const fn has(self, kind: CapabilityKind) -> bool {
        self.contains(kind.flag())
    }

    /// Iterate the kinds present in this set
    pub fn kinds(self) -> impl Iterator<Item = CapabilityKind> {
        CapabilityKind::ALL
            .into_iter()
            .filter(move |kind| self.has(*kind))
    }
}

impl FromIterator<CapabilityKind> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = CapabilityKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, kind| set | kind.flag())
    }
}
