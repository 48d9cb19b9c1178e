/// Sentence corpus - the static, language-tagged training and fallback pool.
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::difficulty::Difficulty;
use super::language::Language;
use crate::core::classifier;

const BUILTIN_CORPUS: &str = include_str!("../../corpus_data/sentences.ron");

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("corpus has no sentences for language '{0}'")]
    MissingLanguage(Language),
}

/// One example sentence. Several entries may share the same text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub text: String,
    pub language: Language,
    #[serde(default)]
    pub tags: FxHashSet<String>,
}

impl CorpusEntry {
    pub fn new(text: impl Into<String>, language: Language) -> Self {
        Self {
            text: text.into(),
            language,
            tags: FxHashSet::default(),
        }
    }
}

/// An ordered, immutable collection of corpus entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    entries: Vec<CorpusEntry>,
}

impl Corpus {
    pub fn new(entries: Vec<CorpusEntry>) -> Self {
        Self { entries }
    }

    /// The corpus compiled into the library.
    pub fn builtin() -> Result<Self, CorpusError> {
        Self::parse_ron(BUILTIN_CORPUS)
    }

    /// Parse a corpus from a RON list of entries.
    pub fn parse_ron(input: &str) -> Result<Self, CorpusError> {
        let entries: Vec<CorpusEntry> = ron::from_str(input)?;
        Ok(Self { entries })
    }

    /// Load a corpus from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Self, CorpusError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the sentence texts of one language, in corpus order.
    pub fn for_language(&self, language: Language) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.language == language)
            .map(|e| e.text.as_str())
    }

    /// Fail if any of `languages` has no sentences at all.
    pub fn validate(&self, languages: &[Language]) -> Result<(), CorpusError> {
        for &language in languages {
            if self.for_language(language).next().is_none() {
                return Err(CorpusError::MissingLanguage(language));
            }
        }
        Ok(())
    }

    /// Count entries per (language, classified tier).
    pub fn coverage(&self) -> FxHashMap<(Language, Difficulty), usize> {
        let mut counts = FxHashMap::default();
        for entry in &self.entries {
            let tier = classifier::classify(&entry.text);
            *counts.entry((entry.language, tier)).or_default() += 1;
        }
        counts
    }
}
