/// External sentence sources - the contract for remote generators and the
/// checks their output must pass before it reaches a puzzle.
use serde::{Deserialize, Serialize};

use super::tokenize;
use crate::schema::difficulty::Difficulty;
use crate::schema::language::Language;

/// Characters that disqualify a remote sentence outright.
const REJECTED_CHARS: &[char] = &['(', ')', '{', '}', '[', ']', '<', '>'];
/// The sentence is cut after the first of these.
const SENTENCE_ENDERS: &[char] = &['.', '!', '?', '\u{061f}'];

/// A sentence decomposition returned by a remote generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSentence {
    #[serde(alias = "correctSentence")]
    pub sentence: String,
    /// The remote's own word split; may be empty.
    #[serde(default)]
    pub words: Vec<String>,
}

/// Anything that can propose a sentence for a tier and language.
///
/// `None` means the source failed; the engine then uses its own sentences.
pub trait SentenceSource {
    fn fetch(&mut self, difficulty: Difficulty, language: Language) -> Option<RemoteSentence>;
}

impl<F> SentenceSource for F
where
    F: FnMut(Difficulty, Language) -> Option<RemoteSentence>,
{
    fn fetch(&mut self, difficulty: Difficulty, language: Language) -> Option<RemoteSentence> {
        self(difficulty, language)
    }
}

/// Accepted word-count window for remote sentences of a tier.
pub fn word_window(difficulty: Difficulty) -> (usize, usize) {
    match difficulty {
        Difficulty::Easy => (4, 8),
        Difficulty::Medium => (8, 15),
        Difficulty::Hard => (12, 25),
    }
}

/// Clean a remote sentence, or reject it.
///
/// Line breaks become spaces and the text is trimmed. Text containing
/// brackets is rejected. Everything after the first sentence ender is
/// dropped, and the remaining word count must fall inside the tier's
/// window.
pub fn clean_sentence(text: &str, difficulty: Difficulty) -> Option<String> {
    let text = text.replace('\n', " ").replace('\r', "");
    let text = text.trim();

    if text.contains(REJECTED_CHARS) {
        return None;
    }

    let text = match text.find(SENTENCE_ENDERS) {
        Some(idx) => {
            let ender_len = text[idx..].chars().next().map_or(1, char::len_utf8);
            &text[..idx + ender_len]
        }
        None => text,
    };

    let (min, max) = word_window(difficulty);
    let count = text.split_whitespace().count();
    if count < min || count > max {
        return None;
    }
    Some(text.to_string())
}

/// Validate a whole remote response: the cleaned sentence must pass
/// `clean_sentence`, and a non-empty word split must spell the same text.
pub fn accept(remote: &RemoteSentence, difficulty: Difficulty) -> Option<String> {
    let cleaned = clean_sentence(&remote.sentence, difficulty)?;
    if !remote.words.is_empty() {
        let expected: String = tokenize::tokenize(&cleaned).concat();
        let given: String = tokenize::tokenize(&remote.words.join(" ")).concat();
        if expected != given {
            return None;
        }
    }
    Some(cleaned)
}
