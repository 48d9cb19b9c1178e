/// Markov chain sentence generator - training and random-walk generation.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rustc_hash::FxHashMap;

use super::tokenize;

/// Word cap used when callers have no preference.
pub const DEFAULT_MAX_WORDS: usize = 15;

/// A first-order Markov model over whitespace tokens.
///
/// Successors are stored with repetition: a word seen three times after
/// "the" appears three times in the list for "the", so a uniform pick from
/// the list is already frequency-weighted. Start tokens are weighted the
/// same way.
#[derive(Debug, Clone, Default)]
pub struct MarkovGenerator {
    /// Transition table: word → successors (duplicates kept).
    transitions: FxHashMap<String, Vec<String>>,
    /// First words of the training sentences (duplicates kept).
    starts: Vec<String>,
}

impl MarkovGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh model from `sentences`, discarding any previous state.
    ///
    /// Sentences that tokenize to nothing are skipped.
    pub fn train<I, S>(&mut self, sentences: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut transitions: FxHashMap<String, Vec<String>> = FxHashMap::default();
        let mut starts = Vec::new();

        for sentence in sentences {
            let tokens = tokenize::tokenize(sentence.as_ref());
            let Some(first) = tokens.first() else {
                continue;
            };
            starts.push(first.clone());

            for pair in tokens.windows(2) {
                transitions
                    .entry(pair[0].clone())
                    .or_default()
                    .push(pair[1].clone());
            }
        }

        tracing::debug!(
            target: "jomle::markov",
            starts = starts.len(),
            prefixes = transitions.len(),
            "trained markov generator"
        );

        self.transitions = transitions;
        self.starts = starts;
    }

    /// Random-walk the chain for at most `max_words` words.
    ///
    /// Returns an empty string when the model has no start tokens; callers
    /// must treat that as a failed generation. The walk stops early when the
    /// current word has no recorded successor. Revisiting a word is allowed.
    pub fn generate(&self, rng: &mut StdRng, max_words: usize) -> String {
        if max_words == 0 {
            return String::new();
        }
        let Some(start) = self.starts.choose(rng) else {
            return String::new();
        };

        let mut words: Vec<&str> = vec![start.as_str()];
        let mut current = start.as_str();

        while words.len() < max_words {
            let next = match self
                .transitions
                .get(current)
                .and_then(|successors| successors.choose(rng))
            {
                Some(word) => word.as_str(),
                None => break,
            };
            words.push(next);
            current = next;
        }

        words.join(" ")
    }

    /// Whether at least one sentence contributed a start token.
    pub fn is_trained(&self) -> bool {
        !self.starts.is_empty()
    }

    /// Number of start tokens, duplicates included.
    pub fn start_count(&self) -> usize {
        self.starts.len()
    }

    /// Number of distinct words with at least one successor.
    pub fn prefix_count(&self) -> usize {
        self.transitions.len()
    }

    /// Total recorded transitions, duplicates included.
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(Vec::len).sum()
    }

    /// Recorded successors of `word`, in training order.
    pub fn successors(&self, word: &str) -> &[String] {
        self.transitions.get(word).map(Vec::as_slice).unwrap_or(&[])
    }
}
