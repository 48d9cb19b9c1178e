use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::core::tokenize;

/// Which step of the selection chain produced a puzzle's sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PuzzleSource {
    /// A Markov-generated sentence that graded to the requested tier.
    Generated,
    /// A corpus sentence of the requested language and tier.
    CorpusExact,
    /// Any corpus sentence of the requested language.
    CorpusWidened,
    /// A sentence supplied by an external sentence source.
    Remote,
}

/// One round of the word-ordering game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleData {
    pub original_sentence: String,
    /// Tokens of `original_sentence` in order, punctuation removed.
    pub ordered_words: Vec<String>,
    /// The same tokens in shuffled order.
    pub scrambled_words: Vec<String>,
    pub source: PuzzleSource,
}

impl PuzzleData {
    /// Tokenize `sentence` and shuffle its words.
    pub fn from_sentence(sentence: &str, source: PuzzleSource, rng: &mut StdRng) -> Self {
        let ordered_words = tokenize::tokenize(sentence);
        let mut scrambled_words = ordered_words.clone();
        scrambled_words.shuffle(rng);
        Self {
            original_sentence: sentence.to_string(),
            ordered_words,
            scrambled_words,
            source,
        }
    }

    /// Check a player's arrangement.
    ///
    /// Words are compared as one concatenated string, so an attempt is
    /// correct whenever it spells the same letters in the same order.
    pub fn check_answer<S: AsRef<str>>(&self, attempt: &[S]) -> bool {
        let expected: String = self.ordered_words.concat();
        let given: String = attempt.iter().map(|w| w.as_ref()).collect();
        !expected.is_empty() && expected == given
    }

    pub fn word_count(&self) -> usize {
        self.ordered_words.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn sorted(words: &[String]) -> Vec<String> {
        let mut v = words.to_vec();
        v.sort();
        v
    }

    #[test]
    fn from_sentence_strips_punctuation() {
        let mut rng = StdRng::seed_from_u64(1);
        let puzzle = PuzzleData::from_sentence("Learning is fun.", PuzzleSource::Remote, &mut rng);
        assert_eq!(puzzle.ordered_words, vec!["Learning", "is", "fun"]);
        assert_eq!(puzzle.original_sentence, "Learning is fun.");
    }

    #[test]
    fn scramble_is_permutation() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let puzzle = PuzzleData::from_sentence(
                "the cat is on the mat",
                PuzzleSource::CorpusExact,
                &mut rng,
            );
            assert_eq!(sorted(&puzzle.scrambled_words), sorted(&puzzle.ordered_words));
        }
    }

    #[test]
    fn scramble_varies_with_seed() {
        let sentence = "Perseverance is the key to success in life";
        let first = PuzzleData::from_sentence(
            sentence,
            PuzzleSource::CorpusExact,
            &mut StdRng::seed_from_u64(0),
        );
        let differs = (1..20).any(|seed| {
            let p = PuzzleData::from_sentence(
                sentence,
                PuzzleSource::CorpusExact,
                &mut StdRng::seed_from_u64(seed),
            );
            p.scrambled_words != first.scrambled_words
        });
        assert!(differs, "Expected different shuffles across seeds");
    }

    #[test]
    fn check_answer_accepts_ordered_words() {
        let mut rng = StdRng::seed_from_u64(3);
        let puzzle = PuzzleData::from_sentence("I eat an apple", PuzzleSource::Generated, &mut rng);
        assert!(puzzle.check_answer(&["I", "eat", "an", "apple"]));
        assert!(!puzzle.check_answer(&["eat", "I", "an", "apple"]));
        assert!(!puzzle.check_answer(&["I", "eat", "an"]));
    }

    #[test]
    fn check_answer_rejects_empty_puzzle() {
        let mut rng = StdRng::seed_from_u64(3);
        let puzzle = PuzzleData::from_sentence("", PuzzleSource::CorpusWidened, &mut rng);
        let empty: [&str; 0] = [];
        assert!(!puzzle.check_answer(&empty));
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let mut rng = StdRng::seed_from_u64(3);
        let puzzle = PuzzleData::from_sentence("We are sad", PuzzleSource::CorpusExact, &mut rng);
        let text = ron::to_string(&puzzle).unwrap();
        assert!(text.contains("originalSentence"));
        assert!(text.contains("scrambledWords"));
        assert!(text.contains("corpus_exact"));
    }
}
