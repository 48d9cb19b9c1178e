/// Difficulty classifier - grades a sentence by length and word size.
use crate::schema::difficulty::Difficulty;

/// Raw measurements behind a classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentenceMetrics {
    pub word_count: usize,
    /// Mean word length in characters; zero for an empty sentence.
    pub avg_word_length: f64,
}

impl SentenceMetrics {
    /// Split on whitespace and measure. Punctuation counts toward word length.
    pub fn measure(sentence: &str) -> Self {
        let (word_count, total_chars) = sentence
            .split_whitespace()
            .fold((0usize, 0usize), |(n, chars), w| (n + 1, chars + w.chars().count()));
        let avg_word_length = if word_count == 0 {
            0.0
        } else {
            total_chars as f64 / word_count as f64
        };
        Self {
            word_count,
            avg_word_length,
        }
    }

    /// `word_count + 2 * avg_word_length`.
    pub fn complexity_score(&self) -> f64 {
        self.word_count as f64 + self.avg_word_length * 2.0
    }

    pub fn difficulty(&self) -> Difficulty {
        let score = self.complexity_score();
        if self.word_count <= 4 || score < 10.0 {
            Difficulty::Easy
        } else if self.word_count <= 7 || score < 18.0 {
            Difficulty::Medium
        } else {
            Difficulty::Hard
        }
    }
}

/// Grade `sentence` into a difficulty tier.
///
/// Rules are checked in order: at most 4 words or a score under 10 is
/// easy, at most 7 words or a score under 18 is medium, anything else is
/// hard. An empty sentence has zero words and grades as easy.
pub fn classify(sentence: &str) -> Difficulty {
    SentenceMetrics::measure(sentence).difficulty()
}
