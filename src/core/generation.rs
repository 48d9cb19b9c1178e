/// The puzzle service: request → sentence → puzzle orchestration.
///
/// Wires together lazy generator training, the generate-and-classify retry
/// loop, and the corpus fallbacks.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;

use super::classifier;
use super::config::{ConfigError, EngineConfig};
use super::registry::GeneratorRegistry;
use super::remote::{self, SentenceSource};
use crate::schema::corpus::{Corpus, CorpusError};
use crate::schema::difficulty::Difficulty;
use crate::schema::language::Language;
use crate::schema::puzzle::{PuzzleData, PuzzleSource};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("corpus error: {0}")]
    Corpus(#[from] CorpusError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Sentence selection steps, tried in this order until one yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    /// Random-walk the language's chain and keep an exact tier match.
    ChainGenerate,
    /// Corpus sentences of the language that grade to the tier.
    CorpusExact,
    /// Any corpus sentence of the language.
    CorpusWidened,
}

const STRATEGIES: [Strategy; 3] = [
    Strategy::ChainGenerate,
    Strategy::CorpusExact,
    Strategy::CorpusWidened,
];

impl Strategy {
    fn source(self) -> PuzzleSource {
        match self {
            Self::ChainGenerate => PuzzleSource::Generated,
            Self::CorpusExact => PuzzleSource::CorpusExact,
            Self::CorpusWidened => PuzzleSource::CorpusWidened,
        }
    }
}

/// Produces word-order puzzles. Built via `PuzzleService::builder()`.
pub struct PuzzleService {
    corpus: Corpus,
    registry: GeneratorRegistry,
    config: EngineConfig,
    rng: StdRng,
}

/// Builder for constructing a `PuzzleService`.
pub struct PuzzleServiceBuilder {
    corpus: Option<Corpus>,
    config: EngineConfig,
    seed: Option<u64>,
    max_retries: Option<u32>,
    max_words: Option<usize>,
}

impl PuzzleService {
    pub fn builder() -> PuzzleServiceBuilder {
        PuzzleServiceBuilder {
            corpus: None,
            config: EngineConfig::default(),
            seed: None,
            max_retries: None,
            max_words: None,
        }
    }

    /// Produce a puzzle of `difficulty` in `language`. Never fails.
    pub fn request_puzzle(&mut self, difficulty: Difficulty, language: Language) -> PuzzleData {
        let selected = STRATEGIES.iter().find_map(|&strategy| {
            self.run_strategy(strategy, difficulty, language)
                .map(|sentence| (sentence, strategy.source()))
        });

        let (sentence, source) = selected.unwrap_or_else(|| {
            // Unreachable with a validated corpus.
            tracing::error!(
                target: "jomle::generation",
                %language,
                "no sentence available for language"
            );
            (String::new(), PuzzleSource::CorpusWidened)
        });

        let puzzle = PuzzleData::from_sentence(&sentence, source, &mut self.rng);
        tracing::debug!(
            target: "jomle::generation",
            %difficulty,
            %language,
            ?source,
            words = puzzle.word_count(),
            "puzzle ready"
        );
        puzzle
    }

    /// Ask `source` first and fall back to `request_puzzle` when it fails
    /// or its sentence does not pass the remote checks.
    pub fn request_puzzle_from<S>(
        &mut self,
        source: &mut S,
        difficulty: Difficulty,
        language: Language,
    ) -> PuzzleData
    where
        S: SentenceSource + ?Sized,
    {
        match source.fetch(difficulty, language) {
            Some(candidate) => match remote::accept(&candidate, difficulty) {
                Some(sentence) => {
                    return PuzzleData::from_sentence(&sentence, PuzzleSource::Remote, &mut self.rng);
                }
                None => tracing::warn!(
                    target: "jomle::generation",
                    sentence = %candidate.sentence,
                    %difficulty,
                    "remote sentence rejected, using local engine"
                ),
            },
            None => tracing::debug!(
                target: "jomle::generation",
                "remote source failed, using local engine"
            ),
        }
        self.request_puzzle(difficulty, language)
    }

    /// Train the generators now instead of on the first request.
    pub fn warm_up(&mut self) {
        let _ = self.registry.get_or_train(&self.corpus, Language::Persian);
    }

    /// Generator trainings performed so far.
    pub fn training_runs(&self) -> u32 {
        self.registry.training_runs()
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn run_strategy(
        &mut self,
        strategy: Strategy,
        difficulty: Difficulty,
        language: Language,
    ) -> Option<String> {
        match strategy {
            Strategy::ChainGenerate => self.generate_matching(difficulty, language),
            Strategy::CorpusExact => {
                let pool: Vec<&str> = self
                    .corpus
                    .for_language(language)
                    .filter(|text| classifier::classify(text) == difficulty)
                    .collect();
                pool.choose(&mut self.rng).map(|s| s.to_string())
            }
            Strategy::CorpusWidened => {
                tracing::warn!(
                    target: "jomle::generation",
                    %difficulty,
                    %language,
                    "no corpus sentence grades to the requested tier, widening to any tier"
                );
                let pool: Vec<&str> = self.corpus.for_language(language).collect();
                pool.choose(&mut self.rng).map(|s| s.to_string())
            }
        }
    }

    fn generate_matching(&mut self, difficulty: Difficulty, language: Language) -> Option<String> {
        let max_retries = self.config.max_retries;
        let max_words = self.config.max_words;
        let generator = self.registry.get_or_train(&self.corpus, language)?;

        for attempt in 0..max_retries {
            let candidate = generator.generate(&mut self.rng, max_words);
            if candidate.is_empty() {
                continue;
            }
            let tier = classifier::classify(&candidate);
            if tier == difficulty {
                return Some(candidate);
            }
            tracing::debug!(
                target: "jomle::generation",
                attempt,
                %tier,
                %difficulty,
                "rejected candidate"
            );
        }

        tracing::warn!(
            target: "jomle::generation",
            %difficulty,
            %language,
            retries = max_retries,
            "retry budget exhausted, falling back to corpus"
        );
        None
    }
}

impl PuzzleServiceBuilder {
    /// Sentences to train on and fall back to. Defaults to the built-in corpus.
    pub fn corpus(mut self, corpus: Corpus) -> Self {
        self.corpus = Some(corpus);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    pub fn max_words(mut self, max_words: usize) -> Self {
        self.max_words = Some(max_words);
        self
    }

    /// Validate everything and construct the service.
    ///
    /// A corpus without sentences for a supported language is rejected here
    /// rather than at puzzle time.
    pub fn build(self) -> Result<PuzzleService, EngineError> {
        let mut config = self.config;
        if let Some(max_retries) = self.max_retries {
            config.max_retries = max_retries;
        }
        if let Some(max_words) = self.max_words {
            config.max_words = max_words;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;

        let corpus = match self.corpus {
            Some(corpus) => corpus,
            None => Corpus::builtin()?,
        };
        corpus.validate(&Language::ALL)?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(PuzzleService {
            corpus,
            registry: GeneratorRegistry::new(),
            config,
            rng,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::remote::RemoteSentence;
    use crate::core::tokenize;
    use crate::schema::corpus::CorpusEntry;

    fn two_sentence_corpus() -> Corpus {
        Corpus::new(vec![
            CorpusEntry::new("I eat an apple", Language::English),
            CorpusEntry::new("The sky is blue", Language::English),
            CorpusEntry::new("هوا سرد است", Language::Persian),
        ])
    }

    fn mixed_corpus() -> Corpus {
        Corpus::new(vec![
            CorpusEntry::new("I eat an apple", Language::English),
            CorpusEntry::new("I went to the park yesterday", Language::English),
            CorpusEntry::new("هوا سرد است", Language::Persian),
        ])
    }

    #[test]
    fn concrete_two_sentence_scenario() {
        let sources = [
            vec!["I", "eat", "an", "apple"],
            vec!["The", "sky", "is", "blue"],
        ];
        for seed in 0..30 {
            let mut service = PuzzleService::builder()
                .seed(seed)
                .corpus(two_sentence_corpus())
                .build()
                .unwrap();
            let puzzle = service.request_puzzle(Difficulty::Easy, Language::English);
            assert_eq!(classifier::classify(&puzzle.original_sentence), Difficulty::Easy);
            assert_eq!(puzzle.source, PuzzleSource::Generated);
            let words: Vec<&str> = puzzle.ordered_words.iter().map(String::as_str).collect();
            assert!(
                !words.is_empty() && sources.iter().any(|s| s.starts_with(&words)),
                "unexpected words: {:?}",
                puzzle.ordered_words
            );
        }
    }

    #[test]
    fn trains_once_across_requests() {
        let mut service = PuzzleService::builder()
            .seed(1)
            .corpus(two_sentence_corpus())
            .build()
            .unwrap();
        assert_eq!(service.training_runs(), 0);
        for _ in 0..10 {
            service.request_puzzle(Difficulty::Easy, Language::English);
            service.request_puzzle(Difficulty::Medium, Language::Persian);
        }
        assert_eq!(service.training_runs(), Language::ALL.len() as u32);
    }

    #[test]
    fn warm_up_trains_before_first_request() {
        let mut service = PuzzleService::builder()
            .seed(1)
            .corpus(two_sentence_corpus())
            .build()
            .unwrap();
        service.warm_up();
        assert_eq!(service.training_runs(), 2);
        service.request_puzzle(Difficulty::Easy, Language::Persian);
        assert_eq!(service.training_runs(), 2);
    }

    #[test]
    fn short_walks_fall_back_to_exact_corpus_match() {
        let mut service = PuzzleService::builder()
            .seed(5)
            .max_words(2)
            .corpus(mixed_corpus())
            .build()
            .unwrap();
        let puzzle = service.request_puzzle(Difficulty::Medium, Language::English);
        assert_eq!(puzzle.source, PuzzleSource::CorpusExact);
        assert_eq!(puzzle.original_sentence, "I went to the park yesterday");
    }

    #[test]
    fn missing_tier_widens_to_language() {
        let mut service = PuzzleService::builder()
            .seed(5)
            .corpus(mixed_corpus())
            .build()
            .unwrap();
        let puzzle = service.request_puzzle(Difficulty::Hard, Language::Persian);
        assert_eq!(puzzle.source, PuzzleSource::CorpusWidened);
        assert_eq!(puzzle.original_sentence, "هوا سرد است");
    }

    #[test]
    fn ordered_words_reconstruct_sentence() {
        let mut service = PuzzleService::builder().seed(9).build().unwrap();
        for difficulty in Difficulty::ALL {
            for language in Language::ALL {
                let p = service.request_puzzle(difficulty, language);
                assert_eq!(p.ordered_words.join(" "), tokenize::normalize(&p.original_sentence));
                assert!(p.check_answer(&p.ordered_words));
            }
        }
    }

    #[test]
    fn same_seed_same_puzzles() {
        let mut a = PuzzleService::builder().seed(77).build().unwrap();
        let mut b = PuzzleService::builder().seed(77).build().unwrap();
        for difficulty in Difficulty::ALL {
            assert_eq!(
                a.request_puzzle(difficulty, Language::English),
                b.request_puzzle(difficulty, Language::English)
            );
        }
    }

    #[test]
    fn build_rejects_corpus_missing_language() {
        let corpus = Corpus::new(vec![CorpusEntry::new("I eat an apple", Language::English)]);
        let result = PuzzleService::builder().corpus(corpus).build();
        assert!(matches!(
            result,
            Err(EngineError::Corpus(CorpusError::MissingLanguage(Language::Persian)))
        ));
    }

    #[test]
    fn build_rejects_zero_retries() {
        let result = PuzzleService::builder().max_retries(0).build();
        assert!(matches!(result, Err(EngineError::Config(ConfigError::Invalid(_)))));
    }

    #[test]
    fn builder_seed_overrides_config() {
        let config = EngineConfig {
            seed: Some(1),
            ..EngineConfig::default()
        };
        let service = PuzzleService::builder().config(config).seed(2).build().unwrap();
        assert_eq!(service.config().seed, Some(2));
    }

    #[test]
    fn accepted_remote_sentence_is_used() {
        let mut service = PuzzleService::builder().seed(3).build().unwrap();
        let mut source = |_: Difficulty, _: Language| -> Option<RemoteSentence> {
            Some(RemoteSentence {
                sentence: "We go to school every day.".to_string(),
                words: Vec::new(),
            })
        };
        let puzzle = service.request_puzzle_from(&mut source, Difficulty::Easy, Language::English);
        assert_eq!(puzzle.source, PuzzleSource::Remote);
        assert_eq!(puzzle.ordered_words, ["We", "go", "to", "school", "every", "day"]);
        assert_eq!(service.training_runs(), 0);
    }

    #[test]
    fn failed_remote_falls_back_to_engine() {
        let mut service = PuzzleService::builder().seed(3).build().unwrap();
        let mut source = |_: Difficulty, _: Language| -> Option<RemoteSentence> { None };
        let puzzle = service.request_puzzle_from(&mut source, Difficulty::Easy, Language::English);
        assert_ne!(puzzle.source, PuzzleSource::Remote);
        assert_eq!(classifier::classify(&puzzle.original_sentence), Difficulty::Easy);
    }

    #[test]
    fn rejected_remote_falls_back_to_engine() {
        let mut service = PuzzleService::builder().seed(3).build().unwrap();
        let mut source = |_: Difficulty, _: Language| -> Option<RemoteSentence> {
            Some(RemoteSentence {
                sentence: "Error".to_string(),
                words: vec!["Error".to_string()],
            })
        };
        let puzzle = service.request_puzzle_from(&mut source, Difficulty::Medium, Language::Persian);
        assert_ne!(puzzle.source, PuzzleSource::Remote);
    }
}
