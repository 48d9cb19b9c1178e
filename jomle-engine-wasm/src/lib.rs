//! WASM bindings for jomle-engine - the game screen's puzzle source.

use wasm_bindgen::prelude::*;

use jomle_engine::core::classifier::SentenceMetrics;
use jomle_engine::core::remote::RemoteSentence;
use jomle_engine::schema::corpus::Corpus;
use jomle_engine::schema::profile::UserProfile;
use jomle_engine::{Difficulty, Language, PuzzleData, PuzzleService};

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnswerInput {
    puzzle: PuzzleData,
    words: Vec<String>,
}

#[derive(serde::Deserialize)]
struct AwardInput {
    profile: UserProfile,
    difficulty: String,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassificationInfo {
    word_count: usize,
    avg_word_length: f64,
    complexity_score: f64,
    difficulty: Difficulty,
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------
fn parse_difficulty(s: &str) -> Result<Difficulty, JsError> {
    s.parse::<Difficulty>().map_err(|e| JsError::new(&e))
}

fn parse_language(s: &str) -> Result<Language, JsError> {
    s.parse::<Language>().map_err(|e| JsError::new(&e))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

// ---------------------------------------------------------------------------
// PuzzleEngine - the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct PuzzleEngine {
    service: PuzzleService,
}

#[wasm_bindgen]
impl PuzzleEngine {
    /// Create an engine over the built-in corpus. Without a seed the engine
    /// draws from browser entropy.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>) -> Result<PuzzleEngine, JsError> {
        Self::build(None, seed)
    }

    /// Create an engine over a custom corpus given as RON text.
    pub fn with_corpus(corpus_ron: &str, seed: Option<u64>) -> Result<PuzzleEngine, JsError> {
        let corpus = Corpus::parse_ron(corpus_ron)
            .map_err(|e| JsError::new(&format!("Corpus parse error: {e}")))?;
        Self::build(Some(corpus), seed)
    }

    /// Request a puzzle. Returns JSON:
    /// ```json
    /// {
    ///   "originalSentence": "I eat an apple",
    ///   "orderedWords": ["I", "eat", "an", "apple"],
    ///   "scrambledWords": ["apple", "I", "an", "eat"],
    ///   "source": "generated"
    /// }
    /// ```
    pub fn request_puzzle(&mut self, difficulty: &str, language: &str) -> Result<String, JsError> {
        let difficulty = parse_difficulty(difficulty)?;
        let language = parse_language(language)?;
        to_json(&self.service.request_puzzle(difficulty, language))
    }

    /// Turn a remote generator's JSON response (`{"correctSentence": ..,
    /// "words": [..]}`, or an empty string when the call failed) into a
    /// puzzle, substituting a local one when the response is unusable.
    pub fn puzzle_from_remote(
        &mut self,
        remote_json: &str,
        difficulty: &str,
        language: &str,
    ) -> Result<String, JsError> {
        let difficulty = parse_difficulty(difficulty)?;
        let language = parse_language(language)?;
        let remote: Option<RemoteSentence> = serde_json::from_str(remote_json).ok();
        let mut source = move |_: Difficulty, _: Language| remote.clone();
        to_json(&self.service.request_puzzle_from(&mut source, difficulty, language))
    }

    /// Check an arrangement. Expects `{"puzzle": <puzzle JSON>, "words": [..]}`.
    pub fn check_answer(answer_json: &str) -> Result<bool, JsError> {
        let input: AnswerInput = serde_json::from_str(answer_json)
            .map_err(|e| JsError::new(&format!("Invalid answer JSON: {e}")))?;
        Ok(input.puzzle.check_answer(&input.words))
    }

    /// Grade a sentence. Returns JSON with the raw metrics and the tier.
    pub fn classify(sentence: &str) -> Result<String, JsError> {
        let metrics = SentenceMetrics::measure(sentence);
        to_json(&ClassificationInfo {
            word_count: metrics.word_count,
            avg_word_length: metrics.avg_word_length,
            complexity_score: metrics.complexity_score(),
            difficulty: metrics.difficulty(),
        })
    }

    /// Credit a solved puzzle. Expects `{"profile": {..}, "difficulty": "easy"}`
    /// and returns the updated profile JSON.
    pub fn award(award_json: &str) -> Result<String, JsError> {
        let mut input: AwardInput = serde_json::from_str(award_json)
            .map_err(|e| JsError::new(&format!("Invalid award JSON: {e}")))?;
        let difficulty = parse_difficulty(&input.difficulty)?;
        input.profile.award(difficulty);
        to_json(&input.profile)
    }

    /// Pay for a hint. Returns the updated profile JSON, or an error when
    /// the score is too low.
    pub fn spend_hint(profile_json: &str) -> Result<String, JsError> {
        let mut profile: UserProfile = serde_json::from_str(profile_json)
            .map_err(|e| JsError::new(&format!("Invalid profile JSON: {e}")))?;
        profile
            .spend_hint()
            .map_err(|e| JsError::new(&e.to_string()))?;
        to_json(&profile)
    }

    /// Return JSON array of language tags.
    pub fn languages() -> String {
        serde_json::to_string(&Language::ALL).unwrap_or_else(|_| "[]".to_string())
    }

    /// Return JSON array of difficulty tiers.
    pub fn difficulties() -> String {
        serde_json::to_string(&Difficulty::ALL).unwrap_or_else(|_| "[]".to_string())
    }

    /// Reset the engine with a new seed (same corpus).
    pub fn reset(&mut self, seed: u64) -> Result<(), JsError> {
        let corpus = self.service.corpus().clone();
        *self = Self::build(Some(corpus), Some(seed))?;
        Ok(())
    }
}

// Private helpers
impl PuzzleEngine {
    fn build(corpus: Option<Corpus>, seed: Option<u64>) -> Result<PuzzleEngine, JsError> {
        let mut builder = PuzzleService::builder();
        if let Some(corpus) = corpus {
            builder = builder.corpus(corpus);
        }
        if let Some(seed) = seed {
            builder = builder.seed(seed);
        }
        let mut service = builder
            .build()
            .map_err(|e| JsError::new(&format!("Engine build error: {e}")))?;
        service.warm_up();
        Ok(PuzzleEngine { service })
    }
}
