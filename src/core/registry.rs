/// Per-language generator registry, trained at most once.
use rustc_hash::FxHashMap;

use super::markov::MarkovGenerator;
use crate::schema::corpus::Corpus;
use crate::schema::language::Language;

/// Trained generators keyed by language.
///
/// Training happens on the first `get_or_train` call; later calls reuse the
/// stored generators without looking at the corpus again.
#[derive(Debug, Default)]
pub struct GeneratorRegistry {
    generators: Option<FxHashMap<Language, MarkovGenerator>>,
    training_runs: u32,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Train one generator per supported language if that has not happened
    /// yet, then return the generator for `language`.
    pub fn get_or_train(&mut self, corpus: &Corpus, language: Language) -> Option<&MarkovGenerator> {
        let training_runs = &mut self.training_runs;
        let generators = self.generators.get_or_insert_with(|| {
            let mut generators = FxHashMap::default();
            for lang in Language::ALL {
                let mut generator = MarkovGenerator::new();
                generator.train(corpus.for_language(lang));
                *training_runs += 1;
                generators.insert(lang, generator);
            }
            tracing::info!(
                target: "jomle::registry",
                languages = generators.len(),
                sentences = corpus.len(),
                "trained sentence generators"
            );
            generators
        });
        generators.get(&language)
    }

    pub fn is_trained(&self) -> bool {
        self.generators.is_some()
    }

    /// How many generators have been trained over this registry's life.
    pub fn training_runs(&self) -> u32 {
        self.training_runs
    }
}
