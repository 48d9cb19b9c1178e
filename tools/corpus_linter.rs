/// Corpus Linter - checks that a corpus can serve every language and tier.
///
/// Usage: corpus_linter [--corpus <file.ron>] [--log-level <level>]
use std::path::PathBuf;
use std::process;

use clap::Parser;
use jomle_engine::core::classifier::SentenceMetrics;
use jomle_engine::core::markov::MarkovGenerator;
use jomle_engine::schema::corpus::Corpus;
use jomle_engine::{Difficulty, Language};
use rustc_hash::FxHashSet;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "corpus_linter", about = "Report tier coverage and quality issues in a sentence corpus")]
struct Cli {
    /// Corpus file (RON list of entries); the built-in corpus when omitted
    #[arg(long)]
    corpus: Option<PathBuf>,
    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let corpus = match &cli.corpus {
        Some(path) => Corpus::load_from_ron(path),
        None => Corpus::builtin(),
    };
    let corpus = corpus.unwrap_or_else(|e| {
        eprintln!("ERROR: Failed to load corpus: {}", e);
        process::exit(1);
    });

    println!("Loaded {} corpus entries", corpus.len());

    let (errors, warnings) = lint_corpus(&corpus);

    println!("\n=== Tier Coverage ===\n");
    let coverage = corpus.coverage();
    for language in Language::ALL {
        let counts: Vec<String> = Difficulty::ALL
            .iter()
            .map(|d| format!("{}={}", d, coverage.get(&(language, *d)).copied().unwrap_or(0)))
            .collect();
        println!("{}: {}", language, counts.join(", "));
    }

    for language in Language::ALL {
        let mut generator = MarkovGenerator::new();
        generator.train(corpus.for_language(language));
        println!(
            "{} chain: {} start tokens, {} prefixes, {} transitions",
            language,
            generator.start_count(),
            generator.prefix_count(),
            generator.transition_count()
        );
    }

    println!("\n=== Corpus Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!("\nSummary: {} errors, {} warnings", errors.len(), warnings.len());

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn lint_corpus(corpus: &Corpus) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // A language with no sentences cannot be served at all
    for language in Language::ALL {
        if corpus.for_language(language).next().is_none() {
            errors.push(format!("No sentences for language '{}'", language));
        }
    }

    // Missing tiers push requests onto the widened fallback
    let coverage = corpus.coverage();
    for language in Language::ALL {
        for difficulty in Difficulty::ALL {
            if !coverage.contains_key(&(language, difficulty)) {
                warnings.push(format!(
                    "No '{}' sentence grades as '{}'; requests fall back to any tier",
                    language, difficulty
                ));
            }
        }
    }

    let mut seen: FxHashSet<(Language, &str)> = FxHashSet::default();
    for entry in corpus.entries() {
        let metrics = SentenceMetrics::measure(&entry.text);
        if metrics.word_count == 0 {
            errors.push(format!("Empty sentence in '{}' corpus", entry.language));
            continue;
        }
        if metrics.word_count == 1 {
            warnings.push(format!(
                "Sentence '{}' has a single word and makes a trivial puzzle",
                entry.text
            ));
        }
        if !seen.insert((entry.language, entry.text.as_str())) {
            warnings.push(format!(
                "Sentence '{}' appears more than once (doubles its weight)",
                entry.text
            ));
        }
    }

    (errors, warnings)
}
