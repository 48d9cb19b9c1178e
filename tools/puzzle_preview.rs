/// Puzzle Preview - interactive shell for trying the puzzle engine.
///
/// Commands:
///   puzzle <difficulty> <lang>       - request a puzzle
///   walk <lang>                      - raw Markov walk, no grading
///   classify <sentence...>           - grade a sentence
///   bulk <n> <difficulty> <lang>     - request n puzzles and count sources
///   seed <n>                         - rebuild the engine with a new seed
///   help                             - list commands
///   quit                             - exit
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use jomle_engine::core::classifier::SentenceMetrics;
use jomle_engine::core::config::EngineConfig;
use jomle_engine::core::markov::MarkovGenerator;
use jomle_engine::schema::corpus::Corpus;
use jomle_engine::{Difficulty, Language, PuzzleService, PuzzleSource};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashMap;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "puzzle_preview", about = "Interactive shell for the sentence puzzle engine")]
struct Cli {
    /// Corpus file (RON list of entries); the built-in corpus when omitted
    #[arg(long)]
    corpus: Option<PathBuf>,
    /// Engine config file (RON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed
    #[arg(long, default_value = "42")]
    seed: u64,
    /// Log level
    #[arg(long, default_value = "info")]
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
        std::process::exit(1);
    });

    let config = match &cli.config {
        Some(path) => EngineConfig::load_from_ron(path).unwrap_or_else(|e| {
            eprintln!("ERROR: Failed to load config: {}", e);
            std::process::exit(1);
        }),
        None => EngineConfig::default(),
    };

    let mut current_seed = cli.seed;
    let mut service = build_service(&corpus, &config, current_seed);
    let mut walk_rng = StdRng::seed_from_u64(current_seed);
    let generators = train_generators(&corpus);

    println!("Loaded {} corpus entries", corpus.len());
    println!("Seed: {}", current_seed);
    println!("Type 'help' for commands.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("puzzle> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => print_help(),
            "puzzle" | "p" => {
                let Some((difficulty, language)) = parse_request(&parts[1..]) else {
                    println!("Usage: puzzle <easy|medium|hard> <fa|en>");
                    continue;
                };
                let puzzle = service.request_puzzle(difficulty, language);
                println!("\n--- Puzzle ({:?}) ---", puzzle.source);
                println!("Sentence:  {}", puzzle.original_sentence);
                println!("Ordered:   {}", puzzle.ordered_words.join(" | "));
                println!("Scrambled: {}", puzzle.scrambled_words.join(" | "));
                println!("--- End ---\n");
            }
            "walk" | "w" => {
                let Some(language) = parts.get(1).and_then(|s| s.parse::<Language>().ok()) else {
                    println!("Usage: walk <fa|en>");
                    continue;
                };
                let Some(generator) = generators.get(&language) else {
                    println!("No generator for {}", language);
                    continue;
                };
                let text = generator.generate(&mut walk_rng, config.max_words);
                if text.is_empty() {
                    println!("(empty walk)");
                } else {
                    print_metrics(&text);
                }
            }
            "classify" | "c" => {
                if parts.len() < 2 {
                    println!("Usage: classify <sentence...>");
                    continue;
                }
                print_metrics(&parts[1..].join(" "));
            }
            "bulk" => {
                let count = parts.get(1).and_then(|s| s.parse::<usize>().ok());
                let request = parse_request(parts.get(2..).unwrap_or(&[]));
                let (Some(count), Some((difficulty, language))) = (count, request) else {
                    println!("Usage: bulk <n> <easy|medium|hard> <fa|en>");
                    continue;
                };
                let mut sources: FxHashMap<PuzzleSource, usize> = FxHashMap::default();
                let mut distinct: FxHashMap<String, usize> = FxHashMap::default();
                for _ in 0..count {
                    let puzzle = service.request_puzzle(difficulty, language);
                    *sources.entry(puzzle.source).or_default() += 1;
                    *distinct.entry(puzzle.original_sentence).or_default() += 1;
                }
                println!("\n--- Bulk ({} x {} {}) ---", count, difficulty, language);
                for source in [
                    PuzzleSource::Generated,
                    PuzzleSource::CorpusExact,
                    PuzzleSource::CorpusWidened,
                ] {
                    println!("{:?}: {}", source, sources.get(&source).copied().unwrap_or(0));
                }
                println!("Distinct sentences: {}", distinct.len());
                println!("--- End ---\n");
            }
            "seed" => {
                let Some(seed) = parts.get(1).and_then(|s| s.parse::<u64>().ok()) else {
                    println!("Usage: seed <n>");
                    continue;
                };
                current_seed = seed;
                service = build_service(&corpus, &config, current_seed);
                walk_rng = StdRng::seed_from_u64(current_seed);
                println!("Seed set to {}", current_seed);
            }
            other => println!("Unknown command: {} (type 'help')", other),
        }
    }
}

fn build_service(corpus: &Corpus, config: &EngineConfig, seed: u64) -> PuzzleService {
    PuzzleService::builder()
        .corpus(corpus.clone())
        .config(config.clone())
        .seed(seed)
        .build()
        .unwrap_or_else(|e| {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        })
}

fn train_generators(corpus: &Corpus) -> FxHashMap<Language, MarkovGenerator> {
    Language::ALL
        .iter()
        .map(|&language| {
            let mut generator = MarkovGenerator::new();
            generator.train(corpus.for_language(language));
            (language, generator)
        })
        .collect()
}

fn parse_request(args: &[&str]) -> Option<(Difficulty, Language)> {
    let difficulty = args.first()?.parse().ok()?;
    let language = args.get(1)?.parse().ok()?;
    Some((difficulty, language))
}

fn print_metrics(sentence: &str) {
    let metrics = SentenceMetrics::measure(sentence);
    println!(
        "{}  [words={}, avg_len={:.2}, score={:.2}, tier={}]",
        sentence,
        metrics.word_count,
        metrics.avg_word_length,
        metrics.complexity_score(),
        metrics.difficulty()
    );
}

fn print_help() {
    println!("Commands:");
    println!("  puzzle <difficulty> <lang>    request a puzzle");
    println!("  walk <lang>                   raw Markov walk, no grading");
    println!("  classify <sentence...>        grade a sentence");
    println!("  bulk <n> <difficulty> <lang>  request n puzzles and count sources");
    println!("  seed <n>                      rebuild the engine with a new seed");
    println!("  help                          show this list");
    println!("  quit                          exit");
}
