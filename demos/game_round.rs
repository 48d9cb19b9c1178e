/// Game Round example - a short session as the game screen would drive it.
///
/// A player climbs through the tiers in both languages, trying each puzzle
/// first as dealt and then in order, and buying one hint at the end.
///
/// Run with: cargo run --example game_round
use jomle_engine::schema::profile::UserProfile;
use jomle_engine::{Difficulty, Language, PuzzleData, PuzzleService};

fn main() {
    let mut service = PuzzleService::builder()
        .seed(2024)
        .build()
        .expect("Failed to build puzzle service");

    let mut player = UserProfile::new("sara");

    println!("========================================");
    println!("   Word Order - practice session");
    println!("========================================");
    println!();

    let rounds = [
        (Language::English, Difficulty::Easy),
        (Language::English, Difficulty::Medium),
        (Language::Persian, Difficulty::Easy),
        (Language::Persian, Difficulty::Medium),
        (Language::English, Difficulty::Hard),
    ];

    for (number, (language, difficulty)) in rounds.into_iter().enumerate() {
        let puzzle = service.request_puzzle(difficulty, language);
        play_round(number + 1, language, difficulty, &puzzle, &mut player);
    }

    match player.spend_hint() {
        Ok(()) => println!("Bought a hint. Score now {}", player.score),
        Err(e) => println!("No hint: {}", e),
    }

    println!();
    println!("========================================");
    println!(
        "   {} finished at level {} with {} points",
        player.username, player.level, player.score
    );
    println!("   Generators trained: {}", service.training_runs());
    println!("========================================");
}

fn play_round(
    number: usize,
    language: Language,
    difficulty: Difficulty,
    puzzle: &PuzzleData,
    player: &mut UserProfile,
) {
    println!("--- Round {}: {} / {} ({:?}) ---", number, language, difficulty, puzzle.source);
    println!("Words: {}", puzzle.scrambled_words.join("  "));

    // First try: the scrambled order as dealt
    let first_try = puzzle.check_answer(&puzzle.scrambled_words);
    println!("Try 1: {}", if first_try { "correct" } else { "wrong" });

    if !first_try {
        let second_try = puzzle.check_answer(&puzzle.ordered_words);
        println!("Try 2: {}", if second_try { "correct" } else { "wrong" });
    }

    let points = player.award(difficulty);
    println!("Answer: {}", puzzle.original_sentence);
    println!("+{} points (score {}, level {})", points, player.score, player.level);
    println!();
}
