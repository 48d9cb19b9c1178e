//! Jomle Engine - sentence puzzles for a word-ordering language game.
//!
//! Trains a small first-order Markov chain per language from a
//! hand-written corpus, grades candidate sentences into difficulty tiers,
//! and falls back to the corpus itself when generation misses the
//! requested tier. The only entry point a game needs is
//! [`PuzzleService::request_puzzle`].

pub mod core;
pub mod schema;

pub use crate::core::generation::{EngineError, PuzzleService};
pub use crate::schema::difficulty::Difficulty;
pub use crate::schema::language::Language;
pub use crate::schema::puzzle::{PuzzleData, PuzzleSource};
