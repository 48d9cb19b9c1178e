pub mod classifier;
pub mod config;
pub mod generation;
pub mod markov;
pub mod registry;
pub mod remote;
pub mod tokenize;
