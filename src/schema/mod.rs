pub mod corpus;
pub mod difficulty;
pub mod language;
pub mod profile;
pub mod puzzle;
