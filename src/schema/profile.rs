/// Player profile - score and level bookkeeping.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::difficulty::Difficulty;

/// Points needed to advance one level.
pub const POINTS_PER_LEVEL: u32 = 50;
/// Cost of one spoken-sentence hint.
pub const HINT_COST: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("hint needs {needed} points but only {available} are available")]
    InsufficientPoints { needed: u32, available: u32 },
}

/// The locally stored player record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub score: u32,
    pub level: u32,
}

/// Level reached with `score` points (level 1 starts at zero).
pub fn level_for_score(score: u32) -> u32 {
    score / POINTS_PER_LEVEL + 1
}

impl UserProfile {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            score: 0,
            level: 1,
        }
    }

    /// Credit a solved puzzle. Returns the points awarded.
    pub fn award(&mut self, difficulty: Difficulty) -> u32 {
        let points = difficulty.points();
        self.score += points;
        self.level = level_for_score(self.score);
        points
    }

    /// Pay for a hint, refusing when the score cannot cover it.
    pub fn spend_hint(&mut self) -> Result<(), ProfileError> {
        if self.score < HINT_COST {
            return Err(ProfileError::InsufficientPoints {
                needed: HINT_COST,
                available: self.score,
            });
        }
        self.score -= HINT_COST;
        self.level = level_for_score(self.score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_profile_starts_at_level_one() {
        let p = UserProfile::new("sara");
        assert_eq!(p.score, 0);
        assert_eq!(p.level, 1);
    }

    #[test]
    fn level_boundaries() {
        assert_eq!(level_for_score(0), 1);
        assert_eq!(level_for_score(49), 1);
        assert_eq!(level_for_score(50), 2);
        assert_eq!(level_for_score(120), 3);
    }

    #[test]
    fn award_updates_level() {
        let mut p = UserProfile::new("sara");
        assert_eq!(p.award(Difficulty::Hard), 30);
        assert_eq!(p.award(Difficulty::Medium), 20);
        assert_eq!(p.score, 50);
        assert_eq!(p.level, 2);
    }

    #[test]
    fn hint_refused_without_points() {
        let mut p = UserProfile::new("sara");
        assert_eq!(
            p.spend_hint(),
            Err(ProfileError::InsufficientPoints {
                needed: HINT_COST,
                available: 0
            })
        );
    }

    #[test]
    fn hint_can_drop_level() {
        let mut p = UserProfile::new("sara");
        p.award(Difficulty::Hard);
        p.award(Difficulty::Medium);
        p.spend_hint().unwrap();
        assert_eq!(p.score, 45);
        assert_eq!(p.level, 1);
    }
}
