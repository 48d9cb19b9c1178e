use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages the game ships sentences for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    /// Persian, the game's primary language.
    #[serde(rename = "fa")]
    Persian,
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// Every supported language, primary first.
    pub const ALL: [Language; 2] = [Language::Persian, Language::English];

    /// Returns the short tag for this language (e.g., "fa").
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Persian => "fa",
            Self::English => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fa" | "persian" | "farsi" => Ok(Self::Persian),
            "en" | "english" => Ok(Self::English),
            other => Err(format!("unknown language: {other}")),
        }
    }
}
