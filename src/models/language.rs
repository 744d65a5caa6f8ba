//! Languages the assistant can detect and answer in.

use serde::{Deserialize, Serialize};

/// Supported reply languages. Malagasy is the local variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    French,
    Malagasy,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::French, Language::Malagasy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::French => "french",
            Self::Malagasy => "malagasy",
        }
    }

    /// Parse a language name as returned by the generation service.
    /// Accepts names and ISO codes in any case; anything else is `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "english" | "en" => Some(Self::English),
            "french" | "fr" | "français" | "francais" => Some(Self::French),
            "malagasy" | "mg" => Some(Self::Malagasy),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of intent detection for one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedIntent {
    pub language: Language,
    pub city: Option<String>,
}

impl DetectedIntent {
    pub fn new(language: Language, city: Option<String>) -> Self {
        Self { language, city }
    }

    pub fn conversational(language: Language) -> Self {
        Self { language, city: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_accepts_codes_and_case() {
        assert_eq!(Language::from_name("French"), Some(Language::French));
        assert_eq!(Language::from_name(" mg "), Some(Language::Malagasy));
        assert_eq!(Language::from_name("EN"), Some(Language::English));
        assert_eq!(Language::from_name("klingon"), None);
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&Language::Malagasy).unwrap();
        assert_eq!(json, "\"malagasy\"");
        assert_eq!(Language::default(), Language::English);
    }
}
