//! Language and city detection.
//!
//! The generation service is asked first. When it is unavailable or replies
//! with something unusable, keyword markers pick the language and a
//! per-language list of patterns extracts the city.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use super::prompts;
use super::text::{contains_any, title_case};
use crate::llm::{GenerationError, GenerationParams, TextGenerator};
use crate::metrics;
use crate::models::{DetectedIntent, Language};

const FRENCH_MARKERS: &[&str] = &[
    "je veux",
    "des hôtels",
    "à",
    "montrez-moi",
    "je cherche",
    "bonjour",
    "dans",
    "salut",
    "bonsoir",
];

const MALAGASY_MARKERS: &[&str] = &[
    "tiako",
    "hotely",
    "any",
    "asehoy",
    "manao ahoana",
    "salama",
    "toerana",
    "akory",
];

/// Lower-case spellings used in Malagasy messages → English city names.
const MALAGASY_CITY_NAMES: &[(&str, &str)] = &[
    ("antananarivo", "Antananarivo"),
    ("toamasina", "Toamasina"),
    ("antsirabe", "Antsirabe"),
    ("fianarantsoa", "Fianarantsoa"),
    ("mahajanga", "Mahajanga"),
    ("toliara", "Toliara"),
    ("antsiranana", "Antsiranana"),
    ("dhaka", "Dhaka"),
    ("mumbai", "Mumbai"),
    ("delhi", "Delhi"),
    ("paris", "Paris"),
    ("london", "London"),
    ("tokyo", "Tokyo"),
    ("new york", "New York"),
    ("sydney", "Sydney"),
];

// A city capture is one word: it stops at whitespace or punctuation.
static ENGLISH_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"hotels?\s+in\s+([^\s,.!?]+)",
        r"hotels?\s+(?:at|from)\s+([^\s,.!?]+)",
        r"(?:find|search|show|get)\s+hotels?\s+in\s+([^\s,.!?]+)",
    ])
});

static FRENCH_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"h[ôo]tels?\s+à\s+([^\s,.!?]+)",
        r"des\s+h[ôo]tels?\s+à\s+([^\s,.!?]+)",
        r"h[ôo]tels?\s+dans\s+([^\s,.!?]+)",
        r"cherche.*?h[ôo]tels?\s+à\s+([^\s,.!?]+)",
    ])
});

static MALAGASY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"hotely\s+any\s+([^\s,.!?]+)",
        r"tiako\s+hotely\s+any\s+([^\s,.!?]+)",
        r"asehoy\s+hotely\s+any\s+([^\s,.!?]+)",
        r"\bany\s+([^\s,.!?]+)",
    ])
});

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|p| match Regex::new(p) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::error!(pattern = %p, "invalid city pattern: {}", e);
                None
            }
        })
        .collect()
}

#[derive(Deserialize)]
struct DetectionReply {
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    city: Option<String>,
}

/// Detect language and city for `message`. Never fails.
pub async fn detect(generator: &dyn TextGenerator, message: &str) -> DetectedIntent {
    let reply = generator
        .generate(&prompts::detection(message), GenerationParams::DETECTION)
        .await;

    match reply.and_then(|text| parse_detection_reply(&text)) {
        Ok(intent) => {
            tracing::debug!(language = %intent.language, city = ?intent.city, "AI detection");
            intent
        }
        Err(GenerationError::MissingApiKey) => {
            metrics::record_fallback("detection");
            detect_fallback(message)
        }
        Err(e) => {
            tracing::warn!("AI language detection failed, using patterns: {}", e);
            metrics::record_fallback("detection");
            detect_fallback(message)
        }
    }
}

/// Read `{"language": ..., "city": ...}` out of a generation reply.
/// Prose or code fences around the first JSON object are ignored. An
/// unrecognized or missing language is English; a blank city is `None`.
pub fn parse_detection_reply(reply: &str) -> Result<DetectedIntent, GenerationError> {
    let start = reply
        .find('{')
        .ok_or_else(|| GenerationError::Parse("no JSON object in reply".into()))?;
    let end = reply[start..]
        .find('}')
        .map(|i| start + i)
        .ok_or_else(|| GenerationError::Parse("unterminated JSON object in reply".into()))?;

    let parsed: DetectionReply = serde_json::from_str(&reply[start..=end])
        .map_err(|e| GenerationError::Parse(e.to_string()))?;

    let language = parsed
        .language
        .as_deref()
        .and_then(Language::from_name)
        .unwrap_or_default();
    let city = parsed
        .city
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("null"));

    Ok(DetectedIntent::new(language, city))
}

/// Keyword and pattern detection, used without the generation service.
pub fn detect_fallback(message: &str) -> DetectedIntent {
    let lower = message.to_lowercase();
    let language = detect_language(&lower);
    let city = match language {
        Language::English => extract_city(&lower, &ENGLISH_PATTERNS),
        Language::French => extract_city(&lower, &FRENCH_PATTERNS),
        Language::Malagasy => extract_city_malagasy(&lower),
    };
    DetectedIntent::new(language, city)
}

/// French wins over Malagasy when both sets of markers are present.
fn detect_language(lower: &str) -> Language {
    if contains_any(lower, FRENCH_MARKERS) {
        Language::French
    } else if contains_any(lower, MALAGASY_MARKERS) {
        Language::Malagasy
    } else {
        Language::English
    }
}

fn extract_city(lower: &str, patterns: &[Regex]) -> Option<String> {
    capture_city(lower, patterns).map(|raw| title_case(&raw))
}

fn extract_city_malagasy(lower: &str) -> Option<String> {
    if let Some(raw) = capture_city(lower, &MALAGASY_PATTERNS) {
        return Some(match translate_city(&raw) {
            Some(english) => english.to_string(),
            None => title_case(&raw),
        });
    }

    MALAGASY_CITY_NAMES
        .iter()
        .find(|(local, _)| lower.contains(local))
        .map(|(_, english)| english.to_string())
}

/// First capture of the first matching pattern. A one-word capture is
/// widened when the message continues into a known multi-word city name.
fn capture_city(lower: &str, patterns: &[Regex]) -> Option<String> {
    patterns.iter().find_map(|re| {
        let m = re.captures(lower)?.get(1)?;
        let rest = lower[m.start()..].split_whitespace().collect::<Vec<_>>().join(" ");
        let widened = MALAGASY_CITY_NAMES
            .iter()
            .map(|(local, _)| *local)
            .filter(|local| local.contains(' '))
            .find(|local| {
                rest.strip_prefix(*local)
                    .is_some_and(|after| !after.starts_with(char::is_alphanumeric))
            });
        Some(widened.unwrap_or(m.as_str()).trim().to_string())
    })
}

fn translate_city(local: &str) -> Option<&'static str> {
    MALAGASY_CITY_NAMES
        .iter()
        .find(|(name, _)| *name == local)
        .map(|(_, english)| *english)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Unavailable;
    use async_trait::async_trait;

    struct Canned(&'static str);

    #[async_trait]
    impl TextGenerator for Canned {
        async fn generate(&self, _prompt: &str, _params: GenerationParams) -> Result<String, GenerationError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_greetings_keep_their_language() {
        assert_eq!(detect_fallback("Hello"), DetectedIntent::conversational(Language::English));
        assert_eq!(detect_fallback("Bonjour"), DetectedIntent::conversational(Language::French));
        assert_eq!(
            detect_fallback("Manao ahoana"),
            DetectedIntent::conversational(Language::Malagasy)
        );
        assert_eq!(detect_fallback("Salama!"), DetectedIntent::conversational(Language::Malagasy));
    }

    #[test]
    fn test_english_city() {
        let intent = detect_fallback("I want hotels in Paris");
        assert_eq!(intent.language, Language::English);
        assert_eq!(intent.city.as_deref(), Some("Paris"));

        let intent = detect_fallback("Find hotels in tokyo, please");
        assert_eq!(intent.city.as_deref(), Some("Tokyo"));

        let intent = detect_fallback("Hotels from dhaka?");
        assert_eq!(intent.city.as_deref(), Some("Dhaka"));
    }

    #[test]
    fn test_repeated_whitespace_before_city() {
        let intent = detect_fallback("I want hotels in  Paris");
        assert_eq!(intent, DetectedIntent::new(Language::English, Some("Paris".into())));

        let intent = detect_fallback("show\thotels   from\n  Lisbon");
        assert_eq!(intent.city.as_deref(), Some("Lisbon"));

        let intent = detect_fallback("Je veux des hôtels à   Nice");
        assert_eq!(intent.city.as_deref(), Some("Nice"));

        let intent = detect_fallback("Tiako hotely  any  Toamasina");
        assert_eq!(intent.city.as_deref(), Some("Toamasina"));

        let intent = detect_fallback("Show me hotels in   New  York");
        assert_eq!(intent.city.as_deref(), Some("New York"));
    }

    #[test]
    fn test_multi_word_city_is_kept_whole() {
        let intent = detect_fallback("Show me hotels in New York.");
        assert_eq!(intent.city.as_deref(), Some("New York"));

        let intent = detect_fallback("hotels in new yorkshire");
        assert_eq!(intent.city.as_deref(), Some("New"));
    }

    #[test]
    fn test_french_city() {
        let intent = detect_fallback("Je veux des hôtels à Lyon");
        assert_eq!(intent.language, Language::French);
        assert_eq!(intent.city.as_deref(), Some("Lyon"));

        let intent = detect_fallback("Je cherche un hôtel dans Marseille.");
        assert_eq!(intent.city.as_deref(), Some("Marseille"));
    }

    #[test]
    fn test_malagasy_city() {
        let intent = detect_fallback("Tiako hotely any Toamasina");
        assert_eq!(intent.language, Language::Malagasy);
        assert_eq!(intent.city.as_deref(), Some("Toamasina"));

        let intent = detect_fallback("asehoy hotely any fort-dauphin");
        assert_eq!(intent.city.as_deref(), Some("Fort-Dauphin"));
    }

    #[test]
    fn test_malagasy_literal_city_mention() {
        let intent = detect_fallback("Tiako hotely mumbai");
        assert_eq!(intent.language, Language::Malagasy);
        assert_eq!(intent.city.as_deref(), Some("Mumbai"));
    }

    #[test]
    fn test_no_city() {
        let intent = detect_fallback("What can you do?");
        assert_eq!(intent, DetectedIntent::conversational(Language::English));
    }

    #[test]
    fn test_parse_plain_and_fenced_replies() {
        let intent = parse_detection_reply(r#"{"language": "french", "city": "Paris"}"#).unwrap();
        assert_eq!(intent, DetectedIntent::new(Language::French, Some("Paris".into())));

        let fenced = "Here you go:\n```json\n{\"language\": \"malagasy\", \"city\": null}\n```";
        let intent = parse_detection_reply(fenced).unwrap();
        assert_eq!(intent, DetectedIntent::conversational(Language::Malagasy));
    }

    #[test]
    fn test_parse_unknown_language_and_blank_city() {
        let intent = parse_detection_reply(r#"{"language": "german", "city": "  "}"#).unwrap();
        assert_eq!(intent, DetectedIntent::conversational(Language::English));
    }

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(matches!(
            parse_detection_reply("I think this is French."),
            Err(GenerationError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_detect_uses_ai_reply() {
        let generator = Canned(r#"{"language": "english", "city": "Cox's Bazar"}"#);
        let intent = detect(&generator, "hotels near the beach in cox's bazar").await;
        assert_eq!(intent.city.as_deref(), Some("Cox's Bazar"));
    }

    #[tokio::test]
    async fn test_detect_falls_back_on_garbage_reply() {
        let intent = detect(&Canned("no idea"), "Je veux des hôtels à Nice").await;
        assert_eq!(intent, DetectedIntent::new(Language::French, Some("Nice".into())));

        let intent = detect(&Unavailable, "I want hotels in Paris").await;
        assert_eq!(intent, DetectedIntent::new(Language::English, Some("Paris".into())));
    }
}
