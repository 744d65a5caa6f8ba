//! Reply text for hotel results and free conversation.
//!
//! Each reply is generated first and falls back to fixed, localized text.

use super::prompts;
use super::text::contains_any;
use crate::llm::{GenerationParams, TextGenerator};
use crate::metrics;
use crate::models::{HotelRecord, Language};

/// Kind of a conversational message, used to pick a canned reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    Greeting,
    Help,
    Other,
}

fn greeting_words(language: Language) -> &'static [&'static str] {
    match language {
        Language::English => &["hello", "hi", "hey"],
        Language::French => &["bonjour", "salut", "bonsoir"],
        Language::Malagasy => &["manao ahoana", "salama", "akory"],
    }
}

fn help_words(language: Language) -> &'static [&'static str] {
    match language {
        Language::English => &["help", "what can you do"],
        Language::French => &["aide", "aidez-moi", "que pouvez-vous faire"],
        Language::Malagasy => &["fanampiana", "ampianao", "inona no vitanao"],
    }
}

/// `"1. Name - rating"` lines, one per hotel.
pub fn numbered_list(hotels: &[HotelRecord]) -> String {
    hotels
        .iter()
        .enumerate()
        .map(|(i, hotel)| format!("{}. {}", i + 1, hotel.list_label()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn compose_hotel_reply(
    generator: &dyn TextGenerator,
    language: Language,
    city: &str,
    hotels: &[HotelRecord],
) -> String {
    if hotels.is_empty() {
        return no_hotels_message(language, city);
    }

    let prompt = prompts::hotel_reply(language, city, &numbered_list(hotels));
    match generator.generate(&prompt, GenerationParams::HOTEL_REPLY).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::debug!(language = %language, "hotel reply generation failed: {}", e);
            metrics::record_fallback("hotel_reply");
            compose_fallback(language, city, hotels)
        }
    }
}

/// Header naming the city, the numbered list and a total.
pub fn compose_fallback(language: Language, city: &str, hotels: &[HotelRecord]) -> String {
    if hotels.is_empty() {
        return no_hotels_message(language, city);
    }

    let list = numbered_list(hotels);
    let total = hotels.len();
    match language {
        Language::French => format!(
            "🏨 Voici les hôtels disponibles à {}:\n\n{}\n\nTotal: {} hôtels trouvés! ✨",
            city, list, total
        ),
        Language::Malagasy => format!(
            "🏨 Ireto ny hotely misy any {}:\n\n{}\n\nTotaliny: hotely {} no hita! ✨",
            city, list, total
        ),
        Language::English => format!(
            "🏨 Here are available hotels in {}:\n\n{}\n\nTotal {} hotels found! ✨",
            city, list, total
        ),
    }
}

pub fn no_hotels_message(language: Language, city: &str) -> String {
    match language {
        Language::French => format!(
            "Désolé, je n'ai pas pu trouver d'hôtels disponibles à {}. Cette ville pourrait ne pas être disponible dans notre base de données ou il pourrait y avoir un problème temporaire. Veuillez essayer une autre ville ou réessayer plus tard. 🏨",
            city
        ),
        Language::Malagasy => format!(
            "Miala tsiny, tsy nahita hotely misy any {} aho. Mety tsy misy ity tanàna ity ao amin'ny angon-draharaha na misy olana vonjimaika. Andramo tanàna hafa na avereno indray tatỳ aoriana. 🏨",
            city
        ),
        Language::English => format!(
            "Sorry, I couldn't find any hotels available in {}. This city might not be available in our database or there might be a temporary issue. Please try a different city or try again later. 🏨",
            city
        ),
    }
}

pub async fn respond_conversational(
    generator: &dyn TextGenerator,
    language: Language,
    message: &str,
) -> String {
    let prompt = prompts::conversation(language, message);
    match generator.generate(&prompt, GenerationParams::CONVERSATION).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::debug!(language = %language, "conversational generation failed: {}", e);
            metrics::record_fallback("conversation");
            conversational_fallback(language, message)
        }
    }
}

/// Greeting takes precedence over help.
pub fn classify_chat(language: Language, message: &str) -> ChatKind {
    let lower = message.to_lowercase();
    if contains_any(&lower, greeting_words(language)) {
        ChatKind::Greeting
    } else if contains_any(&lower, help_words(language)) {
        ChatKind::Help
    } else {
        ChatKind::Other
    }
}

pub fn conversational_fallback(language: Language, message: &str) -> String {
    canned_reply(language, classify_chat(language, message)).to_string()
}

pub fn canned_reply(language: Language, kind: ChatKind) -> &'static str {
    match (language, kind) {
        (Language::French, ChatKind::Greeting) => "Bonjour! 👋 Je peux vous aider à trouver des hôtels dans n'importe quelle ville du monde. Dites-moi simplement où vous voulez séjourner!",
        (Language::French, ChatKind::Help) => "Je peux vous montrer des listes d'hôtels par ville! 🏨 Dites simplement 'Je veux des hôtels à [nom de la ville]'. Essayez: 'Montrez-moi des hôtels à Paris'",
        (Language::French, ChatKind::Other) => "Je peux vous aider à trouver des hôtels! 🏨 Dites-moi dans quelle ville vous êtes intéressé. Exemple: 'Je veux des hôtels à Tokyo'",
        (Language::Malagasy, ChatKind::Greeting) => "Manao ahoana! 👋 Afaka manampy anao hitady hotely any amin'ny tanàna rehetra eran'izao tontolo izao aho. Lazao fotsiny hoe aiza no tianao hivonana!",
        (Language::Malagasy, ChatKind::Help) => "Afaka mampiseho lisitry ny hotely isaky ny tanàna aho! 🏨 Lazao fotsiny hoe 'Tiako hotely any [anaran'ny tanàna]'. Andramo: 'Asehoy ny hotely any Antananarivo'",
        (Language::Malagasy, ChatKind::Other) => "Afaka manampy anao hitady hotely aho! 🏨 Lazao ahy hoe amin'ny tanàna inona no liana ianao. Ohatra: 'Tiako hotely any Paris'",
        (Language::English, ChatKind::Greeting) => "Hello! 👋 I can help you find hotels in any city worldwide. Just tell me where you want to stay!",
        (Language::English, ChatKind::Help) => "I can show you hotel lists for any city! 🏨 Just say 'I want hotels in [city name]'. Try: 'Show me hotels in Paris'",
        (Language::English, ChatKind::Other) => "I can help you find hotels! 🏨 Just tell me which city you're interested in. Example: 'Hotels in London please'",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{GenerationError, Unavailable};
    use crate::provider::FallbackCatalog;
    use async_trait::async_trait;

    struct Canned(&'static str);

    #[async_trait]
    impl TextGenerator for Canned {
        async fn generate(&self, _prompt: &str, _params: GenerationParams) -> Result<String, GenerationError> {
            Ok(self.0.to_string())
        }
    }

    fn rated(name: &str, rating: &str) -> HotelRecord {
        HotelRecord {
            rating: Some(rating.into()),
            ..HotelRecord::named(name)
        }
    }

    #[test]
    fn test_fallback_lists_and_counts() {
        let hotels = vec![
            rated("Hôtel Lutetia", "⭐⭐⭐⭐ (81/100)"),
            rated("Le Meurice", "Rating not available"),
        ];
        let reply = compose_fallback(Language::English, "Paris", &hotels);
        assert!(reply.starts_with("🏨 Here are available hotels in Paris"));
        assert!(reply.contains("1. Hôtel Lutetia - ⭐⭐⭐⭐ (81/100)\n2. Le Meurice - Rating not available"));
        assert!(reply.ends_with("Total 2 hotels found! ✨"));

        let reply = compose_fallback(Language::Malagasy, "Paris", &hotels);
        assert!(reply.contains("Totaliny: hotely 2 no hita!"));
    }

    #[test]
    fn test_static_names_have_no_rating_suffix() {
        let hotels = vec![HotelRecord::named("Carlton Hotel")];
        let reply = compose_fallback(Language::French, "Antananarivo", &hotels);
        assert!(reply.contains("à Antananarivo"));
        assert!(reply.contains("1. Carlton Hotel\n"));
    }

    #[test]
    fn test_empty_fallback_names_city_for_every_static_city() {
        let catalog = FallbackCatalog::builtin().unwrap();
        for city in catalog.cities() {
            for language in Language::ALL {
                let reply = compose_fallback(language, city, &[]);
                assert!(!reply.is_empty());
                assert!(reply.contains(city));
                assert_eq!(reply, no_hotels_message(language, city));
            }
        }
    }

    #[test]
    fn test_classification() {
        assert_eq!(classify_chat(Language::English, "Hi!"), ChatKind::Greeting);
        assert_eq!(classify_chat(Language::English, "this is it"), ChatKind::Other);
        assert_eq!(classify_chat(Language::English, "What can you do?"), ChatKind::Help);
        assert_eq!(classify_chat(Language::French, "Aidez-moi svp"), ChatKind::Help);
        assert_eq!(classify_chat(Language::Malagasy, "Salama tompoko"), ChatKind::Greeting);
        // greeting words are only checked for the detected language
        assert_eq!(classify_chat(Language::French, "hello"), ChatKind::Other);
    }

    #[tokio::test]
    async fn test_bonjour_gets_a_french_canned_reply() {
        let reply = respond_conversational(&Unavailable, Language::French, "Bonjour").await;
        let canned: Vec<&str> = [ChatKind::Greeting, ChatKind::Help, ChatKind::Other]
            .into_iter()
            .map(|k| canned_reply(Language::French, k))
            .collect();
        assert!(canned.contains(&reply.as_str()));
        assert_eq!(reply, canned_reply(Language::French, ChatKind::Greeting));
    }

    #[tokio::test]
    async fn test_generated_replies_are_used_verbatim() {
        let hotels = vec![rated("Park Hyatt", "⭐⭐⭐⭐⭐ (95/100)")];
        let reply = compose_hotel_reply(&Canned("Welcome to Tokyo! 🗼"), Language::English, "Tokyo", &hotels).await;
        assert_eq!(reply, "Welcome to Tokyo! 🗼");

        let reply = respond_conversational(&Canned("Salut! 😊"), Language::French, "salut").await;
        assert_eq!(reply, "Salut! 😊");
    }

    #[tokio::test]
    async fn test_hotel_reply_falls_back_without_generator() {
        let hotels = vec![rated("Park Hyatt", "⭐⭐⭐⭐⭐ (95/100)")];
        let reply = compose_hotel_reply(&Unavailable, Language::English, "Tokyo", &hotels).await;
        assert_eq!(reply, compose_fallback(Language::English, "Tokyo", &hotels));
    }
}
