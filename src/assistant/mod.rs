//! The per-message pipeline.
//!
//! ```text
//! message ─► detect ─┬─ city ──► token ─► resolve city ─► hotels ─► (static table) ─► ratings ─► hotel reply
//!                    └─ none ──► conversational reply
//! ```
//!
//! Nothing is retried. The only failure that escapes is a failed token
//! exchange; every other upstream problem degrades to a fallback reply.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::llm::{GroqClient, TextGenerator, Unavailable};
use crate::metrics;
use crate::models::{ChatResponse, DetectedIntent, Language};
use crate::provider::{AmadeusClient, FallbackCatalog, ProviderError};

pub mod composer;
pub mod detector;
pub mod prompts;
pub mod text;

pub struct TravelAssistant {
    amadeus: AmadeusClient,
    generator: Arc<dyn TextGenerator>,
    fallback: FallbackCatalog,
}

impl TravelAssistant {
    pub fn new(
        amadeus: AmadeusClient,
        generator: Arc<dyn TextGenerator>,
        fallback: FallbackCatalog,
    ) -> Self {
        Self {
            amadeus,
            generator,
            fallback,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let amadeus = AmadeusClient::new(&config.amadeus, config.api_timeout())?;

        let groq = GroqClient::new(&config.groq, config.api_timeout())?;
        let generator: Arc<dyn TextGenerator> = if groq.is_configured() {
            tracing::info!(model = %groq.model(), "AI replies enabled");
            Arc::new(groq)
        } else {
            tracing::warn!("GROQ_API_KEY not set, replies use fixed templates");
            Arc::new(Unavailable)
        };

        let fallback = FallbackCatalog::load(config.fallback_hotels_path.as_deref())?;
        tracing::info!(cities = fallback.len(), "loaded static hotel table");

        Ok(Self::new(amadeus, generator, fallback))
    }

    pub fn fallback_catalog(&self) -> &FallbackCatalog {
        &self.fallback
    }

    pub async fn detect(&self, message: &str) -> DetectedIntent {
        detector::detect(self.generator.as_ref(), message).await
    }

    /// Answer one message. Fails only with [`ProviderError::UpstreamAuth`].
    pub async fn process_message(&self, message: &str) -> Result<ChatResponse, ProviderError> {
        let started = Instant::now();
        let intent = self.detect(message).await;
        tracing::info!(language = %intent.language, city = ?intent.city, "detected intent");

        let (branch, result) = match intent.city.as_deref() {
            Some(city) => ("hotels", self.hotel_reply(intent.language, city).await),
            None => ("conversation", Ok(self.chat_reply(intent.language, message).await)),
        };

        let outcome = match &result {
            Ok(resp) if branch == "hotels" && resp.hotels.is_none() => "no_hotels",
            Ok(_) => "ok",
            Err(_) => "error",
        };
        metrics::record_chat(branch, outcome, started.elapsed());

        result
    }

    async fn hotel_reply(&self, language: Language, city: &str) -> Result<ChatResponse, ProviderError> {
        let token = self.amadeus.get_token().await?;

        let Some(city_code) = self.amadeus.resolve_city(city, &token).await else {
            return Ok(ChatResponse::text(composer::no_hotels_message(language, city)));
        };

        let live = self.amadeus.lookup_hotels(&city_code, &token).await;
        let hotels = if live.is_empty() {
            let fixed = self.fallback.hotels_for(city);
            if !fixed.is_empty() {
                tracing::info!(city = %city, count = fixed.len(), "serving static hotel list");
                metrics::record_fallback("static_hotels");
            }
            fixed
        } else {
            self.amadeus.attach_ratings(live, &token).await
        };

        if hotels.is_empty() {
            return Ok(ChatResponse::text(composer::no_hotels_message(language, city)));
        }

        let hotels: Vec<_> = hotels.into_iter().map(|h| h.with_location(city)).collect();
        let reply = composer::compose_hotel_reply(self.generator.as_ref(), language, city, &hotels).await;
        Ok(ChatResponse::with_hotels(reply, hotels))
    }

    async fn chat_reply(&self, language: Language, message: &str) -> ChatResponse {
        ChatResponse::text(composer::respond_conversational(self.generator.as_ref(), language, message).await)
    }

    /// Healthy when a provider token can be obtained.
    pub async fn health_check(&self) -> Result<(), ProviderError> {
        self.amadeus.get_token().await.map(|_| ())
    }
}
