//! Generative text service used for detection and reply phrasing.
//!
//! Callers treat every [`GenerationError`] as a signal to use their
//! deterministic fallback; none of them reach the HTTP boundary.

use async_trait::async_trait;
use thiserror::Error;

pub mod groq;

pub use groq::GroqClient;

/// Sampling settings for one call type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationParams {
    /// Language/city extraction: short and near-deterministic.
    pub const DETECTION: Self = Self {
        temperature: 0.1,
        max_tokens: 100,
    };
    pub const HOTEL_REPLY: Self = Self {
        temperature: 0.7,
        max_tokens: 300,
    };
    pub const CONVERSATION: Self = Self {
        temperature: 0.7,
        max_tokens: 150,
    };
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no API key configured for the generation service")]
    MissingApiKey,

    #[error("generation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generation service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("generation service returned an empty reply")]
    EmptyReply,

    #[error("unusable generation reply: {0}")]
    Parse(String),
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send a single user prompt and return the trimmed reply text.
    async fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String, GenerationError>;
}

/// Generator used when no AI service is configured; every call fails.
pub struct Unavailable;

#[async_trait]
impl TextGenerator for Unavailable {
    async fn generate(&self, _prompt: &str, _params: GenerationParams) -> Result<String, GenerationError> {
        Err(GenerationError::MissingApiKey)
    }
}
