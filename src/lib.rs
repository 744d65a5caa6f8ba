//! travel-chat: multilingual hotel-finding chat assistant.
//!
//! Library crate shared by the `travel-chat` binary and the integration
//! tests in `tests/`.

pub mod api;
pub mod assistant;
pub mod config;
pub mod errors;
pub mod llm;
pub mod metrics;
pub mod models;
pub mod provider;
