pub mod chat;
pub mod hotel;
pub mod language;

pub use chat::{ChatRequest, ChatResponse, DestinationRecord, HealthStatus};
pub use hotel::{Address, GeoCode, HotelRecord};
pub use language::{DetectedIntent, Language};
