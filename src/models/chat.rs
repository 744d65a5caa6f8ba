//! Request and response bodies of the chat API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::hotel::HotelRecord;
use crate::errors::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    /// Trimmed message, or `InvalidRequest` when it is blank or too long.
    pub fn validated_message(&self, max_chars: usize) -> Result<&str, AppError> {
        let message = self.message.trim();
        if message.is_empty() {
            return Err(AppError::InvalidRequest("message must not be empty".into()));
        }
        let len = message.chars().count();
        if len > max_chars {
            return Err(AppError::InvalidRequest(format!(
                "message is {} characters long, the limit is {}",
                len, max_chars
            )));
        }
        Ok(message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub hotels: Option<Vec<HotelRecord>>,
    pub destinations: Option<Vec<DestinationRecord>>,
    pub timestamp: DateTime<Utc>,
}

impl ChatResponse {
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            hotels: None,
            destinations: None,
            timestamp: Utc::now(),
        }
    }

    /// An empty hotel list is reported as absent.
    pub fn with_hotels(response: impl Into<String>, hotels: Vec<HotelRecord>) -> Self {
        Self {
            hotels: if hotels.is_empty() { None } else { Some(hotels) },
            ..Self::text(response)
        }
    }

    pub fn hotel_count(&self) -> usize {
        self.hotels.as_ref().map_or(0, Vec::len)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".into(),
            timestamp: Utc::now(),
            error: None,
        }
    }

    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            status: "unhealthy".into(),
            timestamp: Utc::now(),
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_message_rejected() {
        let req = ChatRequest { message: "   \n".into() };
        assert!(matches!(
            req.validated_message(100),
            Err(AppError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_long_message_rejected_by_char_count() {
        let req = ChatRequest { message: "é".repeat(11) };
        assert!(req.validated_message(10).is_err());
        assert_eq!(req.validated_message(11).unwrap().chars().count(), 11);
    }

    #[test]
    fn test_message_is_trimmed() {
        let req = ChatRequest { message: "  Bonjour  ".into() };
        assert_eq!(req.validated_message(100).unwrap(), "Bonjour");
    }

    #[test]
    fn test_empty_hotel_list_serializes_as_null() {
        let resp = ChatResponse::with_hotels("nothing", vec![]);
        assert!(resp.hotels.is_none());
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json["hotels"].is_null());
        assert!(json["destinations"].is_null());
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_hotel_count() {
        let resp = ChatResponse::with_hotels("two", vec![HotelRecord::named("A"), HotelRecord::named("B")]);
        assert_eq!(resp.hotel_count(), 2);
    }
}
