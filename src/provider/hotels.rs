//! Hotels by city code, and sentiment-based star ratings.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{AmadeusClient, ProviderError};
use crate::models::{Address, GeoCode, HotelRecord};

/// Upper bound on hotels per reply; each one costs a rating lookup.
pub const MAX_HOTELS: usize = 8;

pub const RATING_NOT_AVAILABLE: &str = "Rating not available";

#[derive(Deserialize)]
struct HotelsByCityResponse {
    #[serde(default)]
    data: Vec<HotelEntry>,
}

/// Sub-objects stay raw so that one malformed entry cannot fail the whole list.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HotelEntry {
    name: Option<String>,
    hotel_id: Option<String>,
    #[serde(default)]
    address: Option<serde_json::Value>,
    #[serde(default)]
    geo_code: Option<serde_json::Value>,
}

fn decode_part<T: DeserializeOwned>(raw: Option<serde_json::Value>, hotel_id: &str, field: &str) -> Option<T> {
    let raw = raw.filter(|v| !v.is_null())?;
    match serde_json::from_value(raw) {
        Ok(part) => Some(part),
        Err(e) => {
            tracing::debug!(hotel_id = %hotel_id, field, "ignoring malformed hotel field: {}", e);
            None
        }
    }
}

#[derive(Deserialize)]
struct SentimentsResponse {
    #[serde(default)]
    data: Vec<Sentiment>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Sentiment {
    overall_rating: Option<f64>,
}

/// Convert a 0-100 sentiment score to a 1-5 star count.
/// A zero, negative or non-finite score means no rating.
pub fn stars_for_score(score: f64) -> Option<u8> {
    if !score.is_finite() || score <= 0.0 {
        return None;
    }
    let stars = (score / 20.0).round().clamp(1.0, 5.0);
    Some(stars as u8)
}

/// `"⭐⭐⭐⭐ (78/100)"`.
pub fn rating_label(score: f64) -> Option<String> {
    let stars = stars_for_score(score)?;
    let shown = if score.fract() == 0.0 {
        format!("{:.0}", score)
    } else {
        format!("{:.1}", score)
    };
    Some(format!("{} ({}/100)", "⭐".repeat(stars as usize), shown))
}

impl AmadeusClient {
    /// Up to [`MAX_HOTELS`] hotels for a city code. Entries without a name or
    /// id are skipped. Any failure yields an empty list.
    pub async fn lookup_hotels(&self, city_code: &str, token: &str) -> Vec<HotelRecord> {
        match self.try_lookup_hotels(city_code, token).await {
            Ok(hotels) => {
                tracing::debug!(city_code = %city_code, count = hotels.len(), "hotel lookup finished");
                hotels
            }
            Err(e) => {
                tracing::warn!(city_code = %city_code, "hotel search failed: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_lookup_hotels(
        &self,
        city_code: &str,
        token: &str,
    ) -> Result<Vec<HotelRecord>, ProviderError> {
        let resp: HotelsByCityResponse = self
            .get_json(
                "hotels_by_city",
                "/v1/reference-data/locations/hotels/by-city",
                token,
                &[("cityCode", city_code)],
            )
            .await?;

        let hotels = resp
            .data
            .into_iter()
            .filter_map(|entry| {
                let name = entry.name.filter(|n| !n.trim().is_empty())?;
                let hotel_id = entry.hotel_id.filter(|id| !id.trim().is_empty())?;
                let address = decode_part::<Address>(entry.address, &hotel_id, "address")
                    .filter(|a| !a.is_empty());
                let geo_code = decode_part::<GeoCode>(entry.geo_code, &hotel_id, "geoCode");
                Some(HotelRecord {
                    name,
                    hotel_id: Some(hotel_id),
                    rating: None,
                    address,
                    geo_code,
                    location: None,
                })
            })
            .take(MAX_HOTELS)
            .collect();

        Ok(hotels)
    }

    /// Look up a rating for each record, one call at a time. Records are never
    /// dropped: a missing or failed rating becomes [`RATING_NOT_AVAILABLE`].
    pub async fn attach_ratings(&self, records: Vec<HotelRecord>, token: &str) -> Vec<HotelRecord> {
        let mut rated = Vec::with_capacity(records.len());
        for mut record in records {
            let rating = match record.hotel_id.as_deref() {
                Some(id) => self.hotel_rating(id, token).await,
                None => None,
            };
            record.rating = Some(rating.unwrap_or_else(|| RATING_NOT_AVAILABLE.to_string()));
            rated.push(record);
        }
        rated
    }

    /// Star label for one hotel, or `None` when unavailable.
    pub async fn hotel_rating(&self, hotel_id: &str, token: &str) -> Option<String> {
        match self.try_hotel_score(hotel_id, token).await {
            Ok(Some(score)) => {
                let label = rating_label(score);
                if label.is_none() {
                    tracing::debug!(hotel_id = %hotel_id, score, "score too low for a star rating");
                }
                label
            }
            Ok(None) => {
                tracing::debug!(hotel_id = %hotel_id, "no sentiment data for hotel");
                None
            }
            Err(e) => {
                tracing::warn!(hotel_id = %hotel_id, "rating lookup failed: {}", e);
                None
            }
        }
    }

    async fn try_hotel_score(&self, hotel_id: &str, token: &str) -> Result<Option<f64>, ProviderError> {
        let resp: SentimentsResponse = self
            .get_json(
                "hotel_sentiments",
                "/v2/e-reputation/hotel-sentiments",
                token,
                &[("hotelIds", hotel_id)],
            )
            .await?;

        Ok(resp.data.into_iter().next().and_then(|s| s.overall_rating))
    }
}
