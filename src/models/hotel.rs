use serde::{Deserialize, Deserializer, Serialize};

/// Postal address as reported by the hotel data provider. Read in the
/// provider's camelCase, written in snake_case like the rest of a reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        self.country_code.is_none()
            && self.city_name.is_none()
            && self.lines.is_empty()
            && self.postal_code.is_none()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCode {
    pub latitude: f64,
    pub longitude: f64,
}

/// One hotel in a reply. Built from provider data or the static table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelRecord {
    pub name: String,
    /// Provider identifier, needed for the rating lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_code: Option<GeoCode>,
    /// The city the user asked about.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl HotelRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hotel_id: None,
            rating: None,
            address: None,
            geo_code: None,
            location: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// `"Name - rating"` when a rating is known, otherwise just the name.
    pub fn list_label(&self) -> String {
        match &self.rating {
            Some(rating) => format!("{} - {}", self.name, rating),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_label() {
        let mut hotel = HotelRecord::named("Hotel Lutetia");
        assert_eq!(hotel.list_label(), "Hotel Lutetia");
        hotel.rating = Some("⭐⭐⭐⭐ (82/100)".into());
        assert_eq!(hotel.list_label(), "Hotel Lutetia - ⭐⭐⭐⭐ (82/100)");
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let json = serde_json::to_value(HotelRecord::named("Ibis").with_location("Paris")).unwrap();
        assert_eq!(json["name"], "Ibis");
        assert_eq!(json["location"], "Paris");
        assert!(json.get("hotel_id").is_none());
        assert!(json.get("rating").is_none());
        assert!(json.get("geo_code").is_none());
    }

    #[test]
    fn test_address_reads_camel_case_and_writes_snake_case() {
        let address: Address = serde_json::from_value(serde_json::json!({
            "countryCode": "FR",
            "postalCode": "75006",
            "lines": null
        }))
        .unwrap();
        assert!(address.lines.is_empty());

        let hotel = HotelRecord {
            hotel_id: Some("HLPAR001".into()),
            address: Some(address),
            geo_code: Some(GeoCode { latitude: 48.85, longitude: 2.33 }),
            ..HotelRecord::named("Hotel Lutetia")
        };
        let json = serde_json::to_value(&hotel).unwrap();
        assert_eq!(json["hotel_id"], "HLPAR001");
        assert_eq!(json["address"]["country_code"], "FR");
        assert_eq!(json["address"]["postal_code"], "75006");
        assert!(json["address"].get("countryCode").is_none());
        assert_eq!(json["geo_code"]["latitude"], 48.85);
    }
}
