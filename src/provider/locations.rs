//! City name → location (IATA) code.

use serde::Deserialize;

use super::{AmadeusClient, ProviderError};

#[derive(Deserialize)]
struct LocationsResponse {
    #[serde(default)]
    data: Vec<Location>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    iata_code: Option<String>,
}

impl AmadeusClient {
    /// Resolve a free-text city name to the provider's city code.
    /// Any failure is logged and reported as `None`.
    pub async fn resolve_city(&self, city_name: &str, token: &str) -> Option<String> {
        match self.try_resolve_city(city_name, token).await {
            Ok(Some(code)) => {
                tracing::debug!(city = %city_name, city_code = %code, "resolved city");
                Some(code)
            }
            Ok(None) => {
                tracing::info!(city = %city_name, "no matching city in location search");
                None
            }
            Err(e) => {
                tracing::warn!(city = %city_name, "error getting city code: {}", e);
                None
            }
        }
    }

    async fn try_resolve_city(
        &self,
        city_name: &str,
        token: &str,
    ) -> Result<Option<String>, ProviderError> {
        let resp: LocationsResponse = self
            .get_json(
                "locations",
                "/v1/reference-data/locations",
                token,
                &[
                    ("keyword", city_name),
                    ("subType", "CITY"),
                    ("page[limit]", "1"),
                ],
            )
            .await?;

        Ok(resp
            .data
            .into_iter()
            .next()
            .and_then(|loc| loc.iata_code)
            .filter(|code| !code.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use crate::provider::test_support::client_for;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_returns_first_iata_code() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/reference-data/locations"))
            .and(query_param("keyword", "Paris"))
            .and(query_param("subType", "CITY"))
            .and(query_param("page[limit]", "1"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"type": "location", "subType": "CITY", "name": "PARIS", "iataCode": "PAR"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        assert_eq!(client.resolve_city("Paris", "tok").await.as_deref(), Some("PAR"));
    }

    #[tokio::test]
    async fn test_empty_result_is_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/reference-data/locations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        assert!(client.resolve_city("Atlantis", "tok").await.is_none());
    }

    #[tokio::test]
    async fn test_error_status_is_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/reference-data/locations"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        assert!(client.resolve_city("Paris", "tok").await.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_none() {
        let client = client_for("http://127.0.0.1:1");
        assert!(client.resolve_city("Paris", "tok").await.is_none());
    }
}
