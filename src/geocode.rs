//! Reverse geocoding through Kakao's `coord2address`.
//!
//! A place name is decoration on top of the weather, so every failure here
//! degrades to a fixed label instead of an error.

use reqwest::Client;
use std::sync::Arc;

use crate::constants::{UNAVAILABLE_PLACE, UNKNOWN_PLACE};
use crate::grid::GeoCoordinate;
use crate::models::Coord2AddressResponse;

#[derive(Debug, Clone)]
pub struct KakaoGeocoder {
    client: Arc<Client>,
    base_url: String,
    api_key: Option<String>,
}

impl KakaoGeocoder {
    pub fn new(client: Arc<Client>, base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    /// Returns "<province> <city>" for the coordinate, or a fallback label.
    pub async fn place_name(&self, coordinate: GeoCoordinate) -> String {
        let Some(api_key) = &self.api_key else {
            tracing::debug!("Kakao API key not configured, skipping reverse geocode");
            return UNAVAILABLE_PLACE.to_string();
        };

        let url = format!(
            "{}/v2/local/geo/coord2address.json?x={}&y={}",
            self.base_url, coordinate.longitude, coordinate.latitude
        );

        let response = match self
            .client
            .get(&url)
            .header("Authorization", format!("KakaoAK {}", api_key))
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Reverse geocode request failed: {}", e);
                return UNAVAILABLE_PLACE.to_string();
            }
        };

        if !response.status().is_success() {
            tracing::warn!("Reverse geocode returned status {}", response.status());
            return UNAVAILABLE_PLACE.to_string();
        }

        let body: Coord2AddressResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!("Reverse geocode parse error: {}", e);
                return UNAVAILABLE_PLACE.to_string();
            }
        };

        let name = place_from_response(body);
        tracing::info!("Reverse geocoded to: {}", name);
        name
    }
}

fn place_from_response(body: Coord2AddressResponse) -> String {
    body.documents
        .into_iter()
        .next()
        .and_then(|document| document.address)
        .map(|address| {
            format!(
                "{} {}",
                address.region_1depth_name, address.region_2depth_name
            )
            .trim()
            .to_string()
        })
        .unwrap_or_else(|| UNKNOWN_PLACE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> Coord2AddressResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_first_document_regions_are_joined() {
        let body = response(json!({
            "documents": [
                { "address": { "address_name": "강원특별자치도 속초시 설악동",
                               "region_1depth_name": "강원특별자치도",
                               "region_2depth_name": "속초시" } },
                { "address": { "region_1depth_name": "other", "region_2depth_name": "other" } }
            ]
        }));
        assert_eq!(place_from_response(body), "강원특별자치도 속초시");
    }

    #[test]
    fn test_empty_region_two_is_trimmed() {
        let body = response(json!({
            "documents": [ { "address": { "region_1depth_name": "세종특별자치시", "region_2depth_name": "" } } ]
        }));
        assert_eq!(place_from_response(body), "세종특별자치시");
    }

    #[test]
    fn test_no_documents_is_unknown() {
        let body = response(json!({ "meta": { "total_count": 0 }, "documents": [] }));
        assert_eq!(place_from_response(body), UNKNOWN_PLACE);
    }

    #[tokio::test]
    async fn test_missing_key_skips_request() {
        let geocoder = KakaoGeocoder::new(Arc::new(Client::new()), "http://127.0.0.1:1", None);
        let name = geocoder.place_name(GeoCoordinate::new(37.5, 127.0)).await;
        assert_eq!(name, UNAVAILABLE_PLACE);
    }
}
