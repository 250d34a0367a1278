//! Nominatim reverse geocoding client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::geocoding::GeocodingError;

/// Configuration for the Nominatim-compatible geocoder.
#[derive(Debug, Clone)]
pub struct GeocodingConfig {
    /// Service base URL, e.g. `"https://nominatim.openstreetmap.org"`.
    pub base_url: String,

    /// `User-Agent` sent with every request, as required by the public service.
    pub user_agent: String,
}

/// Address fields used to prefill the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodedAddress {
    /// Street and number
    pub address: String,

    /// Commune (city, town or village)
    pub commune: String,

    /// Region
    pub region: String,

    /// Full formatted address returned by the provider
    pub display_name: String,
}

/// Reverse geocoder speaking the Nominatim `reverse` API.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    config: GeocodingConfig,
    http: Client,
}

impl NominatimGeocoder {
    #[must_use]
    pub fn new(config: GeocodingConfig, http: Client) -> Self {
        Self { config, http }
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn reverse(&self, lat: f64, lon: f64) -> Result<GeocodedAddress, GeocodingError> {
        validate_coordinates(lat, lon)?;

        let url = format!("{}/reverse", self.config.base_url.trim_end_matches('/'));

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.config.user_agent)
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(GeocodingError::UnexpectedResponse(format!(
                "reverse lookup failed with status {status}: {text}"
            )));
        }

        let parsed: ReverseResponse = response.json().await?;

        parsed.into_address()
    }
}

#[automock]
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a coordinate pair to an address.
    async fn reverse(&self, lat: f64, lon: f64) -> Result<GeocodedAddress, GeocodingError>;
}

fn validate_coordinates(lat: f64, lon: f64) -> Result<(), GeocodingError> {
    if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
        Ok(())
    } else {
        Err(GeocodingError::InvalidCoordinates { lat, lon })
    }
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    display_name: Option<String>,

    #[serde(default)]
    address: Option<ReverseAddress>,

    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ReverseAddress {
    road: Option<String>,
    house_number: Option<String>,
    suburb: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
}

impl ReverseResponse {
    fn into_address(self) -> Result<GeocodedAddress, GeocodingError> {
        if let Some(error) = self.error {
            return Err(GeocodingError::NotFound(error));
        }

        let address = self.address.unwrap_or_default();

        let street = match (address.road, address.house_number) {
            (Some(road), Some(number)) => format!("{road} {number}"),
            (Some(road), None) => road,
            (None, _) => String::new(),
        };

        let commune = address
            .city
            .or(address.town)
            .or(address.village)
            .or(address.suburb)
            .unwrap_or_default();

        Ok(GeocodedAddress {
            address: street,
            commune,
            region: address.state.unwrap_or_default(),
            display_name: self.display_name.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn parse(value: serde_json::Value) -> Result<ReverseResponse, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn maps_road_number_city_and_state() -> TestResult {
        let address = parse(json!({
            "display_name": "Avenida Providencia 1234, Providencia, Santiago, Chile",
            "address": {
                "road": "Avenida Providencia",
                "house_number": "1234",
                "suburb": "Barrio Italia",
                "city": "Providencia",
                "state": "Región Metropolitana de Santiago"
            }
        }))?
        .into_address()?;

        assert_eq!(address.address, "Avenida Providencia 1234");
        assert_eq!(address.commune, "Providencia");
        assert_eq!(address.region, "Región Metropolitana de Santiago");

        Ok(())
    }

    #[test]
    fn falls_back_to_town_and_bare_road() -> TestResult {
        let address = parse(json!({
            "address": { "road": "Camino a Farellones", "town": "Lo Barnechea" }
        }))?
        .into_address()?;

        assert_eq!(address.address, "Camino a Farellones");
        assert_eq!(address.commune, "Lo Barnechea");
        assert_eq!(address.region, "");

        Ok(())
    }

    #[test]
    fn provider_error_is_not_found() -> TestResult {
        let result = parse(json!({ "error": "Unable to geocode" }))?.into_address();

        assert!(
            matches!(result, Err(GeocodingError::NotFound(_))),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        assert!(validate_coordinates(-33.45, -70.66).is_ok());
        assert!(validate_coordinates(91.0, 0.0).is_err());
        assert!(validate_coordinates(0.0, -181.0).is_err());
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
    }
}
