//! Reverse Geocoding Handler

use std::sync::Arc;

use alero_app::geocoding::GeocodedAddress;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, geocoding::errors::into_status_error, state::State};

/// Address Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressResponse {
    /// Street and number
    pub address: String,

    /// Commune
    pub commune: String,

    /// Region
    pub region: String,

    /// Full formatted address
    pub display_name: String,
}

impl From<GeocodedAddress> for AddressResponse {
    fn from(address: GeocodedAddress) -> Self {
        Self {
            address: address.address,
            commune: address.commune,
            region: address.region,
            display_name: address.display_name,
        }
    }
}

/// Reverse Geocoding Handler
///
/// Resolves the buyer's coordinates to address fields for the checkout form.
#[endpoint(
    tags("geocoding"),
    summary = "Address for a coordinate pair",
    responses(
        (status_code = StatusCode::OK, description = "Address found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid coordinates"),
        (status_code = StatusCode::NOT_FOUND, description = "No address for the coordinates"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Geocoder unavailable"),
    ),
)]
pub(crate) async fn handler(
    lat: QueryParam<f64, true>,
    lon: QueryParam<f64, true>,
    depot: &mut Depot,
) -> Result<Json<AddressResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let address = state
        .app
        .geocoder
        .reverse(lat.into_inner(), lon.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(address.into()))
}

#[cfg(test)]
mod tests {
    use alero_app::geocoding::{GeocodingError, MockGeocoder};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TestServices, service};

    use super::*;

    fn make_service(geocoder: MockGeocoder) -> Service {
        service(
            TestServices {
                geocoder,
                ..TestServices::default()
            },
            Router::with_path("geocode/reverse").get(handler),
        )
    }

    #[tokio::test]
    async fn test_reverse_returns_address_fields() -> TestResult {
        let mut geocoder = MockGeocoder::new();

        geocoder
            .expect_reverse()
            .once()
            .withf(|lat, lon| (*lat + 33.4372).abs() < 1e-9 && (*lon + 70.6506).abs() < 1e-9)
            .return_once(|_, _| {
                Ok(GeocodedAddress {
                    address: "Avenida Providencia 1234".to_string(),
                    commune: "Providencia".to_string(),
                    region: "Región Metropolitana de Santiago".to_string(),
                    display_name: "Avenida Providencia 1234, Providencia, Chile".to_string(),
                })
            });

        let mut res = TestClient::get("http://example.com/geocode/reverse?lat=-33.4372&lon=-70.6506")
            .send(&make_service(geocoder))
            .await;

        let body: AddressResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.commune, "Providencia");
        assert_eq!(body.address, "Avenida Providencia 1234");

        Ok(())
    }

    #[tokio::test]
    async fn test_out_of_range_coordinates_return_400() -> TestResult {
        let mut geocoder = MockGeocoder::new();

        geocoder
            .expect_reverse()
            .once()
            .return_once(|lat, lon| Err(GeocodingError::InvalidCoordinates { lat, lon }));

        let res = TestClient::get("http://example.com/geocode/reverse?lat=123&lon=0")
            .send(&make_service(geocoder))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_location_returns_404() -> TestResult {
        let mut geocoder = MockGeocoder::new();

        geocoder
            .expect_reverse()
            .once()
            .return_once(|_, _| Err(GeocodingError::NotFound("Unable to geocode".to_string())));

        let res = TestClient::get("http://example.com/geocode/reverse?lat=-60&lon=-100")
            .send(&make_service(geocoder))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_upstream_failure_returns_502() -> TestResult {
        let mut geocoder = MockGeocoder::new();

        geocoder
            .expect_reverse()
            .once()
            .return_once(|_, _| Err(GeocodingError::UnexpectedResponse("503".to_string())));

        let res = TestClient::get("http://example.com/geocode/reverse?lat=-33.4&lon=-70.6")
            .send(&make_service(geocoder))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_GATEWAY));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_coordinates_return_400() -> TestResult {
        let mut geocoder = MockGeocoder::new();

        geocoder.expect_reverse().never();

        let res = TestClient::get("http://example.com/geocode/reverse?lat=-33.4")
            .send(&make_service(geocoder))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
