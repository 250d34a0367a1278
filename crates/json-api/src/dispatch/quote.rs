//! Dispatch Quote Handler

use std::sync::Arc;

use alero::dispatch::{DispatchQuote, format_dispatch_date, format_window};
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{dispatch::errors::into_status_error, extensions::*, state::State};

/// Dispatch Quote Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DispatchQuoteResponse {
    /// Category label the quote was requested for
    pub category: String,

    /// Key of the matched rule, `default` when no keyword matched
    pub rule: String,

    /// Dispatch date (`YYYY-MM-DD`)
    pub date: String,

    /// Human-readable date and window, e.g. `jueves 22 de octubre, 09:00 – 13:00`
    pub label: String,

    /// Human-readable date, e.g. `jueves 22 de octubre`
    pub date_label: String,

    /// Human-readable window, e.g. `09:00 – 13:00`
    pub window: String,

    /// Window start hour, local time
    pub window_start_hour: i8,

    /// Window end hour, local time
    pub window_end_hour: i8,
}

impl DispatchQuoteResponse {
    fn new(category: String, quote: &DispatchQuote) -> Self {
        Self {
            category,
            rule: quote.rule_key.clone(),
            date: quote.date.to_string(),
            label: quote.label(),
            date_label: format_dispatch_date(quote.date),
            window: format_window(quote.window),
            window_start_hour: quote.window.start_hour,
            window_end_hour: quote.window.end_hour,
        }
    }
}

/// Dispatch Quote Handler
///
/// Resolves the next dispatch date for a product category. `at` defaults to now.
#[endpoint(
    tags("dispatch"),
    summary = "Next dispatch date for a category",
    responses(
        (status_code = StatusCode::OK, description = "Dispatch quote"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid point in time"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<DispatchQuoteResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let at = at.into_point_in_time()?;
    let category = category.into_inner().unwrap_or_default();

    let quote = state
        .app
        .dispatch
        .quote(&category, at)
        .map_err(into_status_error)?;

    Ok(Json(DispatchQuoteResponse::new(category, &quote)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TestServices, service};

    use super::*;

    fn make_service() -> Service {
        service(
            TestServices::default(),
            Router::with_path("dispatch").get(handler),
        )
    }

    #[tokio::test]
    async fn test_polycarbonate_before_cutoff_ships_next_dispatch_day() -> TestResult {
        // Wed 21 Oct 2026, 10:00 in Santiago.
        let mut res = TestClient::get(
            "http://example.com/dispatch?category=Policarbonato%20Alveolar&at=2026-10-21T13:00:00Z",
        )
        .send(&make_service())
        .await;

        let body: DispatchQuoteResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.rule, "policarbonato");
        assert_eq!(body.date, "2026-10-22");
        assert_eq!(body.date_label, "jueves 22 de octubre");
        assert!(body.label.starts_with("jueves 22 de octubre, "));

        Ok(())
    }

    #[tokio::test]
    async fn test_unmatched_category_uses_default_rule() -> TestResult {
        let mut res = TestClient::get(
            "http://example.com/dispatch?category=Herramientas&at=2026-10-21T13:00:00Z",
        )
        .send(&make_service())
        .await;

        let body: DispatchQuoteResponse = res.take_json().await?;

        assert_eq!(body.rule, "default");
        assert_eq!(body.category, "Herramientas");

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_point_in_time_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/dispatch?category=Accesorios&at=next-week")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
