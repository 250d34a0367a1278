//! Featured Products Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::models::ProductResponse, extensions::*, observability::observe_search, state::State,
};

const DEFAULT_LIMIT: usize = 4;
const MAX_LIMIT: usize = 24;

/// Featured Products Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FeaturedResponse {
    /// One product per category
    pub products: Vec<ProductResponse>,
}

/// Featured Products Handler
///
/// Lists the first product of each category. `limit` defaults to 4 and is capped at 24.
#[endpoint(
    tags("catalog"),
    summary = "Featured products",
    responses(
        (status_code = StatusCode::OK, description = "Featured products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid limit"),
    ),
)]
pub(crate) async fn handler(
    limit: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<FeaturedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let limit = parse_limit(limit.into_inner())?;
    let products = state.app.catalog.featured(limit).await;

    observe_search("featured", products.len());

    Ok(Json(FeaturedResponse {
        products: products.into_iter().map(ProductResponse::from).collect(),
    }))
}

fn parse_limit(value: Option<String>) -> Result<usize, StatusError> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(|value| value.trim().parse::<usize>())
        .transpose()
        .or_400("could not parse \"limit\" query parameter")
        .map(|limit| limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT))
}
