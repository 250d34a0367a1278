//! Product Search Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::models::ProductResponse, extensions::*, observability::observe_search, state::State,
};

/// Search Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SearchResponse {
    /// Matching products in index order, at most eight
    pub results: Vec<ProductResponse>,
}

/// Product Search Handler
///
/// Any whitespace-separated term may match name, category, thickness or colour.
#[endpoint(
    tags("catalog"),
    summary = "Search products",
    responses(
        (status_code = StatusCode::OK, description = "Search results"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<SearchResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let query = q.into_inner().unwrap_or_default();
    let results = state.app.catalog.search(&query).await;

    observe_search("search", results.len());

    Ok(Json(SearchResponse {
        results: results.into_iter().map(ProductResponse::from).collect(),
    }))
}
