//! Project Estimate Handler

use alero::estimates::{DiscountTiers, ProjectEstimate, ProjectRequest, estimate};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{estimates::errors::into_status_error, extensions::*};

/// Project Estimate Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EstimateRequest {
    /// Width of the area to cover, in metres
    pub width_m: f64,

    /// Length of the area to cover, in metres
    pub length_m: f64,

    /// Price per square metre in CLP
    pub unit_price_per_m2: u64,

    /// Skip volume discounts
    #[serde(default)]
    pub no_discounts: bool,
}

/// Project Estimate Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EstimateResponse {
    /// Covered area in m²
    pub area_m2: f64,

    /// Standard 2.10 m × 5.80 m sheets needed
    pub sheets_needed: u32,

    /// Area × unit price, in CLP
    pub subtotal: u64,

    /// Applied discount as a percentage, e.g. `10` for 10 %
    pub discount_percent: Option<f64>,

    /// Discount amount in CLP
    pub discount: u64,

    /// Amount payable in CLP
    pub total: u64,
}

impl From<ProjectEstimate> for EstimateResponse {
    fn from(estimate: ProjectEstimate) -> Self {
        Self {
            area_m2: estimate.area_m2.to_f64().unwrap_or_default(),
            sheets_needed: estimate.sheets_needed,
            subtotal: estimate.subtotal,
            discount_percent: estimate
                .discount_rate
                .and_then(|rate| ((rate * Decimal::ONE) * Decimal::ONE_HUNDRED).to_f64()),
            discount: estimate.discount,
            total: estimate.total,
        }
    }
}

fn to_metres(value: f64) -> Result<Decimal, StatusError> {
    Decimal::try_from(value).or_400("dimensions must be finite numbers")
}

/// Project Estimate Handler
///
/// Prices a rectangular area, applying volume discounts from 20 m² upwards.
#[endpoint(
    tags("estimates"),
    summary = "Estimate a project",
    responses(
        (status_code = StatusCode::OK, description = "Project estimate"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid dimensions or price"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<EstimateRequest>,
) -> Result<Json<EstimateResponse>, StatusError> {
    let request = json.into_inner();

    let tiers = if request.no_discounts {
        DiscountTiers::none()
    } else {
        DiscountTiers::standard()
    };

    let project = ProjectRequest {
        width_m: to_metres(request.width_m)?,
        length_m: to_metres(request.length_m)?,
        unit_price_per_m2: request.unit_price_per_m2,
    };

    let result = estimate(&project, &tiers).map_err(into_status_error)?;

    Ok(Json(result.into()))
}
