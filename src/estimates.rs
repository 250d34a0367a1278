//! Project estimates
//!
//! Prices a roofing or cladding project from its footprint: area × price per m², less a
//! volume discount picked from area tiers.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

/// Width of a standard sheet, in metres.
pub const SHEET_WIDTH_M: Decimal = Decimal::from_parts(210, 0, 0, false, 2);

/// Length of a standard sheet, in metres.
pub const SHEET_LENGTH_M: Decimal = Decimal::from_parts(580, 0, 0, false, 2);

/// Errors raised while estimating a project.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EstimateError {
    /// Width or length was zero or negative.
    #[error("project dimensions must be positive")]
    InvalidDimension,

    /// Price per square metre was zero.
    #[error("price per square metre must be positive")]
    InvalidPrice,

    /// Intermediate amounts did not fit.
    #[error("estimate overflowed")]
    Overflow,
}

/// A project to estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRequest {
    /// Width in metres
    pub width_m: Decimal,

    /// Length in metres
    pub length_m: Decimal,

    /// Price per square metre in CLP
    pub unit_price_per_m2: u64,
}

/// Volume discount applied from a minimum area upwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountTier {
    /// Minimum area, in m², for this tier
    pub min_area_m2: Decimal,

    /// Fractional discount (0.1 = 10 %)
    pub discount: Percentage,
}

/// Discount tiers, largest threshold first.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountTiers(Vec<DiscountTier>);

impl DiscountTiers {
    /// Create a tier table; tiers are sorted by descending threshold.
    pub fn new(mut tiers: Vec<DiscountTier>) -> Self {
        tiers.sort_by(|a, b| b.min_area_m2.cmp(&a.min_area_m2));

        Self(tiers)
    }

    /// 15 % from 100 m², 10 % from 50 m², 5 % from 20 m².
    pub fn standard() -> Self {
        Self::new(vec![
            DiscountTier {
                min_area_m2: Decimal::from(100),
                discount: Percentage::from(Decimal::new(15, 2)),
            },
            DiscountTier {
                min_area_m2: Decimal::from(50),
                discount: Percentage::from(Decimal::new(10, 2)),
            },
            DiscountTier {
                min_area_m2: Decimal::from(20),
                discount: Percentage::from(Decimal::new(5, 2)),
            },
        ])
    }

    /// No volume discount at all.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    /// The highest tier reached by `area`.
    pub fn tier_for(&self, area_m2: Decimal) -> Option<&DiscountTier> {
        self.0.iter().find(|tier| area_m2 >= tier.min_area_m2)
    }
}

impl Default for DiscountTiers {
    fn default() -> Self {
        Self::standard()
    }
}

/// Result of a project estimate. Amounts are whole CLP.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectEstimate {
    /// Covered area in m²
    pub area_m2: Decimal,

    /// Standard sheets needed to cover the area
    pub sheets_needed: u32,

    /// Area × unit price
    pub subtotal: u64,

    /// Applied tier discount, if any
    pub discount_rate: Option<Percentage>,

    /// Discount amount
    pub discount: u64,

    /// Amount payable
    pub total: u64,
}

/// Estimate a project.
///
/// # Errors
///
/// - [`EstimateError::InvalidDimension`]: a dimension is not positive.
/// - [`EstimateError::InvalidPrice`]: the unit price is zero.
/// - [`EstimateError::Overflow`]: amounts are too large to represent.
pub fn estimate(
    request: &ProjectRequest,
    tiers: &DiscountTiers,
) -> Result<ProjectEstimate, EstimateError> {
    if request.width_m <= Decimal::ZERO || request.length_m <= Decimal::ZERO {
        return Err(EstimateError::InvalidDimension);
    }

    if request.unit_price_per_m2 == 0 {
        return Err(EstimateError::InvalidPrice);
    }

    let area = request
        .width_m
        .checked_mul(request.length_m)
        .ok_or(EstimateError::Overflow)?;

    let subtotal = area
        .checked_mul(Decimal::from(request.unit_price_per_m2))
        .ok_or(EstimateError::Overflow)?;

    let tier = tiers.tier_for(area);

    let discount = tier.map_or(Decimal::ZERO, |tier| tier.discount.clone() * subtotal);

    let subtotal = whole_pesos(subtotal)?;
    let discount = whole_pesos(discount)?;

    Ok(ProjectEstimate {
        area_m2: area.normalize(),
        sheets_needed: sheets_for(area)?,
        subtotal,
        discount_rate: tier.map(|tier| tier.discount.clone()),
        discount,
        total: subtotal.saturating_sub(discount),
    })
}

fn sheets_for(area_m2: Decimal) -> Result<u32, EstimateError> {
    let sheet_area = SHEET_WIDTH_M * SHEET_LENGTH_M;

    area_m2
        .checked_div(sheet_area)
        .map(|sheets| sheets.ceil())
        .and_then(|sheets| sheets.to_u32())
        .ok_or(EstimateError::Overflow)
}

fn whole_pesos(amount: Decimal) -> Result<u64, EstimateError> {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(EstimateError::Overflow)
}
