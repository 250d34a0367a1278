//! Alero prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLine, LineId, LineKind, NewLine},
    catalog::{CatalogListing, PublicProducts, RawProduct, RawScalar},
    checkout::{
        CheckoutError, CheckoutForm, FieldError, FieldErrors, OrderSummary, coordination_line,
        dispatch_category,
    },
    dispatch::{
        DispatchError, DispatchQuote, DispatchRule, DispatchRules, TimeWindow, WeekdaySet,
        format_dispatch_date, format_window,
    },
    estimates::{
        DiscountTier, DiscountTiers, EstimateError, ProjectEstimate, ProjectRequest, estimate,
    },
    pricing::{currency, line_total, to_money},
    search::{MAX_RESULTS, SearchEntry, SearchIndex},
};
