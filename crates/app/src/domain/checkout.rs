//! Checkout orchestration: validate the buyer, schedule dispatch, hand off to payment.

use std::sync::Arc;

use alero::{
    checkout::{CheckoutError, CheckoutForm, FieldErrors, OrderSummary, dispatch_category},
    dispatch::{DispatchError, DispatchQuote},
};
use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use thiserror::Error;
use tracing::info;

use crate::{
    domain::{
        carts::{CartsService, CartsServiceError, records::CartUuid},
        dispatch::DispatchService,
    },
    payments::{PaymentError, PaymentGateway},
};

#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    #[error("invalid checkout form")]
    InvalidForm(FieldErrors),

    #[error("cart is empty")]
    EmptyCart,

    #[error(transparent)]
    Cart(#[from] CartsServiceError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Payment(#[from] PaymentError),
}

impl From<CheckoutError> for CheckoutServiceError {
    fn from(error: CheckoutError) -> Self {
        match error {
            CheckoutError::InvalidForm(errors) => Self::InvalidForm(errors),
            CheckoutError::EmptyCart => Self::EmptyCart,
        }
    }
}

/// Where to send the buyer, and when their order leaves the warehouse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRedirect {
    pub url: String,
    pub dispatch: DispatchQuote,
}

pub struct DefaultCheckoutService {
    carts: Arc<dyn CartsService>,
    dispatch: DispatchService,
    payments: Arc<dyn PaymentGateway>,
}

impl DefaultCheckoutService {
    #[must_use]
    pub fn new(
        carts: Arc<dyn CartsService>,
        dispatch: DispatchService,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            carts,
            dispatch,
            payments,
        }
    }
}

impl std::fmt::Debug for DefaultCheckoutService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultCheckoutService")
            .field("dispatch", &self.dispatch)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CheckoutService for DefaultCheckoutService {
    async fn checkout(
        &self,
        cart: CartUuid,
        form: CheckoutForm,
        at: Timestamp,
    ) -> Result<CheckoutRedirect, CheckoutServiceError> {
        form.validate().map_err(CheckoutServiceError::InvalidForm)?;

        let session = self.carts.get_cart(cart).await?;

        if session.cart.is_empty() {
            return Err(CheckoutServiceError::EmptyCart);
        }

        let dispatch = self
            .dispatch
            .quote(dispatch_category(&session.cart), at)?;

        let order = OrderSummary::from_cart(&session.cart, &form, dispatch.clone())?;
        let url = self.payments.create_redirect(order).await?;

        info!(
            cart = %cart,
            dispatch_date = %dispatch.date,
            rule = %dispatch.rule_key,
            "checkout redirected to payment"
        );

        Ok(CheckoutRedirect { url, dispatch })
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Turn a cart into a payment redirect.
    ///
    /// The cart is left untouched; it is cleared once payment completes.
    async fn checkout(
        &self,
        cart: CartUuid,
        form: CheckoutForm,
        at: Timestamp,
    ) -> Result<CheckoutRedirect, CheckoutServiceError>;
}
