//! Carts service.

use std::{sync::Arc, time::Duration};

use alero::cart::{CartLine, LineId, NewLine};
use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::carts::{
    errors::CartsServiceError,
    records::{CartUuid, SessionCart},
};

/// Session carts held in process memory.
///
/// With an idle TTL set, carts untouched for longer than the TTL are treated as gone and
/// are swept from memory whenever a new cart is created.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCartsService {
    carts: Arc<RwLock<FxHashMap<CartUuid, SessionCart>>>,
    idle_ttl: Option<Duration>,
}

impl InMemoryCartsService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Expire carts that have not changed for `ttl`.
    #[must_use]
    pub fn with_idle_ttl(mut self, ttl: Duration) -> Self {
        self.idle_ttl = Some(ttl);
        self
    }

    fn is_stale(&self, session: &SessionCart, now: Timestamp) -> bool {
        self.idle_ttl
            .and_then(|ttl| now.checked_sub(ttl).ok())
            .is_some_and(|cutoff| session.updated_at < cutoff)
    }

    fn evict_stale(&self, carts: &mut FxHashMap<CartUuid, SessionCart>, now: Timestamp) {
        let before = carts.len();

        carts.retain(|_, session| !self.is_stale(session, now));

        let evicted = before.saturating_sub(carts.len());

        if evicted > 0 {
            debug!(evicted, "evicted idle carts");
        }
    }

    async fn modify<T>(
        &self,
        uuid: CartUuid,
        change: impl FnOnce(&mut SessionCart, Timestamp) -> Result<T, CartsServiceError> + Send,
    ) -> Result<T, CartsServiceError> {
        let mut carts = self.carts.write().await;
        let now = Timestamp::now();

        if carts
            .get(&uuid)
            .is_some_and(|session| self.is_stale(session, now))
        {
            carts.remove(&uuid);
        }

        let session = carts.get_mut(&uuid).ok_or(CartsServiceError::NotFound)?;
        let result = change(session, now)?;

        session.touch(now);

        Ok(result)
    }
}

#[async_trait]
impl CartsService for InMemoryCartsService {
    async fn create_cart(&self, uuid: CartUuid) -> Result<SessionCart, CartsServiceError> {
        let mut carts = self.carts.write().await;
        let now = Timestamp::now();

        self.evict_stale(&mut carts, now);

        if carts.contains_key(&uuid) {
            return Err(CartsServiceError::AlreadyExists);
        }

        let session = SessionCart::new(uuid, now);

        carts.insert(uuid, session.clone());

        debug!(cart = %uuid, "created cart");

        Ok(session)
    }

    async fn get_cart(&self, uuid: CartUuid) -> Result<SessionCart, CartsServiceError> {
        let now = Timestamp::now();

        self.carts
            .read()
            .await
            .get(&uuid)
            .filter(|session| !self.is_stale(session, now))
            .cloned()
            .ok_or(CartsServiceError::NotFound)
    }

    async fn delete_cart(&self, uuid: CartUuid) -> Result<(), CartsServiceError> {
        let now = Timestamp::now();

        self.carts
            .write()
            .await
            .remove(&uuid)
            .filter(|session| !self.is_stale(session, now))
            .map(|_| debug!(cart = %uuid, "deleted cart"))
            .ok_or(CartsServiceError::NotFound)
    }

    async fn add_item(&self, cart: CartUuid, line: NewLine) -> Result<CartLine, CartsServiceError> {
        self.modify(cart, |session, now| {
            let id = session.cart.add_item(line, now);

            session
                .cart
                .get(&id)
                .cloned()
                .ok_or(CartsServiceError::LineNotFound)
        })
        .await
    }

    async fn remove_item(
        &self,
        cart: CartUuid,
        line: LineId,
    ) -> Result<SessionCart, CartsServiceError> {
        self.modify(cart, |session, _now| {
            session
                .cart
                .remove_item(&line)
                .ok_or(CartsServiceError::LineNotFound)?;

            Ok(session.clone())
        })
        .await
    }

    async fn update_quantity(
        &self,
        cart: CartUuid,
        line: LineId,
        quantity: i64,
    ) -> Result<CartLine, CartsServiceError> {
        self.modify(cart, |session, _now| {
            session
                .cart
                .update_quantity(&line, quantity)
                .cloned()
                .ok_or(CartsServiceError::LineNotFound)
        })
        .await
    }

    async fn clear_cart(&self, cart: CartUuid) -> Result<SessionCart, CartsServiceError> {
        self.modify(cart, |session, _now| {
            session.cart.clear_cart();

            Ok(session.clone())
        })
        .await
    }

    async fn toggle_cart(&self, cart: CartUuid) -> Result<bool, CartsServiceError> {
        self.modify(cart, |session, _now| Ok(session.cart.toggle_cart()))
            .await
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Create an empty, closed cart.
    async fn create_cart(&self, uuid: CartUuid) -> Result<SessionCart, CartsServiceError>;

    /// Retrieve a cart.
    async fn get_cart(&self, uuid: CartUuid) -> Result<SessionCart, CartsServiceError>;

    /// Delete a cart.
    async fn delete_cart(&self, uuid: CartUuid) -> Result<(), CartsServiceError>;

    /// Append a line to a cart.
    async fn add_item(&self, cart: CartUuid, line: NewLine) -> Result<CartLine, CartsServiceError>;

    /// Remove a line from a cart.
    async fn remove_item(
        &self,
        cart: CartUuid,
        line: LineId,
    ) -> Result<SessionCart, CartsServiceError>;

    /// Set a line's quantity; values below 1 are clamped to 1.
    async fn update_quantity(
        &self,
        cart: CartUuid,
        line: LineId,
        quantity: i64,
    ) -> Result<CartLine, CartsServiceError>;

    /// Remove every line from a cart.
    async fn clear_cart(&self, cart: CartUuid) -> Result<SessionCart, CartsServiceError>;

    /// Flip the cart panel open/closed, returning the new state.
    async fn toggle_cart(&self, cart: CartUuid) -> Result<bool, CartsServiceError>;
}
