//! Cart Records

use alero::cart::Cart;
use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Cart UUID
pub type CartUuid = TypedUuid<SessionCart>;

/// A shopper's cart together with its bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionCart {
    pub uuid: CartUuid,
    pub cart: Cart,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SessionCart {
    pub(crate) fn new(uuid: CartUuid, now: Timestamp) -> Self {
        Self {
            uuid,
            cart: Cart::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn touch(&mut self, now: Timestamp) {
        self.updated_at = now;
    }
}
