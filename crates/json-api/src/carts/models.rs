//! Cart Models

use alero::cart::{CartLine, LineKind};
use alero_app::domain::carts::records::SessionCart;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// Cart lines, in the order they were added
    pub lines: Vec<CartLineResponse>,

    /// Whether the cart panel is open
    pub is_open: bool,

    /// Sum of line totals in CLP
    pub total: u64,

    /// Formatted total
    pub total_display: String,

    /// Sum of line quantities
    pub item_count: u64,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl From<SessionCart> for CartResponse {
    fn from(session: SessionCart) -> Self {
        Self {
            uuid: session.uuid.into_uuid(),
            is_open: session.cart.is_open(),
            total: session.cart.total(),
            total_display: session.cart.total_money().to_string(),
            item_count: session.cart.item_count(),
            lines: session
                .cart
                .lines()
                .iter()
                .cloned()
                .map(CartLineResponse::from)
                .collect(),
            created_at: session.created_at.to_string(),
            updated_at: session.updated_at.to_string(),
        }
    }
}

/// What a cart line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) enum LineKindValue {
    /// A catalogue product
    #[serde(rename = "producto")]
    Product,

    /// Dispatch coordination
    #[serde(rename = "coordinacion")]
    Coordination,

    /// Cutting, installation and other services
    #[serde(rename = "servicio")]
    Service,
}

impl From<LineKind> for LineKindValue {
    fn from(kind: LineKind) -> Self {
        match kind {
            LineKind::Product => Self::Product,
            LineKind::Coordination => Self::Coordination,
            LineKind::Service => Self::Service,
        }
    }
}

impl From<LineKindValue> for LineKind {
    fn from(kind: LineKindValue) -> Self {
        match kind {
            LineKindValue::Product => Self::Product,
            LineKindValue::Coordination => Self::Coordination,
            LineKindValue::Service => Self::Service,
        }
    }
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// Line id, unique within the cart
    pub id: String,

    /// Catalogue product id
    pub product_id: String,

    /// Line kind
    pub kind: LineKindValue,

    /// Display name
    pub name: String,

    /// Display description
    pub description: String,

    /// Image URL
    pub image: Option<String>,

    /// Free-text attributes
    pub specifications: Vec<String>,

    /// Category label
    pub category: Option<String>,

    /// Quantity, at least 1
    pub quantity: u32,

    /// Unit price in CLP
    pub unit_price: u64,

    /// Unit price times quantity
    pub total: u64,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            id: line.id.to_string(),
            product_id: line.product_id,
            kind: line.kind.into(),
            name: line.name,
            description: line.description,
            image: line.image,
            specifications: line.specifications,
            category: line.category,
            quantity: line.quantity,
            unit_price: line.unit_price,
            total: line.total,
        }
    }
}
