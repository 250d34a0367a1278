//! Cart lines

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::pricing::line_total;

/// What a cart line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    /// A catalogue product
    #[serde(rename = "producto")]
    Product,

    /// Dispatch coordination service
    #[serde(rename = "coordinacion")]
    Coordination,

    /// Any other billable service (cutting, installation)
    #[serde(rename = "servicio")]
    Service,
}

/// Identifier of a line, unique within its cart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(String);

impl LineId {
    /// Build the id for a product variant added at `at`: `{product}-{variant}-{millis}`.
    pub fn generate(product_id: &str, variant_id: Option<&str>, at: Timestamp) -> Self {
        Self(format!(
            "{product_id}-{}-{}",
            variant_id.unwrap_or("0"),
            at.as_millisecond()
        ))
    }

    /// Borrow the id as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for LineId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for LineId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Line data supplied by an "add to cart" action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLine {
    /// Catalogue product id (or service code)
    pub product_id: String,

    /// Variant id, e.g. thickness/colour combination
    pub variant_id: Option<String>,

    /// Line kind
    pub kind: LineKind,

    /// Display name
    pub name: String,

    /// Display description
    pub description: String,

    /// Image URL
    pub image: Option<String>,

    /// Free-text attributes such as `Espesor: 6mm`
    pub specifications: Vec<String>,

    /// Category label used for dispatch scheduling
    pub category: Option<String>,

    /// Requested quantity; clamped to at least 1
    pub quantity: u32,

    /// Unit price in CLP
    pub unit_price: u64,
}

/// A single line in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Line id
    pub id: LineId,

    /// Catalogue product id
    pub product_id: String,

    /// Line kind
    pub kind: LineKind,

    /// Display name
    pub name: String,

    /// Display description
    pub description: String,

    /// Image URL
    pub image: Option<String>,

    /// Free-text attributes
    pub specifications: Vec<String>,

    /// Category label used for dispatch scheduling
    pub category: Option<String>,

    /// Quantity, always at least 1
    pub quantity: u32,

    /// Unit price in CLP
    pub unit_price: u64,

    /// `unit_price × quantity`, kept in step by every mutation
    pub total: u64,
}

impl CartLine {
    pub(crate) fn new(id: LineId, line: NewLine) -> Self {
        let quantity = line.quantity.max(1);

        Self {
            id,
            product_id: line.product_id,
            kind: line.kind,
            name: line.name,
            description: line.description,
            image: line.image,
            specifications: line.specifications,
            category: line.category,
            quantity,
            unit_price: line.unit_price,
            total: line_total(line.unit_price, quantity),
        }
    }

    pub(crate) fn set_quantity(&mut self, quantity: i64) {
        self.quantity = u32::try_from(quantity.max(1)).unwrap_or(u32::MAX);
        self.total = line_total(self.unit_price, self.quantity);
    }
}
