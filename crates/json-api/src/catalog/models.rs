//! Catalog Models

use alero::{pricing::to_money, search::SearchEntry};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// Record id
    pub id: String,

    /// Product code (SKU)
    pub code: String,

    /// Product name
    pub name: String,

    /// Category label
    pub category: String,

    /// Thickness label, e.g. `6mm`
    pub thickness: String,

    /// Colour label
    pub color: String,

    /// Price in CLP, tax included
    pub price: u64,

    /// Formatted price
    pub price_display: String,

    /// Groups variants of the same product
    pub group_id: String,

    /// Image URL
    pub image: Option<String>,
}

impl From<SearchEntry> for ProductResponse {
    fn from(entry: SearchEntry) -> Self {
        Self {
            price_display: to_money(entry.price).to_string(),
            id: entry.id,
            code: entry.code,
            name: entry.name,
            category: entry.category,
            thickness: entry.thickness,
            color: entry.color,
            price: entry.price,
            group_id: entry.group_id,
            image: entry.image,
        }
    }
}

#[cfg(test)]
pub(crate) fn make_entry(id: &str, name: &str, category: &str) -> SearchEntry {
    SearchEntry {
        id: id.to_string(),
        code: id.to_uppercase(),
        name: name.to_string(),
        category: category.to_string(),
        thickness: "6mm".to_string(),
        color: "Cristal".to_string(),
        price: 45_990,
        group_id: id.to_string(),
        image: None,
    }
}
