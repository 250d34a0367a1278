//! Catalog payloads
//!
//! The product backend exposes two shapes: a listing grouped by category (used for the
//! featured products section) and a flat public product list. Both are loosely typed, so
//! every field is optional here and normalised into [`SearchEntry`] records.

use std::{collections::BTreeMap, fmt, str::FromStr};

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use serde::Deserialize;

use crate::search::{SearchEntry, SearchIndex};

/// A scalar that the backend sends as either a number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    /// Integer value
    Integer(i64),

    /// Floating point value
    Float(f64),

    /// Text value
    Text(String),
}

impl RawScalar {
    /// Value as trimmed text.
    pub fn as_text(&self) -> String {
        match self {
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Text(value) => value.trim().to_string(),
        }
    }

    /// Value as whole pesos, rounding half away from zero. Negative or unparseable
    /// values yield `None`.
    pub fn as_pesos(&self) -> Option<u64> {
        let decimal = match self {
            Self::Integer(value) => Decimal::from(*value),
            Self::Float(value) => Decimal::from_f64(*value)?,
            Self::Text(value) => parse_peso_text(value)?,
        };

        decimal
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
    }
}

impl fmt::Display for RawScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// A product as sent by either backend endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawProduct {
    /// Backend id
    #[serde(default)]
    pub id: Option<RawScalar>,

    /// Product code
    #[serde(default)]
    pub codigo: Option<RawScalar>,

    /// Product name
    #[serde(default)]
    pub nombre: Option<String>,

    /// Category label
    #[serde(default)]
    pub categoria: Option<String>,

    /// Product type; stands in for the category on the public endpoint
    #[serde(default)]
    pub tipo: Option<String>,

    /// Thickness
    #[serde(default)]
    pub espesor: Option<RawScalar>,

    /// Colour
    #[serde(default)]
    pub color: Option<String>,

    /// Price including VAT
    #[serde(default)]
    pub precio_con_iva: Option<RawScalar>,

    /// Price, when the VAT-inclusive field is absent
    #[serde(default)]
    pub precio: Option<RawScalar>,

    /// Image path
    #[serde(default)]
    pub ruta_imagen: Option<String>,

    /// Image URL
    #[serde(default)]
    pub imagen: Option<String>,
}

impl RawProduct {
    /// Normalise into a search entry. Products without a name are skipped.
    pub fn to_entry(&self, fallback_category: Option<&str>) -> Option<SearchEntry> {
        let name = self.nombre.as_deref().map(str::trim).filter(|name| !name.is_empty())?;

        let code = self.codigo.as_ref().map(RawScalar::as_text).unwrap_or_default();
        let id = self
            .id
            .as_ref()
            .map(RawScalar::as_text)
            .unwrap_or_else(|| code.clone());

        let category = first_present([
            self.categoria.as_deref(),
            self.tipo.as_deref(),
            fallback_category,
        ]);

        let price = self
            .precio_con_iva
            .as_ref()
            .or(self.precio.as_ref())
            .and_then(RawScalar::as_pesos)
            .unwrap_or(0);

        let image = first_present([self.ruta_imagen.as_deref(), self.imagen.as_deref()]);

        Some(SearchEntry {
            id,
            code,
            name: name.to_string(),
            category,
            thickness: self.espesor.as_ref().map(RawScalar::as_text).unwrap_or_default(),
            color: self.color.as_deref().map(str::trim).unwrap_or_default().to_string(),
            price,
            group_id: slug(name),
            image: Some(image).filter(|image| !image.is_empty()),
        })
    }
}

/// Response of the category listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogListing {
    /// Backend success flag; an unsuccessful listing is treated as empty
    #[serde(default)]
    pub success: bool,

    /// Listing payload
    #[serde(default)]
    pub data: Option<ListingData>,
}

/// Listing payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingData {
    /// Products keyed by category label
    #[serde(default)]
    pub productos_por_categoria: BTreeMap<String, Vec<RawProduct>>,
}

impl CatalogListing {
    /// Products per category, or nothing when the backend reported failure.
    fn categories(&self) -> impl Iterator<Item = (&String, &Vec<RawProduct>)> {
        self.data
            .as_ref()
            .filter(|_| self.success)
            .into_iter()
            .flat_map(|data| data.productos_por_categoria.iter())
    }

    /// Flat entries across categories; the category key fills in missing labels.
    pub fn entries(&self) -> Vec<SearchEntry> {
        self.categories()
            .flat_map(|(category, products)| {
                products
                    .iter()
                    .filter_map(move |product| product.to_entry(Some(category.as_str())))
            })
            .collect()
    }

    /// First product of each category (categories in label order), up to `limit`.
    pub fn featured(&self, limit: usize) -> Vec<SearchEntry> {
        self.categories()
            .filter_map(|(category, products)| {
                products
                    .iter()
                    .find_map(|product| product.to_entry(Some(category.as_str())))
            })
            .take(limit)
            .collect()
    }
}

/// Response of the public products endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicProducts {
    /// Products
    #[serde(default)]
    pub productos: Vec<RawProduct>,
}

impl PublicProducts {
    /// Normalised entries in response order.
    pub fn entries(&self) -> Vec<SearchEntry> {
        self.productos
            .iter()
            .filter_map(|product| product.to_entry(None))
            .collect()
    }

    /// Build a search index from the response.
    pub fn into_index(self) -> SearchIndex {
        SearchIndex::new(self.entries())
    }
}

/// Lowercase, hyphen-separated form of a product name.
pub fn slug(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn first_present<const N: usize>(candidates: [Option<&str>; N]) -> String {
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Parse `$12.990`, `12990`, `12990.5` or `12.990,5`.
fn parse_peso_text(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '$')
        .collect();

    let normalised = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else if is_thousands_grouped(&cleaned) {
        cleaned.replace('.', "")
    } else {
        cleaned
    };

    Decimal::from_str(&normalised).ok()
}

fn is_thousands_grouped(text: &str) -> bool {
    let mut groups = text.split('.');
    let head = groups.next().unwrap_or_default();
    let tail: Vec<&str> = groups.collect();

    !tail.is_empty()
        && (1..=3).contains(&head.len())
        && tail
            .iter()
            .all(|group| group.len() == 3 && group.chars().all(|c| c.is_ascii_digit()))
}
