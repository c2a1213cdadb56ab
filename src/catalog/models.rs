//! Catalog Models
//! Mission: Product data structures and required-field validation

use serde::{Deserialize, Serialize};

/// A catalog product. Ids are assigned by the store on insert and are
/// immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Incoming product body for insert and update (id never accepted from
/// the client).
///
/// Missing string fields deserialize as empty and are caught by
/// validation. `price` is intentionally not validated - the reference
/// contract never required it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProductDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl ProductDraft {
    /// Names of required fields that are absent or empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if self.category.trim().is_empty() {
            missing.push("category");
        }
        if self.image.trim().is_empty() {
            missing.push("image");
        }
        missing
    }
}
