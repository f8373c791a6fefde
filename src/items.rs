//! Line items

use serde::{Deserialize, Serialize};

/// One entry in the cart: a chosen service and its quantity.
///
/// The name and unit price are captured when the item is first added and are
/// never refreshed from the catalog, so a long-idle cart checks out at the
/// price the customer originally saw.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Stable identifier of the underlying service; unique within a cart.
    pub id: String,

    /// Display label, captured at add time.
    pub name: String,

    /// Price per unit in whole rupiah, captured at add time.
    #[serde(rename = "price")]
    pub unit_price: i64,

    /// Number of units; always at least 1.
    pub quantity: u32,

    /// Optional display-grouping tag, e.g. `"emergency"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl LineItem {
    /// Total for this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}

/// A service selection about to enter the cart, before a quantity is assigned.
///
/// If the id is already present in the cart, the candidate's price and name
/// are ignored and the captured values prevail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemCandidate {
    /// Stable identifier of the underlying service.
    pub id: String,

    /// Display label.
    pub name: String,

    /// Price per unit in whole rupiah.
    pub unit_price: i64,

    /// Optional display-grouping tag.
    pub category: Option<String>,
}

impl ItemCandidate {
    /// Create a candidate with no category.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit_price: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            category: None,
        }
    }

    /// Set the display-grouping category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Turn the candidate into a line item with quantity 1.
    #[must_use]
    pub fn into_line_item(self) -> LineItem {
        LineItem {
            id: self.id,
            name: self.name,
            unit_price: self.unit_price,
            quantity: 1,
            category: self.category,
        }
    }
}
