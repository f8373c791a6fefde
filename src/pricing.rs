//! Pricing

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};

use crate::items::LineItem;

/// Canonical tax rate applied in the booking flow (PPN 11%).
///
/// The storefront historically showed 10% on one order-summary surface; that
/// was an unsynchronized constant, not a two-tier rate. All derived totals use
/// this rate unless a caller explicitly overrides it via [`price_with_rate`].
#[must_use]
pub fn tax_rate() -> Percentage {
    Percentage::from(0.11)
}

/// Derived totals for a cart; never stored, recomputed on every query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Totals {
    /// Sum of unit price times quantity over all items, in whole rupiah.
    pub subtotal: i64,

    /// Tax rounded half-up to the nearest rupiah.
    pub tax: i64,

    /// Subtotal plus tax.
    pub total: i64,
}

impl Totals {
    /// All-zero totals for an empty cart.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            subtotal: 0,
            tax: 0,
            total: 0,
        }
    }
}

/// Calculate subtotal, tax and total for the given items at the canonical rate.
#[must_use]
pub fn price(items: &[LineItem]) -> Totals {
    price_with_rate(items, tax_rate())
}

/// Calculate totals at an explicit tax rate.
///
/// Tax is rounded half-up to the nearest whole rupiah. An empty item list
/// yields all zeros.
#[must_use]
pub fn price_with_rate(items: &[LineItem], rate: Percentage) -> Totals {
    let subtotal: i64 = items.iter().map(LineItem::line_total).sum();

    let subtotal_dec = Decimal::from_i64(subtotal).unwrap_or(Decimal::ZERO);

    let tax = (rate * subtotal_dec)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0);

    Totals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}
