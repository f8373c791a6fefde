//! Sejuk
//!
//! Sejuk is the cart, pricing and booking-submission core of an
//! air-conditioning service storefront: a persisted, change-notifying cart
//! store, a pure pricing calculator (PPN 11%), an order-summary renderer and
//! a checkout bridge that turns cart items plus customer details into a
//! booking submission.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod storage;
pub mod summary;
