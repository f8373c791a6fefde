//! Sejuk prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartStore, SubscriberKey, view::CartView},
    catalog::{EmergencyService, Service, ServiceSource, ServiceSourceError, emergency_service},
    checkout::{
        BookingBackend, BookingError, BookingId, BookingRequest, BookingService, CheckoutError,
        CustomerDetails, submit_booking,
    },
    items::{ItemCandidate, LineItem},
    pricing::{Totals, price, price_with_rate, tax_rate},
    storage::{CartStorage, JsonCartStorage, SharedMemoryStorage, StorageError},
    summary::{format_idr, write_summary},
};
