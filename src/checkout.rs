//! Checkout bridge

use jiff::civil::{Date, Time};
use serde::Serialize;
use thiserror::Error;

use crate::{cart::CartStore, items::LineItem, storage::CartStorage};

/// Opaque identifier returned by the booking collaborator on success.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingId(String);

impl BookingId {
    /// Wrap an identifier issued by the booking backend.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Customer and scheduling fields collected by the external booking form.
///
/// Field validation is the form's responsibility; the bridge assumes all
/// required fields are present and well-formed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerDetails {
    /// Customer name.
    pub name: String,

    /// Contact phone number.
    pub phone: String,

    /// Optional contact email.
    pub email: Option<String>,

    /// Service address.
    pub address: String,

    /// Residence type (house, apartment, office, ...).
    pub residence_type: String,

    /// AC type (split, window, cassette, ...).
    pub ac_type: String,

    /// AC capacity, e.g. "1 PK".
    pub ac_size: String,

    /// Desired service date.
    pub service_date: Date,

    /// Desired service time slot.
    pub service_time: Time,

    /// Issues the customer already knows about.
    pub known_issues: Option<String>,
}

/// One service line in the submission payload, taken verbatim from the cart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BookingService {
    /// Service id.
    pub id: String,

    /// Captured display name.
    pub name: String,

    /// Captured unit price in whole rupiah; never re-priced at checkout.
    pub price: i64,

    /// Booked quantity.
    pub quantity: u32,
}

impl From<&LineItem> for BookingService {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.unit_price,
            quantity: item.quantity,
        }
    }
}

/// The booking-submission payload sent to the external collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// Customer name.
    pub name: String,

    /// Contact phone number.
    pub phone: String,

    /// Optional contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Service address.
    pub address: String,

    /// Residence type.
    pub residence_type: String,

    /// AC type.
    pub ac_type: String,

    /// AC capacity.
    pub ac_size: String,

    /// ISO calendar date, `YYYY-MM-DD`.
    pub service_date: String,

    /// 24-hour time, `HH:MM`.
    pub service_time: String,

    /// Known issues; empty string when the customer reported none.
    pub known_issues: String,

    /// Cart line items, verbatim.
    pub services: Vec<BookingService>,
}

impl BookingRequest {
    /// Assemble a payload from customer details and the cart's current items.
    #[must_use]
    pub fn assemble(customer: &CustomerDetails, items: &[LineItem]) -> Self {
        Self {
            name: customer.name.clone(),
            phone: customer.phone.clone(),
            email: customer.email.clone(),
            address: customer.address.clone(),
            residence_type: customer.residence_type.clone(),
            ac_type: customer.ac_type.clone(),
            ac_size: customer.ac_size.clone(),
            service_date: customer.service_date.strftime("%Y-%m-%d").to_string(),
            service_time: customer.service_time.strftime("%H:%M").to_string(),
            known_issues: customer.known_issues.clone().unwrap_or_default(),
            services: items.iter().map(BookingService::from).collect(),
        }
    }
}

/// Failure reported by the booking collaborator.
///
/// Network, validation and backend errors are all treated uniformly as
/// "submission failed, retry available".
#[derive(Debug, Error)]
#[error("booking submission failed: {reason}")]
pub struct BookingError {
    reason: String,
}

impl BookingError {
    /// Wrap a backend-specific failure description.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The checkout bridge's sole network dependency.
pub trait BookingBackend {
    /// Create a booking from the assembled payload.
    ///
    /// # Errors
    ///
    /// Returns a [`BookingError`] on any network, validation or backend
    /// failure.
    fn create_booking(&self, request: &BookingRequest) -> Result<BookingId, BookingError>;
}

/// Errors surfaced to the checkout caller.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The submission failed; the cart is unchanged and a retry is possible
    /// without re-adding items.
    #[error("submission failed; cart preserved for retry")]
    Submission(#[source] BookingError),
}

impl CheckoutError {
    /// Whether the caller may retry the submission as-is.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            CheckoutError::Submission(_) => true,
        }
    }
}

/// Submit the cart as a booking.
///
/// Reads the canonical items, assembles the payload and invokes the booking
/// collaborator. A successful checkout always empties the cart; a failed one
/// performs no cart mutation so the user can retry.
///
/// # Errors
///
/// Returns [`CheckoutError::Submission`] if the booking call fails.
pub fn submit_booking<S: CartStorage>(
    store: &mut CartStore<S>,
    backend: &impl BookingBackend,
    customer: &CustomerDetails,
) -> Result<BookingId, CheckoutError> {
    let request = BookingRequest::assemble(customer, &store.items());

    let booking_id = backend
        .create_booking(&request)
        .map_err(CheckoutError::Submission)?;

    store.clear();

    Ok(booking_id)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use jiff::civil::{date, time};
    use testresult::TestResult;

    use crate::{items::ItemCandidate, storage::SharedMemoryStorage};

    use super::*;

    fn customer() -> CustomerDetails {
        CustomerDetails {
            name: "Budi Santoso".to_string(),
            phone: "+62 812 3456 7890".to_string(),
            email: None,
            address: "Jl. Merdeka No. 45, Jakarta".to_string(),
            residence_type: "apartment".to_string(),
            ac_type: "split".to_string(),
            ac_size: "1 PK".to_string(),
            service_date: date(2025, 7, 9),
            service_time: time(9, 30, 0, 0),
            known_issues: Some("AC tidak dingin".to_string()),
        }
    }

    fn filled_store() -> CartStore<SharedMemoryStorage> {
        let mut store = CartStore::open(SharedMemoryStorage::new());

        store.add_item(ItemCandidate::new("1", "Cuci AC 0.5 - 2 PK", 70_000));
        store.add_item(ItemCandidate::new("2", "Tambah Freon R22 0,5 - 1 PK", 175_000));

        store
    }

    /// Records the last request and answers with a fixed outcome.
    struct StubBackend {
        outcome: Result<BookingId, String>,
        last_request: RefCell<Option<BookingRequest>>,
    }

    impl StubBackend {
        fn succeeding(id: &str) -> Self {
            Self {
                outcome: Ok(BookingId::new(id)),
                last_request: RefCell::new(None),
            }
        }

        fn failing(reason: &str) -> Self {
            Self {
                outcome: Err(reason.to_string()),
                last_request: RefCell::new(None),
            }
        }
    }

    impl BookingBackend for StubBackend {
        fn create_booking(&self, request: &BookingRequest) -> Result<BookingId, BookingError> {
            *self.last_request.borrow_mut() = Some(request.clone());

            self.outcome
                .clone()
                .map_err(BookingError::new)
        }
    }

    #[test]
    fn payload_formats_date_and_time() {
        let request = BookingRequest::assemble(&customer(), &[]);

        assert_eq!(request.service_date, "2025-07-09");
        assert_eq!(request.service_time, "09:30");
    }

    #[test]
    fn payload_takes_cart_items_verbatim() {
        let store = filled_store();
        let request = BookingRequest::assemble(&customer(), &store.items());

        assert_eq!(request.services.len(), 2);
        assert_eq!(
            request.services.first(),
            Some(&BookingService {
                id: "1".to_string(),
                name: "Cuci AC 0.5 - 2 PK".to_string(),
                price: 70_000,
                quantity: 1,
            })
        );
    }

    #[test]
    fn payload_serializes_with_camel_case_wire_names() -> TestResult {
        let request = BookingRequest::assemble(&customer(), &filled_store().items());
        let json = serde_json::to_value(&request)?;

        assert_eq!(json["residenceType"], "apartment");
        assert_eq!(json["serviceDate"], "2025-07-09");
        assert_eq!(json["serviceTime"], "09:30");
        assert_eq!(json["knownIssues"], "AC tidak dingin");
        assert_eq!(json["services"][0]["price"], 70_000);

        Ok(())
    }

    #[test]
    fn missing_known_issues_becomes_empty_string() {
        let mut details = customer();
        details.known_issues = None;

        let request = BookingRequest::assemble(&details, &[]);

        assert_eq!(request.known_issues, "");
    }

    #[test]
    fn successful_submission_clears_the_cart() -> TestResult {
        let mut store = filled_store();
        let backend = StubBackend::succeeding("booking-42");

        let booking_id = submit_booking(&mut store, &backend, &customer())?;

        assert_eq!(booking_id.as_str(), "booking-42");
        assert!(store.is_empty());

        Ok(())
    }

    #[test]
    fn failed_submission_leaves_the_cart_untouched() {
        let mut store = filled_store();
        let before = store.items();

        let backend = StubBackend::failing("network unreachable");
        let result = submit_booking(&mut store, &backend, &customer());

        let err = result.expect_err("submission should fail");
        assert!(err.is_retryable());
        assert_eq!(store.items(), before);
    }

    #[test]
    fn retry_after_failure_succeeds_without_re_adding_items() -> TestResult {
        let mut store = filled_store();

        let failing = StubBackend::failing("503");
        assert!(submit_booking(&mut store, &failing, &customer()).is_err());

        let succeeding = StubBackend::succeeding("booking-7");
        let booking_id = submit_booking(&mut store, &succeeding, &customer())?;

        assert_eq!(booking_id.to_string(), "booking-7");
        assert!(store.is_empty());

        // The retried request carried the preserved items.
        let request = succeeding
            .last_request
            .borrow()
            .clone()
            .expect("request should be recorded");
        assert_eq!(request.services.len(), 2);

        Ok(())
    }
}
