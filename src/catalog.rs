//! Service catalog

use std::sync::LazyLock;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

/// A bookable service as returned by the external catalog collaborator.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Service {
    /// Stable service identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Price per unit in whole rupiah.
    pub price: i64,

    /// Category used for grouping and filtering.
    #[serde(default)]
    pub category: Option<String>,

    /// Longer marketing description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Errors raised by a [`ServiceSource`] implementation.
#[derive(Debug, Error)]
#[error("failed to fetch service catalog: {reason}")]
pub struct ServiceSourceError {
    reason: String,
}

impl ServiceSourceError {
    /// Wrap a backend-specific failure description.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// External read interface feeding the catalog view that originates
/// [`add_item`](crate::cart::CartStore::add_item) calls.
pub trait ServiceSource {
    /// Fetch the current service catalog, ordered by category.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceSourceError`] if the backing service is unreachable.
    fn services(&self) -> Result<Vec<Service>, ServiceSourceError>;
}

/// An emergency or add-on service offered while the technician is on site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmergencyService {
    /// Stable identifier, also used as the cart line-item id.
    pub id: &'static str,

    /// Display name.
    pub name: &'static str,

    /// Price in whole rupiah.
    pub price: i64,
}

static EMERGENCY_SERVICES: [EmergencyService; 4] = [
    EmergencyService {
        id: "e1",
        name: "Perbaikan Darurat",
        price: 150_000,
    },
    EmergencyService {
        id: "e2",
        name: "Penggantian Komponen",
        price: 250_000,
    },
    EmergencyService {
        id: "e3",
        name: "Konsultasi Teknis",
        price: 100_000,
    },
    EmergencyService {
        id: "e4",
        name: "Pengecekan Sistem",
        price: 75_000,
    },
];

static EMERGENCY_INDEX: LazyLock<FxHashMap<&'static str, &'static EmergencyService>> =
    LazyLock::new(|| {
        EMERGENCY_SERVICES
            .iter()
            .map(|service| (service.id, service))
            .collect()
    });

/// Resolve an emergency-service id against the static table.
///
/// Returns `None` for unknown ids; callers treat that as a silent no-op
/// rather than a user-facing error.
#[must_use]
pub fn emergency_service(id: &str) -> Option<&'static EmergencyService> {
    EMERGENCY_INDEX.get(id).copied()
}

/// All emergency/add-on services, in display order.
#[must_use]
pub fn emergency_services() -> &'static [EmergencyService] {
    &EMERGENCY_SERVICES
}
