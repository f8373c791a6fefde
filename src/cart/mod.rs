//! Cart store

use std::fmt;

use slotmap::{SlotMap, new_key_type};

use crate::{
    catalog,
    items::{ItemCandidate, LineItem},
    pricing::{self, Totals},
    storage::CartStorage,
};

pub mod view;

new_key_type! {
    /// Subscriber Key
    pub struct SubscriberKey;
}

type Subscriber = Box<dyn FnMut(&[LineItem])>;

/// The canonical, durable, change-notifying list of selected services.
///
/// One store is constructed per browsing session and is the sole writer of
/// the persisted state. Mounted views hold read-only mirrors refreshed
/// through [`subscribe`](CartStore::subscribe); they never own state.
///
/// None of the mutating operations raise user-visible errors: unknown ids are
/// silent no-ops, quantity decrements floor at 1, and persistence failures
/// are logged and swallowed so the in-memory cart stays usable.
///
/// No-op paths (unknown ids) skip the persist and notify side effects
/// entirely: nothing changed, so nothing is re-written or broadcast.
/// Subscribers can therefore treat every notification as a real change.
pub struct CartStore<S: CartStorage> {
    items: Vec<LineItem>,
    storage: S,
    subscribers: SlotMap<SubscriberKey, Subscriber>,
}

impl<S: CartStorage> CartStore<S> {
    /// Open the cart, loading the persisted snapshot.
    ///
    /// Malformed or unreadable persisted state is treated as "no saved cart":
    /// the store starts empty and logs a warning rather than propagating a
    /// parse failure.
    pub fn open(storage: S) -> Self {
        let items = match storage.load() {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(error = %err, "discarding unreadable cart state");
                Vec::new()
            }
        };

        Self {
            items,
            storage,
            subscribers: SlotMap::with_key(),
        }
    }

    /// Add a selected service to the cart.
    ///
    /// If the id is already present, its quantity is incremented by 1 and the
    /// candidate's price and name are ignored: the values captured when the
    /// item was first added prevail, even if the catalog price has since
    /// changed. Otherwise the candidate is appended with quantity 1.
    pub fn add_item(&mut self, candidate: ItemCandidate) {
        if let Some(existing) = self.items.iter_mut().find(|item| item.id == candidate.id) {
            existing.quantity += 1;
        } else {
            self.items.push(candidate.into_line_item());
        }

        self.commit();
    }

    /// Set an item's quantity, clamped to at least 1.
    ///
    /// Setting a quantity below 1 floors at 1 rather than removing the item;
    /// removal is a distinct explicit action. Unknown ids are silent no-ops
    /// that neither persist nor notify.
    pub fn update_quantity(&mut self, id: &str, quantity: u32) {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return;
        };

        item.quantity = quantity.max(1);

        self.commit();
    }

    /// Adjust an item's quantity by a signed delta, flooring at 1.
    ///
    /// This is the operation behind the +/- buttons; decrementing from 1 is a
    /// no-op floor, not a removal. Unknown ids are silent no-ops.
    pub fn change_quantity_by(&mut self, id: &str, delta: i32) {
        let Some(current) = self
            .items
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.quantity)
        else {
            return;
        };

        let next = (i64::from(current) + i64::from(delta)).max(1);
        let next = u32::try_from(next).unwrap_or(u32::MAX);

        self.update_quantity(id, next);
    }

    /// Remove an item entirely. Unknown ids are silent no-ops.
    pub fn remove_item(&mut self, id: &str) {
        let before = self.items.len();

        self.items.retain(|item| item.id != id);

        if self.items.len() != before {
            self.commit();
        }
    }

    /// Empty the cart and persist the empty state.
    pub fn clear(&mut self) {
        self.items.clear();
        self.commit();
    }

    /// Add an emergency/add-on service by its catalog id.
    ///
    /// Unknown ids are silently ignored. If the service is already in the
    /// cart its quantity is incremented; otherwise it is appended with
    /// `category = "emergency"`.
    pub fn add_emergency_service(&mut self, service_id: &str) {
        let Some(service) = catalog::emergency_service(service_id) else {
            return;
        };

        self.add_item(
            ItemCandidate::new(service.id, service.name, service.price)
                .with_category("emergency"),
        );
    }

    /// Snapshot of the current items, in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<LineItem> {
        self.items.clone()
    }

    /// Iterate over the items without cloning.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Derived subtotal, tax and total at the canonical rate.
    #[must_use]
    pub fn totals(&self) -> Totals {
        pricing::price(&self.items)
    }

    /// Register a change subscriber.
    ///
    /// The callback receives the full updated item list after every mutation;
    /// the payload is authoritative and mirrors should replace their state
    /// wholesale (last write wins).
    pub fn subscribe(&mut self, callback: impl FnMut(&[LineItem]) + 'static) -> SubscriberKey {
        self.subscribers.insert(Box::new(callback))
    }

    /// Remove a subscriber. Returns whether the key was registered.
    pub fn unsubscribe(&mut self, key: SubscriberKey) -> bool {
        self.subscribers.remove(key).is_some()
    }

    /// Persist the current state, then notify all subscribers.
    ///
    /// Save failures must not abort the mutation: the in-memory cart is
    /// already updated, so the failure is logged and views stay consistent
    /// with what the user sees.
    fn commit(&mut self) {
        if let Err(err) = self.storage.save(&self.items) {
            tracing::warn!(error = %err, "failed to persist cart");
        }

        let snapshot = &self.items;

        for subscriber in self.subscribers.values_mut() {
            subscriber(snapshot);
        }
    }
}

impl<S: CartStorage + fmt::Debug> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("storage", &self.storage)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
