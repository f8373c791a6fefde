//! Cart views

use std::{cell::RefCell, rc::Rc};

use crate::{
    cart::{CartStore, SubscriberKey},
    items::LineItem,
    pricing::{self, Totals},
    storage::CartStorage,
};

/// A read-only reactive mirror of the cart for one mounted consumer.
///
/// A view seeds itself from the store's current snapshot at mount time and
/// replaces its mirror wholesale on every change notification; it never holds
/// authoritative state. Any number of simultaneously mounted views converge
/// to identical item lists after each mutation.
#[derive(Debug)]
pub struct CartView {
    mirror: Rc<RefCell<Vec<LineItem>>>,
    key: SubscriberKey,
}

impl CartView {
    /// Mount a view on the store: seed the mirror and subscribe to changes.
    pub fn mount<S: CartStorage>(store: &mut CartStore<S>) -> Self {
        let mirror = Rc::new(RefCell::new(store.items()));

        let writer = Rc::clone(&mirror);
        let key = store.subscribe(move |items| {
            // The notification payload is authoritative; no merging.
            *writer.borrow_mut() = items.to_vec();
        });

        Self { mirror, key }
    }

    /// Unmount the view, detaching its subscription from the store.
    pub fn unmount<S: CartStorage>(self, store: &mut CartStore<S>) {
        store.unsubscribe(self.key);
    }

    /// The mirrored items, in display order.
    #[must_use]
    pub fn items(&self) -> Vec<LineItem> {
        self.mirror.borrow().clone()
    }

    /// Number of distinct line items in the mirror.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mirror.borrow().len()
    }

    /// Whether the mirrored cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mirror.borrow().is_empty()
    }

    /// Total unit count across all lines, as shown on the cart badge.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.mirror
            .borrow()
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum()
    }

    /// Derived totals for the mirrored items, recomputed on every call.
    #[must_use]
    pub fn totals(&self) -> Totals {
        pricing::price(&self.mirror.borrow())
    }
}

#[cfg(test)]
mod tests {
    use crate::{items::ItemCandidate, storage::SharedMemoryStorage};

    use super::*;

    fn open_empty() -> CartStore<SharedMemoryStorage> {
        CartStore::open(SharedMemoryStorage::new())
    }

    #[test]
    fn view_seeds_from_the_current_snapshot() {
        let mut store = open_empty();
        store.add_item(ItemCandidate::new("1", "Cuci AC 0.5 - 2 PK", 70_000));

        let view = CartView::mount(&mut store);

        assert_eq!(view.len(), 1);
        assert_eq!(view.items(), store.items());
    }

    #[test]
    fn two_views_converge_after_mutations() {
        let mut store = open_empty();

        let panel = CartView::mount(&mut store);
        let page = CartView::mount(&mut store);

        store.add_item(ItemCandidate::new("1", "Cuci AC 0.5 - 2 PK", 70_000));
        store.add_item(ItemCandidate::new("2", "Tambah Freon R22 0,5 - 1 PK", 175_000));
        store.change_quantity_by("1", 1);
        store.remove_item("2");

        assert_eq!(panel.items(), page.items());
        assert_eq!(panel.items(), store.items());
    }

    #[test]
    fn unmounted_view_keeps_its_last_mirror() {
        let mut store = open_empty();
        store.add_item(ItemCandidate::new("1", "Cuci AC 0.5 - 2 PK", 70_000));

        let panel = CartView::mount(&mut store);
        let detached = CartView::mount(&mut store);
        let frozen = detached.items();

        // Move the subscription out, then mutate.
        let mirror = Rc::clone(&detached.mirror);
        detached.unmount(&mut store);
        store.add_item(ItemCandidate::new("2", "Tambah Freon R22 0,5 - 1 PK", 175_000));

        assert_eq!(*mirror.borrow(), frozen);
        assert_eq!(panel.len(), 2);
    }

    #[test]
    fn unit_count_sums_quantities_for_the_badge() {
        let mut store = open_empty();
        let view = CartView::mount(&mut store);

        store.add_item(ItemCandidate::new("1", "Cuci AC 0.5 - 2 PK", 70_000));
        store.change_quantity_by("1", 2);
        store.add_emergency_service("e4");

        assert_eq!(view.unit_count(), 4);
    }

    #[test]
    fn view_totals_match_store_totals() {
        let mut store = open_empty();
        let view = CartView::mount(&mut store);

        store.add_item(ItemCandidate::new("1", "Cuci AC 0.5 - 2 PK", 70_000));
        store.add_item(ItemCandidate::new("2", "Tambah Freon R22 0,5 - 1 PK", 175_000));

        assert_eq!(view.totals(), store.totals());
        assert_eq!(view.totals().total, 271_950);
    }
}
