//! Durable cart storage

use std::{cell::RefCell, fs, io, path::PathBuf, rc::Rc};

use thiserror::Error;

use crate::items::LineItem;

/// Errors raised while loading or saving the persisted cart.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store could not be read or written.
    #[error("cart storage IO error")]
    Io(#[from] io::Error),

    /// The stored document exists but is not a valid cart.
    #[error("persisted cart is corrupt")]
    Corrupt(#[source] serde_json::Error),

    /// The item list could not be serialized.
    #[error("failed to serialize cart")]
    Serialize(#[source] serde_json::Error),
}

/// Durable storage for the canonical item list, keyed under one well-known
/// location per browsing context.
///
/// The cart store is the sole writer; load failures are downgraded there to
/// an empty cart and never surfaced to the user.
pub trait CartStorage {
    /// Load the persisted snapshot. An absent document is an empty cart.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the document cannot be read or parsed.
    fn load(&self) -> Result<Vec<LineItem>, StorageError>;

    /// Replace the persisted snapshot with the full updated item list.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the document cannot be serialized or written.
    fn save(&self, items: &[LineItem]) -> Result<(), StorageError>;
}

/// File-backed storage holding the item list as a single JSON document.
#[derive(Clone, Debug)]
pub struct JsonCartStorage {
    path: PathBuf,
}

impl JsonCartStorage {
    /// Storage rooted at the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing document.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl CartStorage for JsonCartStorage {
    fn load(&self) -> Result<Vec<LineItem>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StorageError::Io(err)),
        };

        serde_json::from_str(&contents).map_err(StorageError::Corrupt)
    }

    fn save(&self, items: &[LineItem]) -> Result<(), StorageError> {
        let document = serde_json::to_string(items).map_err(StorageError::Serialize)?;

        fs::write(&self.path, document)?;

        Ok(())
    }
}

/// In-memory storage sharing one document slot between clones.
///
/// Clones behave like independent readers of the same well-known key, which
/// makes this the storage of choice for tests and embedders without a
/// filesystem. Serialization still goes through JSON so round-trip behavior
/// matches [`JsonCartStorage`].
#[derive(Clone, Debug, Default)]
pub struct SharedMemoryStorage {
    slot: Rc<RefCell<Option<String>>>,
}

impl SharedMemoryStorage {
    /// Empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the raw stored document, bypassing serialization.
    ///
    /// Used to seed legacy payloads or corrupt state when exercising the
    /// store's recovery path.
    pub fn set_raw(&self, raw: impl Into<String>) {
        *self.slot.borrow_mut() = Some(raw.into());
    }

    /// The raw stored document, if any.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl CartStorage for SharedMemoryStorage {
    fn load(&self) -> Result<Vec<LineItem>, StorageError> {
        match self.slot.borrow().as_deref() {
            None => Ok(Vec::new()),
            Some(contents) => serde_json::from_str(contents).map_err(StorageError::Corrupt),
        }
    }

    fn save(&self, items: &[LineItem]) -> Result<(), StorageError> {
        let document = serde_json::to_string(items).map_err(StorageError::Serialize)?;

        *self.slot.borrow_mut() = Some(document);

        Ok(())
    }
}
