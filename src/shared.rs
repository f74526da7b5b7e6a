// src/shared.rs
use crate::assigner::{KeyAssigner, KeyedDocument};
use crate::error::DockeyError;
use dockey_keygen::{FieldLookup, JsonLookup};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A [`KeyAssigner`] behind a mutex, for callers that generate keys from several
/// threads. Calls are serialized, so counters never hand out the same value twice.
#[derive(Debug)]
pub struct SharedKeyGenerator<L = JsonLookup> {
    inner: Arc<Mutex<KeyAssigner<L>>>,
}

impl<L> Clone for SharedKeyGenerator<L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<L: FieldLookup> SharedKeyGenerator<L> {
    pub fn new(assigner: KeyAssigner<L>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(assigner)),
        }
    }

    pub fn next_key(&self, document: &[u8]) -> Result<Vec<u8>, DockeyError> {
        self.lock().next_key(document)
    }

    pub fn assign(&self, document: &[u8]) -> Result<KeyedDocument, DockeyError> {
        self.lock().assign(document)
    }

    // A panic in another caller cannot leave a counter half-updated.
    fn lock(&self) -> MutexGuard<'_, KeyAssigner<L>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
