use super::{Recommendation, SimilarityEngine};
use std::sync::{Arc, RwLock};
use tracing::info;

/// Shared, swappable reference to the current engine
///
/// Readers take an `Arc` snapshot and keep using it for as long as they need.
/// A reload builds a complete engine first and then swaps it in, so a reader
/// never observes a catalog paired with another catalog's feature matrix.
#[derive(Debug)]
pub struct EngineHandle {
    current: RwLock<Arc<SimilarityEngine>>,
}

impl EngineHandle {
    pub fn new(engine: SimilarityEngine) -> Self {
        Self {
            current: RwLock::new(Arc::new(engine)),
        }
    }

    pub fn snapshot(&self) -> Arc<SimilarityEngine> {
        // The guarded value is always a complete Arc, so a poisoned lock is still usable
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Install `engine` and return the one it replaced
    pub fn replace(&self, engine: SimilarityEngine) -> Arc<SimilarityEngine> {
        let next = Arc::new(engine);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        info!(
            "Swapping engine: {} songs -> {} songs",
            guard.len(),
            next.len()
        );
        std::mem::replace(&mut *guard, next)
    }

    pub fn recommend(&self, song_title: &str, n: usize) -> Vec<Recommendation> {
        self.snapshot().recommend(song_title, n)
    }
}
