//! Holder of the current document.

use super::{Document, NetShape};
use crate::config::{ConfigPatch, ConfigStore};
use crate::constants::INITIAL_REVISION;
use crate::stream::{Feed, ReplayStream};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

type ResetHook = Arc<dyn Fn() + Send + Sync>;

/// Owns the "current document" and its revision counter.
///
/// Every replacement, including empty-for-empty, bumps the revision exactly
/// once.
pub struct DocumentHolder<N> {
    documents: ReplayStream<Document<N>>,
    revision: Arc<AtomicU64>,
    config: Arc<ConfigStore>,
    input_reset: Arc<Mutex<Option<ResetHook>>>,
    /// Set while a clear waits for the config flag to be delivered
    clearing: Arc<AtomicBool>,
}

/// Marks a clear as pending; dropping it, run or not, re-arms `clear`.
struct PendingClear(Arc<AtomicBool>);

impl Drop for PendingClear {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn publish<N: Send + Sync + 'static>(
    documents: &ReplayStream<Document<N>>,
    revision: &AtomicU64,
    next: impl FnOnce(&Document<N>) -> Document<N>,
) -> u64 {
    let mut published = 0;
    documents.update(|current| {
        published = revision.fetch_add(1, Ordering::AcqRel) + 1;
        next(current)
    });
    published
}

impl<N: NetShape + Send + Sync + 'static> DocumentHolder<N> {
    pub fn new(config: Arc<ConfigStore>) -> Self {
        Self {
            documents: ReplayStream::new(Document::Empty),
            revision: Arc::new(AtomicU64::new(INITIAL_REVISION)),
            config,
            input_reset: Arc::new(Mutex::new(None)),
            clearing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The current document; [`Document::Empty`] when nothing is loaded.
    pub fn current(&self) -> Document<N> {
        self.documents.latest()
    }

    pub fn stream(&self) -> Feed<Document<N>> {
        self.documents.feed()
    }

    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    /// Register the hook that resets the document owner's input buffer.
    pub fn set_input_reset(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self.input_reset.lock() = Some(Arc::new(hook));
    }

    /// Publish `doc` (or the empty sentinel for absent and blank nets).
    ///
    /// Returns the new revision once every subscriber has been notified.
    pub fn replace(&self, doc: impl Into<Document<N>>) -> u64 {
        let doc = doc.into().normalized();
        let revision = publish(&self.documents, &self.revision, |_| doc);
        tracing::debug!(revision, "document replaced");
        revision
    }

    /// Drop the current document.
    ///
    /// `data_loaded` is cleared and the input buffer reset before the empty
    /// document is published. Called from a config listener, the reset and
    /// the empty document wait until every config subscriber has seen the
    /// cleared flag. A clear issued while another one is pending is absorbed.
    pub fn clear(&self) {
        if self.clearing.swap(true, Ordering::AcqRel) {
            tracing::trace!("clear already pending");
            return;
        }
        let pending = PendingClear(Arc::clone(&self.clearing));
        self.config.update(ConfigPatch::new().data_loaded(false));

        let documents = self.documents.clone();
        let revision = Arc::clone(&self.revision);
        let input_reset = Arc::clone(&self.input_reset);
        self.config.after_dispatch(move || {
            let hook = input_reset.lock().clone();
            if let Some(reset) = hook {
                reset();
            }
            drop(pending);
            let revision = publish(&documents, &revision, |_| Document::Empty);
            tracing::debug!(revision, "document cleared");
        });
    }

    /// Re-publish the current document after an in-place edit.
    pub fn refresh(&self) -> u64 {
        let revision = publish(&self.documents, &self.revision, Document::clone);
        tracing::trace!(revision, "document refreshed");
        revision
    }
}
