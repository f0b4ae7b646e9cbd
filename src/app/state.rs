//! Application state - the Petriboard struct definition.

use crate::config::ConfigStore;
use crate::document::{DocumentHolder, DocumentLoader};
use crate::ingest::IngestChannel;
use crate::notifications::{NotificationRouter, ToastQueue};
use crate::onboarding::TutorialLog;
use parking_lot::Mutex;
use std::sync::Arc;

/// The rendering canvas, owned by the host.
///
/// The core only keeps a reference and pokes it after a load.
pub trait CanvasHandle: Send + Sync {
    fn focus_view_box(&self);

    fn force_layout(&self);
}

/// Process root: every consumer is handed these same instances.
pub struct Petriboard<N> {
    /// Configuration record
    pub config: Arc<ConfigStore>,
    /// Current document
    pub document: Arc<DocumentHolder<N>>,
    /// Transient messages
    pub toasts: Arc<ToastQueue>,
    /// Routed notifications
    pub notifier: Arc<NotificationRouter>,
    /// File reading
    pub ingest: IngestChannel,
    /// Codec dispatch
    pub loader: DocumentLoader<N>,
    /// Tutorial sequences already shown
    pub tutorial: Mutex<TutorialLog>,
    pub(super) canvas: Mutex<Option<Arc<dyn CanvasHandle>>>,
}
