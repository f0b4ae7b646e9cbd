//! Application lifecycle - construction and the per-frame tick.

use super::{CanvasHandle, Petriboard};
use crate::config::{Config, ConfigStore};
use crate::constants::INTRO_TUTORIAL_TAG;
use crate::document::{DocumentHolder, DocumentLoader, NetCodec, NetShape};
use crate::ingest::IngestChannel;
use crate::notifications::{
    DialogHost, Expirations, NativePopup, NotificationRouter, ToastId, ToastQueue,
};
use crate::onboarding::TutorialLog;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;

impl<N: NetShape + Send + Sync + 'static> Petriboard<N> {
    pub fn new(
        config: Config,
        codec: Arc<dyn NetCodec<N>>,
        dialogs: Arc<dyn DialogHost>,
        popups: Arc<dyn NativePopup>,
    ) -> Self {
        let config = Arc::new(ConfigStore::new(config));
        let toasts = Arc::new(ToastQueue::new());
        let notifier = Arc::new(NotificationRouter::new(
            Arc::clone(&config),
            Arc::clone(&toasts),
            dialogs,
            popups,
        ));
        let document = Arc::new(DocumentHolder::new(Arc::clone(&config)));
        let loader = DocumentLoader::new(
            Arc::clone(&document),
            Arc::clone(&config),
            Arc::clone(&notifier),
            codec,
        );

        tracing::debug!("petriboard core initialized");

        Self {
            ingest: IngestChannel::new(Arc::clone(&notifier)),
            config,
            document,
            toasts,
            notifier,
            loader,
            tutorial: Mutex::new(TutorialLog::for_session()),
            canvas: Mutex::new(None),
        }
    }

    pub fn attach_canvas(&self, canvas: Arc<dyn CanvasHandle>) {
        *self.canvas.lock() = Some(canvas);
    }

    pub fn canvas(&self) -> Option<Arc<dyn CanvasHandle>> {
        self.canvas.lock().clone()
    }

    /// Expire due toasts. Call when [`ToastQueue::next_deadline`] passes.
    pub fn tick(&self, now: Instant) -> Vec<ToastId> {
        self.toasts.expire_due(now)
    }

    /// Toast expiry without a host tick; poll it on the host's executor.
    pub fn toast_expirations(&self) -> Expirations {
        self.toasts.expirations()
    }

    /// Replace the tutorial log with one the host kept from earlier.
    pub fn restore_tutorial(&self, encoded: &str) {
        *self.tutorial.lock() = TutorialLog::parse(encoded);
    }

    /// Whether the intro tutorial should run, recording that it has.
    pub fn take_intro_tutorial(&self) -> bool {
        if !self.config.current().tutorial_on_start {
            return false;
        }
        self.tutorial.lock().mark_seen(INTRO_TUTORIAL_TAG)
    }
}
