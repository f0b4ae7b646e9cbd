//! Transient toast/panel messages with per-entry expiry.

use crate::config::ToastTarget;
use crate::constants::{
    DEFAULT_ERROR_TOAST_DURATION_MS, DEFAULT_TOAST_DURATION_MS, WARNING_TOAST_DURATION_MS,
};
use super::expiry::Expirations;
use crate::stream::{Feed, ReplayStream};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Severity of a toast
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn default_duration(self) -> Duration {
        let ms = match self {
            Severity::Info | Severity::Success => DEFAULT_TOAST_DURATION_MS,
            Severity::Warning => WARNING_TOAST_DURATION_MS,
            Severity::Error => DEFAULT_ERROR_TOAST_DURATION_MS,
        };
        Duration::from_millis(u64::from(ms))
    }

    pub fn icon(self) -> &'static str {
        match self {
            Severity::Info => "ℹ",
            Severity::Success => "✓",
            Severity::Warning => "⚠",
            Severity::Error => "✗",
        }
    }
}

/// A message waiting to be shown
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToastEntry {
    #[serde(rename = "channel")]
    pub target: ToastTarget,
    pub severity: Severity,
    #[serde(rename = "durationMs", serialize_with = "serialize_millis")]
    pub duration: Duration,
    pub lines: Vec<String>,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

impl ToastEntry {
    pub fn new(severity: Severity, lines: Vec<String>) -> Self {
        Self {
            target: ToastTarget::default(),
            severity,
            duration: severity.default_duration(),
            lines,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, vec![message.into()])
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, vec![message.into()])
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, vec![message.into()])
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, vec![message.into()])
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn on(mut self, target: ToastTarget) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }
}

/// Identity of a queued toast, stable while it is queued
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

/// A toast in the queue with its own deadline
#[derive(Clone, Debug)]
pub struct QueuedToast {
    pub id: ToastId,
    pub entry: ToastEntry,
    pub pushed_at: Instant,
    /// `None` when the duration runs past what `Instant` can represent;
    /// such an entry only leaves by [`ToastQueue::remove`].
    pub expires_at: Option<Instant>,
}

impl QueuedToast {
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }

    /// Fraction of the lifetime left at `now`, from 1.0 down to 0.0.
    pub fn remaining_fraction(&self, now: Instant) -> f32 {
        let Some(deadline) = self.expires_at else {
            return 1.0;
        };
        let total = deadline.saturating_duration_since(self.pushed_at);
        if total.is_zero() {
            return 0.0;
        }
        let left = deadline.saturating_duration_since(now);
        (left.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Ordered queue of transient messages.
///
/// Each entry carries its own deadline. Either the host calls
/// [`ToastQueue::expire_due`] when [`ToastQueue::next_deadline`] passes, or it
/// polls [`ToastQueue::expirations`] and entries remove themselves.
pub struct ToastQueue {
    queue: ReplayStream<Arc<Vec<QueuedToast>>>,
    next_id: AtomicU64,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastQueue {
    pub fn new() -> Self {
        Self {
            queue: ReplayStream::new(Arc::new(Vec::new())),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn push(&self, entry: ToastEntry) -> ToastId {
        self.push_at(entry, Instant::now())
    }

    /// Append `entry` with a deadline of `now + entry.duration`.
    pub fn push_at(&self, entry: ToastEntry, now: Instant) -> ToastId {
        let id = ToastId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let expires_at = now.checked_add(entry.duration);
        if expires_at.is_none() {
            tracing::debug!(?id, "toast duration out of range, it never expires");
        }
        let queued = QueuedToast {
            id,
            expires_at,
            pushed_at: now,
            entry,
        };
        tracing::trace!(?id, severity = ?queued.entry.severity, "toast queued");
        self.queue.update(|current| {
            let mut next = Vec::with_capacity(current.len() + 1);
            next.extend(current.iter().cloned());
            next.push(queued);
            Arc::new(next)
        });
        id
    }

    /// Remove every entry whose deadline has passed at `now`.
    ///
    /// Returns one id per removed entry, in queue order.
    pub fn expire_due(&self, now: Instant) -> Vec<ToastId> {
        self.retain_where(|toast| !toast.is_expired(now))
    }

    /// Dismiss a single entry. Returns false if it was already gone.
    pub fn remove(&self, id: ToastId) -> bool {
        !self.retain_where(|toast| toast.id != id).is_empty()
    }

    pub fn clear(&self) {
        self.retain_where(|_| false);
    }

    fn retain_where(&self, keep: impl Fn(&QueuedToast) -> bool) -> Vec<ToastId> {
        self.queue.update_if(|current| {
            let (kept, removed): (Vec<_>, Vec<_>) =
                current.iter().cloned().partition(|toast| keep(toast));
            if removed.is_empty() {
                return (None, Vec::new());
            }
            let removed = removed.into_iter().map(|toast| toast.id).collect();
            (Some(Arc::new(kept)), removed)
        })
    }

    /// The earliest deadline among queued entries.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.latest().iter().filter_map(|toast| toast.expires_at).min()
    }

    pub fn entries(&self) -> Arc<Vec<QueuedToast>> {
        self.queue.latest()
    }

    pub fn len(&self) -> usize {
        self.queue.latest().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.latest().is_empty()
    }

    /// Remove each entry as its deadline passes, yielding its id.
    pub fn expirations(self: &Arc<Self>) -> Expirations {
        Expirations::new(Arc::clone(self))
    }

    /// Queue snapshots for the view, starting with the current one.
    pub fn stream(&self) -> Feed<Arc<Vec<QueuedToast>>> {
        self.queue.feed()
    }
}
