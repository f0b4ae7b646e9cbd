//! Self-driving toast expiry.
//!
//! [`Expirations`] removes each toast when its own deadline passes and yields
//! its id. Removal happens on the thread that polls the stream; a small alarm
//! thread only wakes the poller.

use super::toast::{ToastId, ToastQueue};
use crate::stream::Subscription;
use futures::Stream;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, Waker};
use std::time::Instant;

#[derive(Default)]
struct AlarmState {
    deadline: Option<Instant>,
    waker: Option<Waker>,
    /// The queue changed since the last poll
    dirty: bool,
    closed: bool,
}

#[derive(Default)]
struct Alarm {
    state: Mutex<AlarmState>,
    cond: Condvar,
}

impl Alarm {
    fn run(&self) {
        let mut state = self.state.lock();
        loop {
            if state.closed {
                return;
            }
            match state.deadline {
                None => self.cond.wait(&mut state),
                Some(deadline) if Instant::now() >= deadline => {
                    state.deadline = None;
                    if let Some(waker) = state.waker.take() {
                        parking_lot::MutexGuard::unlocked(&mut state, || waker.wake());
                    }
                }
                Some(deadline) => {
                    self.cond.wait_until(&mut state, deadline);
                }
            }
        }
    }

    fn touch(&self) {
        let waker = {
            let mut state = self.state.lock();
            state.dirty = true;
            state.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

/// Endless stream of toast ids, each yielded when that toast expires.
///
/// The toast is already gone from the queue when its id comes out.
#[must_use = "toasts only expire while the stream is polled"]
pub struct Expirations {
    queue: Arc<ToastQueue>,
    alarm: Arc<Alarm>,
    ready: VecDeque<ToastId>,
    _watch: Subscription,
}

impl Expirations {
    pub(super) fn new(queue: Arc<ToastQueue>) -> Self {
        let alarm = Arc::new(Alarm::default());

        let watcher = Arc::clone(&alarm);
        let watch = queue.stream().subscribe(move |_| watcher.touch());

        let worker = Arc::clone(&alarm);
        if let Err(e) = std::thread::Builder::new()
            .name("petriboard-toast-alarm".into())
            .spawn(move || worker.run())
        {
            tracing::error!("Failed to start toast alarm: {}", e);
        }

        Self {
            queue,
            alarm,
            ready: VecDeque::new(),
            _watch: watch,
        }
    }
}

impl Stream for Expirations {
    type Item = ToastId;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<ToastId>> {
        loop {
            if let Some(id) = self.ready.pop_front() {
                return Poll::Ready(Some(id));
            }

            self.alarm.state.lock().dirty = false;
            let expired = self.queue.expire_due(Instant::now());
            if !expired.is_empty() {
                tracing::trace!(count = expired.len(), "toasts expired");
                self.ready.extend(expired);
                continue;
            }

            let deadline = self.queue.next_deadline();
            let mut state = self.alarm.state.lock();
            if state.dirty {
                // a push landed while we were looking
                continue;
            }
            state.deadline = deadline;
            state.waker = Some(cx.waker().clone());
            drop(state);
            self.alarm.cond.notify_one();
            return Poll::Pending;
        }
    }
}

impl Drop for Expirations {
    fn drop(&mut self) {
        self.alarm.state.lock().closed = true;
        self.alarm.cond.notify_one();
    }
}
