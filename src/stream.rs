//! Replay-latest multicast streams.
//!
//! [`ReplayStream`] is the one primitive every shared piece of state in the
//! crate is built on: the configuration record, the current document and the
//! toast queue snapshot.
//!
//! ## Semantics
//!
//! - A new subscriber is called with the latest value before `subscribe`
//!   returns, then with every later publication.
//! - Publication is synchronous: listeners run in registration order before
//!   `publish` returns.
//! - A publication issued from inside a listener updates `latest()` at once
//!   but is delivered after the in-flight value, so every listener sees every
//!   value exactly once and in issue order.
//! - Listeners run without the stream lock held and may freely re-enter.
//! - [`ReplayStream::after_dispatch`] defers work until every queued value
//!   has been delivered.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

type Callback<T> = dyn Fn(&T) + Send + Sync;
type Deferred = Box<dyn FnOnce() + Send>;

struct Listener<T> {
    id: u64,
    /// Sequence number of the value replayed at registration
    joined_at: u64,
    active: AtomicBool,
    callback: Box<Callback<T>>,
}

struct State<T> {
    latest: T,
    seq: u64,
    next_id: u64,
    listeners: Vec<Arc<Listener<T>>>,
    pending: VecDeque<(u64, T)>,
    deferred: Vec<Deferred>,
    dispatching: bool,
}

enum Step<T> {
    Deliver(u64, T, Vec<Arc<Listener<T>>>),
    Run(Vec<Deferred>),
}

struct Shared<T> {
    state: Mutex<State<T>>,
}

impl<T> Shared<T> {
    fn remove(&self, id: u64) {
        let mut state = self.state.lock();
        if let Some(pos) = state.listeners.iter().position(|l| l.id == id) {
            let listener = state.listeners.remove(pos);
            listener.active.store(false, Ordering::Release);
        }
    }
}

/// Publishing side of a replay-latest stream.
///
/// Cloning yields another handle to the same stream.
pub struct ReplayStream<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for ReplayStream<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone + Send + 'static> ReplayStream<T> {
    pub fn new(initial: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    latest: initial,
                    seq: 0,
                    next_id: 0,
                    listeners: Vec::new(),
                    pending: VecDeque::new(),
                    deferred: Vec::new(),
                    dispatching: false,
                }),
            }),
        }
    }

    /// The most recently published value.
    pub fn latest(&self) -> T {
        self.shared.state.lock().latest.clone()
    }

    /// Read-only handle for consumers.
    pub fn feed(&self) -> Feed<T> {
        Feed {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn subscribe(&self, f: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        subscribe(&self.shared, Box::new(f))
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.state.lock().listeners.len()
    }

    pub fn publish(&self, value: T) {
        self.update_if(|_| (Some(value), ()));
    }

    /// Compute the next value from the current one and publish it.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        self.update_if(|current| (Some(f(current)), ()));
    }

    /// Compute the next value under the stream lock; `None` publishes nothing.
    ///
    /// The closure must not touch this stream.
    pub fn update_if<R>(&self, f: impl FnOnce(&T) -> (Option<T>, R)) -> R {
        let output = {
            let mut state = self.shared.state.lock();
            let (next, output) = f(&state.latest);
            let Some(next) = next else {
                return output;
            };
            state.seq += 1;
            let seq = state.seq;
            state.latest = next.clone();
            state.pending.push_back((seq, next));
            if state.dispatching {
                // the outer publication delivers it
                return output;
            }
            state.dispatching = true;
            output
        };
        self.drain();
        output
    }

    /// Run `f` once every queued publication has been delivered.
    ///
    /// Runs `f` at once when the stream is idle. Called from a listener, `f`
    /// runs after the in-flight value and everything queued behind it.
    pub fn after_dispatch(&self, f: impl FnOnce() + Send + 'static) {
        {
            let mut state = self.shared.state.lock();
            if state.dispatching {
                state.deferred.push(Box::new(f));
                return;
            }
        }
        f();
    }

    fn drain(&self) {
        let _guard = DrainGuard(&self.shared);
        loop {
            let step = {
                let mut state = self.shared.state.lock();
                match state.pending.pop_front() {
                    Some((seq, value)) => Step::Deliver(seq, value, state.listeners.clone()),
                    None if !state.deferred.is_empty() => {
                        Step::Run(std::mem::take(&mut state.deferred))
                    }
                    None => {
                        state.dispatching = false;
                        return;
                    }
                }
            };
            match step {
                Step::Deliver(seq, value, listeners) => {
                    for listener in listeners.iter().filter(|l| l.joined_at < seq) {
                        if listener.active.load(Ordering::Acquire) {
                            (listener.callback)(&value);
                        }
                    }
                }
                // publications made here are queued and delivered by this loop
                Step::Run(deferred) => deferred.into_iter().for_each(|f| f()),
            }
        }
    }
}

/// Resets the dispatch flag if a listener panics mid-delivery.
struct DrainGuard<'a, T>(&'a Shared<T>);

impl<T> Drop for DrainGuard<'_, T> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let mut state = self.0.state.lock();
            state.pending.clear();
            state.deferred.clear();
            state.dispatching = false;
        }
    }
}

fn subscribe<T: Clone + Send + 'static>(
    shared: &Arc<Shared<T>>,
    callback: Box<Callback<T>>,
) -> Subscription {
    let (listener, replay) = {
        let mut state = shared.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        let listener = Arc::new(Listener {
            id,
            joined_at: state.seq,
            active: AtomicBool::new(true),
            callback,
        });
        state.listeners.push(Arc::clone(&listener));
        (listener, state.latest.clone())
    };

    if listener.active.load(Ordering::Acquire) {
        (listener.callback)(&replay);
    }

    let weak: Weak<Shared<T>> = Arc::downgrade(shared);
    let id = listener.id;
    Subscription {
        dispose: Some(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.remove(id);
            }
        })),
    }
}

/// Read-only view of a [`ReplayStream`].
pub struct Feed<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Feed<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone + Send + 'static> Feed<T> {
    pub fn latest(&self) -> T {
        self.shared.state.lock().latest.clone()
    }

    /// Register `f`; it is called with the latest value before this returns.
    pub fn subscribe(&self, f: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        subscribe(&self.shared, Box::new(f))
    }

    /// Keep a local copy of a value derived from every publication.
    pub fn mirror<U>(&self, derive: impl Fn(&T) -> U + Send + Sync + 'static) -> Mirror<U>
    where
        U: Clone + Send + 'static,
    {
        let cell = Arc::new(Mutex::new(derive(&self.latest())));
        let target = Arc::clone(&cell);
        let subscription = self.subscribe(move |value| {
            *target.lock() = derive(value);
        });
        Mirror {
            cell,
            _subscription: subscription,
        }
    }
}

/// A live registration on a stream.
///
/// Dropping the subscription disposes it. Use [`Subscription::detach`] for
/// listeners that must live as long as the stream.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    dispose: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }

    /// Keep the listener registered for the lifetime of the stream.
    pub fn detach(mut self) {
        self.dispose = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.dispose.is_some())
            .finish()
    }
}

/// All subscriptions owned by one consumer, disposed together.
#[derive(Debug, Default)]
pub struct Subscriptions {
    held: Vec<Subscription>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, subscription: Subscription) {
        self.held.push(subscription);
    }

    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    pub fn dispose_all(&mut self) {
        for subscription in self.held.drain(..) {
            subscription.unsubscribe();
        }
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        self.dispose_all();
    }
}

/// A derived value kept in sync with a stream.
pub struct Mirror<U> {
    cell: Arc<Mutex<U>>,
    _subscription: Subscription,
}

impl<U: Clone> Mirror<U> {
    pub fn get(&self) -> U {
        self.cell.lock().clone()
    }
}
