//! Unit tests for stream module.

use parking_lot::Mutex;
use petriboard::stream::{ReplayStream, Subscription, Subscriptions};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn recorder<T: Clone + Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl Fn(&T) + Send + Sync + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    (seen, move |value: &T| sink.lock().push(value.clone()))
}

#[test]
fn test_subscribe_replays_latest() {
    let stream = ReplayStream::new(1);
    stream.publish(2);

    let (seen, listener) = recorder::<i32>();
    let _sub = stream.subscribe(listener);

    assert_eq!(*seen.lock(), vec![2]);
}

#[test]
fn test_publish_reaches_all_in_registration_order() {
    let stream = ReplayStream::new(0);
    let order = Arc::new(Mutex::new(Vec::new()));

    let mut subs = Subscriptions::new();
    for name in ["a", "b", "c"] {
        let order = Arc::clone(&order);
        subs.add(stream.subscribe(move |v: &i32| order.lock().push((name, *v))));
    }
    order.lock().clear();

    stream.publish(7);

    assert_eq!(*order.lock(), vec![("a", 7), ("b", 7), ("c", 7)]);
}

#[test]
fn test_dropped_subscription_stops_delivery() {
    let stream = ReplayStream::new(0);
    let (seen, listener) = recorder::<i32>();

    let sub = stream.subscribe(listener);
    stream.publish(1);
    drop(sub);
    stream.publish(2);

    assert_eq!(*seen.lock(), vec![0, 1]);
    assert_eq!(stream.subscriber_count(), 0);
}

#[test]
fn test_detached_subscription_keeps_listening() {
    let stream = ReplayStream::new(0);
    let (seen, listener) = recorder::<i32>();

    stream.subscribe(listener).detach();
    stream.publish(5);

    assert_eq!(*seen.lock(), vec![0, 5]);
    assert_eq!(stream.subscriber_count(), 1);
}

#[test]
fn test_subscriptions_bag_disposes_all() {
    let stream = ReplayStream::new(0);
    let calls = Arc::new(AtomicUsize::new(0));

    let mut bag = Subscriptions::new();
    for _ in 0..3 {
        let calls = Arc::clone(&calls);
        bag.add(stream.subscribe(move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
        }));
    }
    assert_eq!(bag.len(), 3);
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    bag.dispose_all();
    stream.publish(1);

    assert!(bag.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_reentrant_publish_is_delivered_in_issue_order() {
    let stream = ReplayStream::new(0);

    // First listener bumps 1 -> 2 while 1 is still being delivered
    let bumper = stream.clone();
    let _bump = stream.subscribe(move |v: &i32| {
        if *v == 1 {
            bumper.publish(2);
            assert_eq!(bumper.latest(), 2);
        }
    });

    let (seen, listener) = recorder::<i32>();
    let _watch = stream.subscribe(listener);

    stream.publish(1);

    assert_eq!(*seen.lock(), vec![0, 1, 2]);
    assert_eq!(stream.latest(), 2);
}

#[test]
fn test_unsubscribe_during_dispatch_skips_listener() {
    let stream = ReplayStream::new(0);
    let victim: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

    let slot = Arc::clone(&victim);
    let _killer = stream.subscribe(move |v: &i32| {
        if *v == 1 {
            if let Some(sub) = slot.lock().take() {
                sub.unsubscribe();
            }
        }
    });

    let (seen, listener) = recorder::<i32>();
    *victim.lock() = Some(stream.subscribe(listener));

    stream.publish(1);

    assert_eq!(*seen.lock(), vec![0]);
}

#[test]
fn test_mirror_tracks_derived_value() {
    let stream = ReplayStream::new((false, 3));
    let mirror = stream.feed().mirror(|(flag, _)| *flag);

    assert!(!mirror.get());
    stream.publish((true, 4));
    assert!(mirror.get());
}

#[test]
fn test_update_if_none_publishes_nothing() {
    let stream = ReplayStream::new(10);
    let (seen, listener) = recorder::<i32>();
    let _sub = stream.subscribe(listener);

    let out = stream.update_if(|_| (None, "kept"));

    assert_eq!(out, "kept");
    assert_eq!(*seen.lock(), vec![10]);
}

#[test]
fn test_panicking_listener_does_not_wedge_stream() {
    let stream = ReplayStream::new(0);
    let panicky = stream.subscribe(|v: &i32| {
        if *v == 1 {
            panic!("listener failure");
        }
    });

    let publisher = stream.clone();
    let result = std::panic::catch_unwind(AssertUnwindSafe(move || publisher.publish(1)));
    assert!(result.is_err());
    drop(panicky);

    let (seen, listener) = recorder::<i32>();
    let _sub = stream.subscribe(listener);
    stream.publish(2);

    assert_eq!(*seen.lock(), vec![1, 2]);
}

#[test]
fn test_after_dispatch_runs_at_once_when_idle() {
    let stream = ReplayStream::new(0);
    let ran = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&ran);

    stream.after_dispatch(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(ran.load(Ordering::SeqCst), 1);
}

#[test]
fn test_after_dispatch_waits_for_queued_values() {
    let stream = ReplayStream::new(0);
    let log = Arc::new(Mutex::new(Vec::new()));

    let inner = stream.clone();
    let first_log = Arc::clone(&log);
    let _first = stream.subscribe(move |v: &i32| {
        first_log.lock().push(format!("first {v}"));
        if *v == 1 {
            inner.publish(2);
            let deferred_log = Arc::clone(&first_log);
            inner.after_dispatch(move || deferred_log.lock().push("deferred".to_string()));
        }
    });
    let second_log = Arc::clone(&log);
    let _second = stream.subscribe(move |v: &i32| second_log.lock().push(format!("second {v}")));
    log.lock().clear();

    stream.publish(1);

    assert_eq!(
        *log.lock(),
        vec!["first 1", "second 1", "first 2", "second 2", "deferred"]
    );
}
