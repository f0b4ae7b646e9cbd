//! Ordering between the config flag and the document when a net is cleared.

use crate::helpers::{SAMPLE_NET_TEXT, TestBoard, TestBoardBuilder, TestNet};
use parking_lot::Mutex;
use petriboard::config::{Config, ConfigPatch, ConfigStore};
use petriboard::document::Document;
use petriboard::stream::Mirror;
use std::sync::Arc;

/// Records (document empty, data_loaded) pairs as document subscribers see them.
fn watch_pairs(
    board: &petriboard::Petriboard<TestNet>,
) -> (Arc<Mutex<Vec<(bool, bool)>>>, petriboard::stream::Subscription) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let config: Arc<ConfigStore> = Arc::clone(&board.config);
    let sub = board
        .document
        .stream()
        .subscribe(move |doc: &Document<TestNet>| {
            sink.lock().push((doc.is_empty(), config.current().data_loaded));
        });
    (seen, sub)
}

#[test]
fn test_clear_never_shows_empty_document_with_loaded_flag() {
    let TestBoard { board, .. } = TestBoardBuilder::new().build();
    board.open_content("net.txt", SAMPLE_NET_TEXT);

    let (seen, _sub) = watch_pairs(&board);
    board.document.clear();

    assert_eq!(*seen.lock(), vec![(false, true), (true, false)]);
}

#[test]
fn test_load_publishes_flag_before_document() {
    let TestBoard { board, .. } = TestBoardBuilder::new().build();

    let (seen, _sub) = watch_pairs(&board);
    board.open_content("net.txt", SAMPLE_NET_TEXT);

    assert_eq!(*seen.lock(), vec![(true, false), (false, true)]);
}

#[test]
fn test_input_reset_runs_between_flag_and_document() {
    let TestBoard { board, .. } = TestBoardBuilder::new().build();
    board.open_content("net.txt", SAMPLE_NET_TEXT);

    let observed = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&observed);
    let config = Arc::clone(&board.config);
    let document = Arc::clone(&board.document);
    board.document.set_input_reset(move || {
        *slot.lock() = Some((config.current().data_loaded, document.current().is_empty()));
    });

    board.document.clear();

    // flag already cleared, document not yet replaced
    assert_eq!(*observed.lock(), Some((false, false)));
}

#[test]
fn test_clear_from_config_listener_keeps_order() {
    let TestBoard { board, .. } = TestBoardBuilder::new().build();
    board.open_content("net.txt", SAMPLE_NET_TEXT);
    let (seen, _sub) = watch_pairs(&board);

    // a consumer that drops the net whenever autorun is switched on
    let document = Arc::clone(&board.document);
    let _reactor = board.config.stream().subscribe(move |config| {
        if config.autorun_exec && !document.current().is_empty() {
            document.clear();
        }
    });

    board.config.update(ConfigPatch::new().autorun_exec(true));

    assert_eq!(*seen.lock(), vec![(false, true), (true, false)]);
}

/// Records (document empty, mirrored data_loaded) pairs, the way a view
/// keeping a local copy of the flag sees them.
fn watch_mirrored_pairs(
    board: &petriboard::Petriboard<TestNet>,
) -> (Arc<Mutex<Vec<(bool, bool)>>>, petriboard::stream::Subscription) {
    let loaded: Arc<Mirror<bool>> = Arc::new(
        board
            .config
            .stream()
            .mirror(|config: &Arc<Config>| config.data_loaded),
    );
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let sub = board
        .document
        .stream()
        .subscribe(move |doc: &Document<TestNet>| {
            sink.lock().push((doc.is_empty(), loaded.get()));
        });
    (seen, sub)
}

#[test]
fn test_mirrored_flag_is_cleared_before_empty_document() {
    let TestBoard { board, .. } = TestBoardBuilder::new().build();
    board.open_content("net.txt", SAMPLE_NET_TEXT);
    let (seen, _sub) = watch_mirrored_pairs(&board);

    let document = Arc::clone(&board.document);
    let _reactor = board.config.stream().subscribe(move |config| {
        if config.autorun_exec && !document.current().is_empty() {
            document.clear();
        }
    });

    board.config.update(ConfigPatch::new().autorun_exec(true));

    assert_eq!(*seen.lock(), vec![(false, true), (true, false)]);
    assert!(!board.config.current().data_loaded);
}

#[test]
fn test_mirrored_flag_with_direct_clear() {
    let TestBoard { board, .. } = TestBoardBuilder::new().build();
    board.open_content("net.txt", SAMPLE_NET_TEXT);
    let (seen, _sub) = watch_mirrored_pairs(&board);

    board.document.clear();

    assert_eq!(*seen.lock(), vec![(false, true), (true, false)]);
}

#[test]
fn test_clear_inside_config_listener_runs_reset_after_delivery() {
    let TestBoard { board, .. } = TestBoardBuilder::new().build();
    board.open_content("net.txt", SAMPLE_NET_TEXT);

    let loaded = Arc::new(
        board
            .config
            .stream()
            .mirror(|config: &Arc<Config>| config.data_loaded),
    );
    let observed = Arc::new(Mutex::new(Vec::new()));
    let slot = Arc::clone(&observed);
    let mirror = Arc::clone(&loaded);
    let document = Arc::clone(&board.document);
    board.document.set_input_reset(move || {
        slot.lock().push((mirror.get(), document.current().is_empty()));
    });

    let document = Arc::clone(&board.document);
    let _reactor = board.config.stream().subscribe(move |config| {
        if config.autorun_exec && !document.current().is_empty() {
            document.clear();
            // still pending while the config dispatch is in flight
            assert!(!document.current().is_empty());
        }
    });
    let revision = board.document.revision();

    board.config.update(ConfigPatch::new().autorun_exec(true));

    assert_eq!(*observed.lock(), vec![(false, false)]);
    assert_eq!(board.document.revision(), revision + 1);
    assert!(board.document.current().is_empty());
}
