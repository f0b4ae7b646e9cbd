//! Unit tests for file formats and the document loader.

use crate::helpers::{SAMPLE_NET_TEXT, TestBoard, TestBoardBuilder};
use petriboard::config::{ConfigPatch, InfoChannel};
use petriboard::constants::UNKNOWN_FORMAT_LINES;
use petriboard::document::FileFormat;
use petriboard::notifications::DialogKind;

#[test]
fn test_format_from_extension() {
    assert_eq!(FileFormat::from_extension("json"), Some(FileFormat::Json));
    assert_eq!(FileFormat::from_extension(".PNML"), Some(FileFormat::Pnml));
    assert_eq!(FileFormat::from_extension("sav"), Some(FileFormat::Sav));
    assert_eq!(FileFormat::from_extension("txt"), Some(FileFormat::Txt));
    assert_eq!(FileFormat::from_extension("xml"), None);
}

#[test]
fn test_format_from_file_name() {
    assert_eq!(FileFormat::from_file_name("nets/mutex.pnml"), Some(FileFormat::Pnml));
    assert_eq!(FileFormat::from_file_name("README"), None);
    assert_eq!(FileFormat::Sav.to_string(), "sav");
}

#[test]
fn test_unknown_extension_routes_four_line_info() {
    let TestBoard { board, dialogs, .. } = TestBoardBuilder::new().build();

    assert_eq!(board.loader.load("net.xml", SAMPLE_NET_TEXT), None);

    let opened = dialogs.opened();
    assert_eq!(opened.len(), 1);
    assert_eq!(opened[0].kind, DialogKind::Info);
    assert_eq!(opened[0].message.lines().count(), 4);
    assert_eq!(opened[0].message, UNKNOWN_FORMAT_LINES.join("\n"));
    assert!(board.document.current().is_empty());
}

#[test]
fn test_unknown_extension_follows_info_channel() {
    let TestBoard { board, popups, .. } = TestBoardBuilder::new()
        .with_patch(ConfigPatch::new().notify_info(InfoChannel::Popup))
        .build();

    board.loader.load("net.doc", "");

    let alerts = popups.alerts();
    assert_eq!(alerts.len(), 1);
    insta::assert_snapshot!(alerts[0].lines().nth(3).unwrap_or_default(), @"Valid extensions are:");
}

#[test]
fn test_load_sets_flags_and_publishes() {
    let TestBoard { board, .. } = TestBoardBuilder::new()
        .with_patch(ConfigPatch::new().dirty(true))
        .build();
    let start = board.document.revision();

    let revision = board.loader.load("net.txt", SAMPLE_NET_TEXT);

    assert_eq!(revision, Some(start + 1));
    let config = board.config.current();
    assert!(config.data_loaded);
    assert!(!config.dirty);
    assert_eq!(board.document.current().node_count(), 3);
}

#[test]
fn test_codec_failure_loads_nothing() {
    let TestBoard { board, dialogs, .. } = TestBoardBuilder::new().build();
    let start = board.document.revision();

    assert_eq!(board.loader.load("net.json", "garbage line"), None);

    assert_eq!(board.document.revision(), start);
    assert!(!board.config.current().data_loaded);
    assert_eq!(dialogs.count(), 0);
}

#[test]
fn test_blank_net_does_not_count_as_loaded() {
    let TestBoard { board, .. } = TestBoardBuilder::new().build();

    assert!(board.loader.load("empty.json", "").is_some());

    assert!(board.document.current().is_empty());
    assert!(!board.config.current().data_loaded);
}

#[test]
fn test_export_current_net() {
    let TestBoard { board, .. } = TestBoardBuilder::new().build();
    assert_eq!(board.loader.export(FileFormat::Txt), None);

    board.loader.load("net.txt", SAMPLE_NET_TEXT);
    board.config.update(ConfigPatch::new().dirty(true));

    let text = board.loader.export_default().unwrap();
    assert!(text.starts_with("# json\n"));
    assert!(text.contains("arc t1 p2"));
    assert!(!board.config.current().dirty);
}
