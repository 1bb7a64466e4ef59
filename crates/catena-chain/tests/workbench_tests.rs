// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the front-end command interface.

use std::io::Write;

use catena_chain::StageState;
use catena_core::{CatenaError, Direction};
use catena_test_utils::ChainFixture;
use catena_test_utils::mock_plugins::failing;

#[tokio::test]
async fn run_plugin_applies_to_focus_and_advances() {
    let fixture = ChainFixture::builtins().unwrap();
    let mut bench = fixture.workbench();
    bench.set_stage_content(0, b"Hello".to_vec()).unwrap();

    bench.run_plugin("base64", Direction::Forward).await.unwrap();
    assert_eq!(bench.chain().focused(), 1);
    assert_eq!(bench.chain().stage(1).unwrap().content(), b"SGVsbG8=");

    bench.run_plugin("base64", Direction::Inverse).await.unwrap();
    assert_eq!(bench.chain().focused(), 2);
    assert_eq!(bench.chain().stage(2).unwrap().content(), b"Hello");
    assert_eq!(bench.history(), vec!["base64", ".base64"]);
}

#[tokio::test]
async fn subscribers_see_every_change() {
    let fixture = ChainFixture::builtins().unwrap();
    let mut bench = fixture.workbench();
    let mut rx = bench.subscribe();
    assert_eq!(rx.borrow_and_update().revision, 0);

    bench.set_stage_content(0, b"abc".to_vec()).unwrap();
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().stages[0].state, StageState::Seeded);

    bench.run_plugin("sha256", Direction::Forward).await.unwrap();
    let snapshot = rx.borrow_and_update().clone();
    assert_eq!(snapshot, bench.snapshot());
    assert_eq!(snapshot.focused, 1);
    assert_eq!(
        snapshot.output(),
        b"ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert!(snapshot.last_error.is_none());
}

#[tokio::test]
async fn failed_run_is_published_with_error() {
    let fixture = ChainFixture::builder()
        .with_builtins()
        .with_plugin(failing("broken", "always fails"))
        .build()
        .unwrap();
    let mut bench = fixture.workbench();
    bench.set_stage_content(0, b"x".to_vec()).unwrap();

    let err = bench.run_plugin("broken", Direction::Forward).await.unwrap_err();
    assert_eq!(err.failed_stage(), Some(0));
    assert_eq!(bench.chain().focused(), 0, "focus stays on failing stage");

    let snapshot = bench.snapshot();
    let message = snapshot.last_error.expect("error published");
    assert!(message.contains("always fails"), "{message}");

    bench
        .set_stage_descriptor(0, "hex", Direction::Forward)
        .unwrap();
    bench.re_execute_from(0).await.unwrap();
    assert!(bench.snapshot().last_error.is_none());
}

#[tokio::test]
async fn idle_chain_keeps_focus() {
    let fixture = ChainFixture::builtins().unwrap();
    let mut bench = fixture.workbench();
    bench.set_stage_content(0, b"abc".to_vec()).unwrap();
    bench.append_stage();
    bench.set_focus(1).unwrap();

    let report = bench.run_plugin("hex", Direction::Forward).await.unwrap();
    assert!(report.idle);
    assert!(report.executed.is_empty());
    assert_eq!(bench.chain().focused(), 1);
    assert!(bench.chain().stage(2).unwrap().content().is_empty());
    assert_eq!(bench.history(), vec!["hex"]);
}

#[tokio::test]
async fn inverse_of_hash_is_rejected() {
    let fixture = ChainFixture::builtins().unwrap();
    let mut bench = fixture.workbench();
    let err = bench
        .set_stage_descriptor(0, "sha1", Direction::Inverse)
        .unwrap_err();
    assert!(matches!(err, CatenaError::NotInvertible { .. }));
}

#[tokio::test]
async fn load_file_seeds_root_and_reruns() {
    let fixture = ChainFixture::builtins().unwrap();
    let mut bench = fixture.workbench();
    bench
        .set_stage_descriptor(0, "hex", Direction::Forward)
        .unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"\x00\xff").unwrap();
    let report = bench.load_file(file.path()).await.unwrap();

    assert_eq!(report.executed, vec![0]);
    assert_eq!(bench.chain().stage(0).unwrap().content(), b"\x00\xff");
    assert_eq!(bench.chain().stage(1).unwrap().content(), b"00ff");
}

#[tokio::test]
async fn load_missing_file_is_io_error() {
    let fixture = ChainFixture::builtins().unwrap();
    let mut bench = fixture.workbench();
    let dir = tempfile::tempdir().unwrap();
    let err = bench
        .load_file(&dir.path().join("missing.bin"))
        .await
        .unwrap_err();
    assert!(matches!(err, CatenaError::Io { .. }));
}

#[test]
fn registry_queries_pass_through() {
    let fixture = ChainFixture::builtins().unwrap();
    let bench = fixture.workbench();
    assert_eq!(bench.categories(), vec!["codec", "compression", "hash", "format"]);
    assert_eq!(
        bench.list_by_category("compression", true),
        vec!["gzip", "gz", "zlib", "deflate", "flate"]
    );
    let hits = bench.search("sha3-25");
    assert_eq!(hits[0].descriptor.name(), "sha3-256");
}

#[tokio::test]
async fn focus_and_append_are_published() {
    let fixture = ChainFixture::builtins().unwrap();
    let mut bench = fixture.workbench();
    let id = bench.append_stage();
    assert_eq!(id, 1);
    bench.set_focus(1).unwrap();
    assert_eq!(bench.snapshot().focused, 1);
    assert!(matches!(
        bench.set_focus(5),
        Err(CatenaError::StageOutOfRange { index: 5, len: 2 })
    ));

    bench.clear_stage_descriptor(1).unwrap();
    bench.clear_content(0).unwrap();
    assert_eq!(bench.snapshot().stages[0].state, StageState::Empty);
}
