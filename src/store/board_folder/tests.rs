// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Storymap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Storymap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rstest::{fixture, rstest};

use super::{BoardFolder, StoreError, WriteDurability};
use crate::model::{
    BoardId, BoardRecord, Edge, EdgeId, Orientation, Point, Section, SectionId, Task, TaskId,
};
use crate::store::document::{BoardSnapshot, LoadState};

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: std::path::PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("storymap-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

struct BoardFolderTestCtx {
    tmp: TempDir,
    folder: BoardFolder,
}

impl BoardFolderTestCtx {
    fn new(prefix: &str) -> Self {
        let tmp = TempDir::new(prefix);
        let folder = BoardFolder::new(tmp.path().join("my-board"));
        Self { tmp, folder }
    }
}

#[fixture]
fn ctx() -> BoardFolderTestCtx {
    BoardFolderTestCtx::new("board-folder")
}

fn sample_snapshot() -> BoardSnapshot {
    let mut board =
        BoardRecord::new(BoardId::new("b1").unwrap(), "Release plan", "alice");
    board.set_description("Q3 scope");
    board.push_order(Orientation::Vertical, SectionId::new("sx1").unwrap());
    board.push_order(Orientation::Vertical, SectionId::new("sx2").unwrap());
    board.push_order(Orientation::Horizontal, SectionId::new("sy1").unwrap());

    let mut task = Task::new(TaskId::new("t1").unwrap(), Point::new(120.0, 40.0), "Sign-up");
    task.set_section_x(Some(SectionId::new("sx1").unwrap()));
    task.set_section_y(Some(SectionId::new("sy1").unwrap()));
    task.set_estimate(3);
    task.set_link(Some("https://example.test/42"));
    let other = Task::new(TaskId::new("t2").unwrap(), Point::new(640.0, 40.0), "Login");

    BoardSnapshot {
        board,
        sections_x: vec![
            Section::new(SectionId::new("sx1").unwrap(), "Now", Orientation::Vertical, 500.0),
            Section::new(SectionId::new("sx2").unwrap(), "Later", Orientation::Vertical, 300.0),
        ],
        sections_y: vec![Section::new(
            SectionId::new("sy1").unwrap(),
            "Must",
            Orientation::Horizontal,
            400.0,
        )],
        tasks: vec![task, other],
        edges: vec![Edge::new(
            EdgeId::new("e1").unwrap(),
            TaskId::new("t1").unwrap(),
            TaskId::new("t2").unwrap(),
            380.0,
        )],
        rev: 7,
    }
}

#[rstest]
fn save_then_load_round_trips_the_snapshot(ctx: BoardFolderTestCtx) {
    let snapshot = sample_snapshot();
    ctx.folder.save(&snapshot).unwrap();

    let loaded = match ctx.folder.load().unwrap() {
        LoadState::Ready(loaded) => loaded,
        LoadState::Loading => panic!("expected a saved board to load as ready"),
    };

    assert_eq!(loaded.board, snapshot.board);
    assert_eq!(loaded.sections_x, snapshot.sections_x);
    assert_eq!(loaded.sections_y, snapshot.sections_y);
    assert_eq!(loaded.tasks, snapshot.tasks);
    assert_eq!(loaded.edges, snapshot.edges);
    // rev is process-local and not persisted.
    assert_eq!(loaded.rev, 0);
}

#[rstest]
fn load_of_missing_board_resolves_to_loading(ctx: BoardFolderTestCtx) {
    match ctx.folder.load().unwrap() {
        LoadState::Loading => {}
        LoadState::Ready(_) => panic!("expected a missing board file to resolve as loading"),
    }
}

#[rstest]
fn save_overwrites_previous_snapshot_atomically(ctx: BoardFolderTestCtx) {
    let mut snapshot = sample_snapshot();
    ctx.folder.save(&snapshot).unwrap();

    snapshot.board.set_title("Renamed");
    snapshot.tasks.truncate(1);
    ctx.folder.save(&snapshot).unwrap();

    let loaded = ctx.folder.load().unwrap().ready().unwrap();
    assert_eq!(loaded.board.title(), "Renamed");
    assert_eq!(loaded.tasks.len(), 1);

    // No temp files left behind.
    let leftovers = std::fs::read_dir(ctx.folder.root())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(".storymap.tmp."))
        .count();
    assert_eq!(leftovers, 0);
}

#[rstest]
fn durable_save_round_trips(ctx: BoardFolderTestCtx) {
    let folder = BoardFolder::with_durability(
        ctx.tmp.path().join("durable-board"),
        WriteDurability::Durable,
    );
    let snapshot = sample_snapshot();
    folder.save(&snapshot).unwrap();
    assert!(folder.load().unwrap().is_ready());
}

#[rstest]
fn load_rejects_malformed_json(ctx: BoardFolderTestCtx) {
    std::fs::create_dir_all(ctx.folder.root()).unwrap();
    std::fs::write(ctx.folder.board_path(), "{not json").unwrap();

    match ctx.folder.load() {
        Err(StoreError::Json { .. }) => {}
        other => panic!("expected a json error, got {other:?}"),
    }
}

#[rstest]
fn load_rejects_invalid_ids(ctx: BoardFolderTestCtx) {
    std::fs::create_dir_all(ctx.folder.root()).unwrap();
    std::fs::write(
        ctx.folder.board_path(),
        r#"{"board_id": "a/b", "title": "Bad"}"#,
    )
    .unwrap();

    match ctx.folder.load() {
        Err(StoreError::InvalidId { field: "board_id", .. }) => {}
        other => panic!("expected an invalid id error, got {other:?}"),
    }
}

#[rstest]
fn load_tolerates_missing_optional_fields(ctx: BoardFolderTestCtx) {
    std::fs::create_dir_all(ctx.folder.root()).unwrap();
    std::fs::write(
        ctx.folder.board_path(),
        r#"{"board_id": "b1", "title": "Sparse"}"#,
    )
    .unwrap();

    let loaded = ctx.folder.load().unwrap().ready().unwrap();
    assert_eq!(loaded.board.title(), "Sparse");
    assert_eq!(loaded.board.owner(), "");
    assert!(loaded.board.order(Orientation::Vertical).is_empty());
    assert!(loaded.sections_x.is_empty());
    assert!(loaded.tasks.is_empty());
    assert!(loaded.edges.is_empty());
}

#[cfg(unix)]
#[rstest]
fn save_refuses_to_write_through_a_symlink(ctx: BoardFolderTestCtx) {
    std::fs::create_dir_all(ctx.folder.root()).unwrap();
    let target = ctx.tmp.path().join("elsewhere.json");
    std::fs::write(&target, "{}").unwrap();
    std::os::unix::fs::symlink(&target, ctx.folder.board_path()).unwrap();

    match ctx.folder.save(&sample_snapshot()) {
        Err(StoreError::SymlinkRefused { .. }) => {}
        other => panic!("expected a symlink refusal, got {other:?}"),
    }
}
