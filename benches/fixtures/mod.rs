// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Storymap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Storymap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use storymap::layout::AXIS_HEADER_OFFSET;
use storymap::model::{
    BoardId, BoardRecord, Edge, EdgeId, Orientation, Point, Section, SectionId, Task, TaskId,
};
use storymap::store::BoardDocument;

pub fn section_id(prefix: &str, n: usize) -> SectionId {
    SectionId::new(format!("{prefix}:{n}")).expect("section id")
}

pub fn task_id(n: usize) -> TaskId {
    TaskId::new(format!("t:{n}")).expect("task id")
}

pub fn edge_id(n: usize) -> EdgeId {
    EdgeId::new(format!("e:{n}")).expect("edge id")
}

/// Column/row sizes cycle through a small palette so partitions are uneven
/// but reproducible.
pub fn section_size(n: usize) -> f64 {
    [120.0, 260.0, 90.0, 340.0, 180.0][n % 5]
}

pub fn columns(count: usize) -> Vec<Section> {
    (0..count)
        .map(|n| {
            Section::new(section_id("x", n), format!("Step {n}"), Orientation::Vertical, section_size(n))
        })
        .collect()
}

pub fn rows(count: usize) -> Vec<Section> {
    (0..count)
        .map(|n| {
            Section::new(section_id("y", n), format!("Release {n}"), Orientation::Horizontal, section_size(n + 2))
        })
        .collect()
}

/// Tasks scattered across the canvas on a deterministic lattice.
pub fn tasks(count: usize, width: f64, height: f64) -> Vec<Task> {
    (0..count)
        .map(|n| {
            let x = AXIS_HEADER_OFFSET + ((n as f64 * 73.0) % width);
            let y = AXIS_HEADER_OFFSET + ((n as f64 * 131.0) % height);
            let mut task = Task::new(task_id(n), Point::new(x, y), format!("Task {n}"));
            task.set_estimate((n % 8) as u32);
            task
        })
        .collect()
}

/// A chain of edges over consecutive tasks, break point midway between the
/// endpoints.
pub fn edge_chain(tasks: &[Task]) -> Vec<Edge> {
    tasks
        .windows(2)
        .enumerate()
        .map(|(n, pair)| {
            let break_x = (pair[0].position().x + pair[1].position().x) / 2.0;
            Edge::new(
                edge_id(n),
                pair[0].task_id().clone(),
                pair[1].task_id().clone(),
                break_x,
            )
        })
        .collect()
}

/// A fully-populated ready document: `cols` columns, `rws` rows, `n_tasks`
/// tasks and a task-chain of edges.
pub fn board_doc(cols: usize, rws: usize, n_tasks: usize) -> BoardDocument {
    let columns = columns(cols);
    let rows = rows(rws);
    let width: f64 = columns.iter().map(Section::size).sum::<f64>().max(1.0);
    let height: f64 = rows.iter().map(Section::size).sum::<f64>().max(1.0);

    let mut board = BoardRecord::new(BoardId::new("bench").expect("board id"), "Bench", "bench");
    for section in &columns {
        board.push_order(Orientation::Vertical, section.section_id().clone());
    }
    for section in &rows {
        board.push_order(Orientation::Horizontal, section.section_id().clone());
    }

    let doc = BoardDocument::new(board);
    for section in columns {
        doc.sections(Orientation::Vertical).insert(section);
    }
    for section in rows {
        doc.sections(Orientation::Horizontal).insert(section);
    }

    let tasks = tasks(n_tasks, width, height);
    let edges = edge_chain(&tasks);
    for task in tasks {
        doc.tasks().insert(task);
    }
    for edge in edges {
        doc.edges().insert(edge);
    }
    doc
}
