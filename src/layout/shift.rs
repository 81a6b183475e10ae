// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Storymap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Storymap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Shift calculator: pure classification of which entities lie beyond a
//! section boundary, and by how much a boundary change moves them.
//!
//! All functions here read a snapshot of tasks/edges and compute; writing
//! the results back is the ops module's job.

use smallvec::SmallVec;

use crate::model::{Axis, Edge, EdgeId, Section, SectionId, Task, TaskId};

use super::partition::Interval;
use super::RESIZE_MARGIN;

/// Captured `{id -> coordinate}` pairs for entities beyond a boundary, plus
/// the uniform delta to apply to them.
///
/// Coordinates are the values at capture time; appliers write
/// `captured + amount` absolutely so re-applying the same plan is idempotent
/// at the data level.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityShifts {
    pub threshold: f64,
    pub amount: f64,
    pub tasks: SmallVec<[(TaskId, f64); 8]>,
    pub edges: SmallVec<[(EdgeId, f64); 4]>,
}

impl EntityShifts {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.edges.is_empty()
    }
}

fn task_coord(task: &Task, axis: Axis) -> f64 {
    match axis {
        Axis::X => task.position().x,
        Axis::Y => task.position().y,
    }
}

/// Collects all entities strictly beyond `threshold` along `axis`.
///
/// Entities exactly at the boundary stay with the earlier segment (strict
/// `>`). Edge break points only live on the X axis, so edges never
/// participate in Y-axis shifts.
pub fn collect_beyond(
    tasks: &[Task],
    edges: &[Edge],
    axis: Axis,
    threshold: f64,
    amount: f64,
) -> EntityShifts {
    let mut shifts = EntityShifts {
        threshold,
        amount,
        ..EntityShifts::default()
    };

    for task in tasks {
        let coord = task_coord(task, axis);
        if coord > threshold {
            shifts.tasks.push((task.task_id().clone(), coord));
        }
    }

    if axis == Axis::X {
        for edge in edges {
            if edge.break_x() > threshold {
                shifts.edges.push((edge.edge_id().clone(), edge.break_x()));
            }
        }
    }

    shifts
}

/// Shift plan for inserting a new segment at `index` into an ordered
/// partition.
///
/// The new segment takes over the start offset of the segment currently at
/// `index`, so everything strictly beyond that offset moves by the new
/// segment's size. Inserting at the end shifts nothing; an empty partition
/// starts at the base offset.
pub fn insert_plan(
    intervals: &[Interval],
    index: usize,
    base_offset: f64,
    new_size: f64,
    tasks: &[Task],
    edges: &[Edge],
    axis: Axis,
) -> EntityShifts {
    let threshold = match intervals.get(index) {
        Some(interval) => interval.start(),
        None => intervals.last().map_or(base_offset, Interval::end),
    };
    collect_beyond(tasks, edges, axis, threshold, new_size)
}

/// Shift plan for deleting the segment backing `section`.
///
/// Everything strictly beyond the deleted segment's end offset moves back by
/// the segment's own size. Returns `None` when the section is not part of
/// the partition (missing-reference no-op).
pub fn delete_plan(
    intervals: &[Interval],
    section: &Section,
    tasks: &[Task],
    edges: &[Edge],
    axis: Axis,
) -> Option<EntityShifts> {
    let interval = intervals
        .iter()
        .find(|interval| interval.section_id() == section.section_id())?;
    Some(collect_beyond(
        tasks,
        edges,
        axis,
        interval.end(),
        -interval.size(),
    ))
}

/// Snapshot captured when a boundary drag begins.
///
/// The plan pins the boundary's start position, the largest coordinate among
/// entities staying behind the boundary (plus a drag margin), and the
/// original coordinates of everything beyond. Every subsequent drag-move
/// resolves against this capture, never against already-shifted positions.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizePlan {
    section_id: SectionId,
    axis: Axis,
    section_start: f64,
    start_position: f64,
    max_not_dragged: f64,
    beyond: EntityShifts,
}

/// One resolved drag-move: the clamped boundary, the segment's new size, and
/// the uniform shift relative to the drag start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedResize {
    pub boundary: f64,
    pub new_size: f64,
    pub shift: f64,
}

impl ResizePlan {
    pub fn section_id(&self) -> &SectionId {
        &self.section_id
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn section_start(&self) -> f64 {
        self.section_start
    }

    pub fn start_position(&self) -> f64 {
        self.start_position
    }

    pub fn max_not_dragged(&self) -> f64 {
        self.max_not_dragged
    }

    pub fn beyond(&self) -> &EntityShifts {
        &self.beyond
    }

    /// Clamps the requested boundary and derives the segment size and shift.
    ///
    /// The clamp keeps the boundary from being dragged past entities it does
    /// not own, so the segment can never shrink below the space its own
    /// entities occupy.
    pub fn resolve(&self, boundary: f64) -> ResolvedResize {
        let boundary = boundary.max(self.max_not_dragged);
        ResolvedResize {
            boundary,
            new_size: boundary - self.section_start,
            shift: boundary - self.start_position,
        }
    }
}

/// Captures a resize plan for the boundary at the end of `section`.
///
/// Returns `None` when the section is not part of the partition.
pub fn capture_resize(
    intervals: &[Interval],
    section_id: &SectionId,
    tasks: &[Task],
    edges: &[Edge],
    axis: Axis,
) -> Option<ResizePlan> {
    let interval = intervals
        .iter()
        .find(|interval| interval.section_id() == section_id)?;
    let start_position = interval.end();

    let mut max_behind = interval.start();
    for task in tasks {
        let coord = task_coord(task, axis);
        if coord <= start_position && coord > max_behind {
            max_behind = coord;
        }
    }
    if axis == Axis::X {
        for edge in edges {
            if edge.break_x() <= start_position && edge.break_x() > max_behind {
                max_behind = edge.break_x();
            }
        }
    }

    Some(ResizePlan {
        section_id: section_id.clone(),
        axis,
        section_start: interval.start(),
        start_position,
        max_not_dragged: max_behind + RESIZE_MARGIN,
        beyond: collect_beyond(tasks, edges, axis, start_position, 0.0),
    })
}
