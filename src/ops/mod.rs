// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Storymap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Storymap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for boards.
//!
//! One op is one user gesture: a structural change plus its cascaded
//! coordinate shifts, applied against the backing document as batches and
//! reported as a minimal delta. Defensive failures (missing ids, duplicate
//! edges, unresolved documents) degrade to an empty delta rather than an
//! error.

use std::collections::{BTreeMap, HashSet};

use crate::layout::{
    capture_resize, delete_plan, insert_plan, map_to_sections, partition_sections, Interval,
    ResizePlan, AXIS_HEADER_OFFSET, NEW_SECTION_SIZE, TASK_CARD_HEIGHT, TASK_CARD_WIDTH,
};
use crate::model::{
    Axis, Edge, EdgeId, Orientation, Point, Section, SectionId, Task, TaskId, TaskPatch,
};
use crate::store::BoardDocument;

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Section(SectionOp),
    Task(TaskOp),
    Edge(EdgeOp),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionOp {
    /// Splices a new section into the order list at `index`; everything from
    /// the displaced segment on shifts by the new section's size.
    Insert {
        section_id: SectionId,
        orientation: Orientation,
        index: usize,
        name: String,
    },
    /// One-shot boundary move: captures a resize plan at the current state
    /// and applies it for `boundary`.
    Resize {
        section_id: SectionId,
        orientation: Orientation,
        boundary: f64,
    },
    /// Removes the section; everything beyond its end shifts back by its
    /// size.
    Delete { section_id: SectionId },
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskOp {
    Insert {
        task_id: TaskId,
        position: Point,
        title: String,
        description: String,
        estimate: u32,
        link: Option<String>,
    },
    Move {
        task_id: TaskId,
        position: Point,
    },
    Update {
        task_id: TaskId,
        patch: TaskPatch,
    },
    Delete {
        task_id: TaskId,
    },
}

/// Target of an edge insert: an explicit task (dialog path) or a drop point
/// resolved against task cards (pointer path). Both paths share one applier,
/// so the duplicate-pair check is enforced uniformly.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeTarget {
    Task(TaskId),
    Point(Point),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EdgeOp {
    Insert {
        edge_id: EdgeId,
        source_task_id: TaskId,
        target: EdgeTarget,
    },
    SetBreak {
        edge_id: EdgeId,
        break_x: f64,
    },
    Delete {
        edge_id: EdgeId,
    },
}

/// A reference to one board entity, for delta reporting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityRef {
    Section(SectionId),
    Task(TaskId),
    Edge(EdgeId),
}

/// Minimal delta describing which entities changed as the result of one op.
///
/// This is intentionally coarse: an empty delta means the op was a no-op,
/// whether because there was nothing to do or because a defensive check
/// declined it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<EntityRef>,
    pub removed: Vec<EntityRef>,
    pub updated: Vec<EntityRef>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: HashSet<EntityRef>,
    removed: HashSet<EntityRef>,
    updated: HashSet<EntityRef>,
}

impl DeltaBuilder {
    fn record_added(&mut self, entity_ref: EntityRef) {
        self.removed.remove(&entity_ref);
        self.updated.remove(&entity_ref);
        self.added.insert(entity_ref);
    }

    fn record_removed(&mut self, entity_ref: EntityRef) {
        self.added.remove(&entity_ref);
        self.updated.remove(&entity_ref);
        self.removed.insert(entity_ref);
    }

    fn record_updated(&mut self, entity_ref: EntityRef) {
        if self.added.contains(&entity_ref) || self.removed.contains(&entity_ref) {
            return;
        }
        self.updated.insert(entity_ref);
    }

    fn finish(self) -> Delta {
        let mut added = self.added.into_iter().collect::<Vec<_>>();
        let mut removed = self.removed.into_iter().collect::<Vec<_>>();
        let mut updated = self.updated.into_iter().collect::<Vec<_>>();

        added.sort();
        removed.sort();
        updated.sort();

        Delta { added, removed, updated }
    }
}

/// Applies one op against the document as a single logical gesture.
pub fn apply(doc: &BoardDocument, op: &Op) -> Delta {
    if !doc.is_ready() {
        return Delta::default();
    }

    let mut delta = DeltaBuilder::default();
    match op {
        Op::Section(section_op) => apply_section_op(doc, section_op, &mut delta),
        Op::Task(task_op) => apply_task_op(doc, task_op, &mut delta),
        Op::Edge(edge_op) => apply_edge_op(doc, edge_op, &mut delta),
    }
    delta.finish()
}

/// Applies one drag-move of a captured resize plan.
///
/// The plan's snapshot, not the current state, is the basis for every shift,
/// so repeated moves of the same drag never compound. Used by
/// `SectionOp::Resize` and by the aggregate's drag state machine.
pub fn apply_resize_plan(doc: &BoardDocument, plan: &ResizePlan, boundary: f64) -> Delta {
    if !doc.is_ready() {
        return Delta::default();
    }

    let mut delta = DeltaBuilder::default();
    apply_resize_plan_inner(doc, plan, boundary, &mut delta);
    delta.finish()
}

// Extracted op-application implementation for section/task/edge mutations.
include!("ops_impl.rs");
