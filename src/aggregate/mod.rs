// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Storymap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Storymap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Board facade consumed by dialogs and pointer-drag handlers.
//!
//! [`BoardAggregate`] owns the [`BoardDocument`], derives the interval
//! partition for each axis lazily (memoized against the document revision)
//! and exposes every board mutation as one cohesive call. Drag gestures go
//! through [`BoardAggregate::begin_resize`], which captures a [`ResizeDrag`]
//! snapshot that every subsequent move resolves against.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Mutex;

use crate::layout::{
    capture_resize, map_to_sections, partition_sections, Interval, ResizePlan, SectionHit,
    AXIS_HEADER_OFFSET,
};
use crate::model::{Id, EdgeId, Orientation, Point, SectionId, TaskId, TaskPatch};
use crate::ops::{self, Delta, EdgeOp, EdgeTarget, Op, SectionOp, TaskOp};
use crate::store::{BoardDocument, BoardSnapshot, LoadState};

/// Dialog-entered fields for a new task card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub estimate: u32,
    pub link: Option<String>,
}

/// Partitions derived at a known document revision.
#[derive(Debug, Clone)]
struct PartitionCache {
    rev: u64,
    x: Vec<Interval>,
    y: Vec<Interval>,
}

/// An in-flight boundary drag.
///
/// Holds the plan captured at drag start; dropping the value ends the
/// gesture. There is no commit or rollback step, the last applied move is
/// final.
#[derive(Debug, Clone)]
pub struct ResizeDrag {
    plan: ResizePlan,
}

impl ResizeDrag {
    pub fn section_id(&self) -> &SectionId {
        self.plan.section_id()
    }

    pub fn plan(&self) -> &ResizePlan {
        &self.plan
    }
}

pub struct BoardAggregate {
    doc: BoardDocument,
    partitions: Mutex<Option<PartitionCache>>,
    next_id: AtomicU64,
}

impl BoardAggregate {
    pub fn new(doc: BoardDocument) -> Self {
        Self {
            doc,
            partitions: Mutex::new(None),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn document(&self) -> &BoardDocument {
        &self.doc
    }

    pub fn snapshot(&self) -> LoadState<BoardSnapshot> {
        self.doc.snapshot()
    }

    /// Current interval partition for one axis.
    ///
    /// Recomputed only when the document revision moved since the last call;
    /// both axes are derived together so a single cache entry stays
    /// consistent.
    pub fn partition(&self, orientation: Orientation) -> Vec<Interval> {
        let rev = self.doc.rev();
        let mut cache = self.partitions.lock().expect("partition cache lock poisoned");
        let stale = cache.as_ref().map(|c| c.rev != rev).unwrap_or(true);
        if stale {
            *cache = Some(PartitionCache {
                rev,
                x: self.derive_partition(Orientation::Vertical),
                y: self.derive_partition(Orientation::Horizontal),
            });
        }
        let cached = cache.as_ref().expect("partition cache populated above");
        match orientation {
            Orientation::Vertical => cached.x.clone(),
            Orientation::Horizontal => cached.y.clone(),
        }
    }

    /// Maps a canvas point to the section it falls into on each axis.
    pub fn hit_test(&self, point: Point) -> SectionHit {
        let px = self.partition(Orientation::Vertical);
        let py = self.partition(Orientation::Horizontal);
        map_to_sections(&px, &py, point)
    }

    fn derive_partition(&self, orientation: Orientation) -> Vec<Interval> {
        let sections = self.doc.ordered_sections(orientation);
        partition_sections(&sections, AXIS_HEADER_OFFSET)
    }

    // ---- sections ----

    pub fn insert_section(
        &self,
        orientation: Orientation,
        index: usize,
        name: impl Into<String>,
    ) -> (SectionId, Delta) {
        let section_id = self.alloc_section_id();
        let delta = ops::apply(
            &self.doc,
            &Op::Section(SectionOp::Insert {
                section_id: section_id.clone(),
                orientation,
                index,
                name: name.into(),
            }),
        );
        (section_id, delta)
    }

    /// One-shot resize outside a drag gesture.
    pub fn resize_section(
        &self,
        section_id: &SectionId,
        orientation: Orientation,
        boundary: f64,
    ) -> Delta {
        ops::apply(
            &self.doc,
            &Op::Section(SectionOp::Resize {
                section_id: section_id.clone(),
                orientation,
                boundary,
            }),
        )
    }

    pub fn delete_section(&self, section_id: &SectionId) -> Delta {
        ops::apply(
            &self.doc,
            &Op::Section(SectionOp::Delete { section_id: section_id.clone() }),
        )
    }

    /// Starts a boundary drag on the section's trailing edge.
    ///
    /// Returns `None` when the document is not loaded or the section is not
    /// part of the given axis order.
    pub fn begin_resize(
        &self,
        section_id: &SectionId,
        orientation: Orientation,
    ) -> Option<ResizeDrag> {
        if !self.doc.is_ready() {
            return None;
        }
        let intervals = self.partition(orientation);
        let tasks = self.doc.tasks().all();
        let edges = self.doc.edges().all();
        let plan = capture_resize(
            &intervals,
            section_id,
            &tasks,
            &edges,
            orientation.axis(),
        )?;
        Some(ResizeDrag { plan })
    }

    /// Applies one drag-move. Safe to call for every pointer move; each call
    /// resolves against the drag-start snapshot, so moves never compound.
    pub fn resize_to(&self, drag: &ResizeDrag, boundary: f64) -> Delta {
        ops::apply_resize_plan(&self.doc, &drag.plan, boundary)
    }

    // ---- tasks ----

    pub fn insert_task(&self, position: Point, fields: TaskFields) -> (TaskId, Delta) {
        let task_id = self.alloc_task_id();
        let delta = ops::apply(
            &self.doc,
            &Op::Task(TaskOp::Insert {
                task_id: task_id.clone(),
                position,
                title: fields.title,
                description: fields.description,
                estimate: fields.estimate,
                link: fields.link,
            }),
        );
        (task_id, delta)
    }

    pub fn update_task_position(&self, task_id: &TaskId, position: Point) -> Delta {
        ops::apply(
            &self.doc,
            &Op::Task(TaskOp::Move { task_id: task_id.clone(), position }),
        )
    }

    pub fn update_task(&self, task_id: &TaskId, patch: TaskPatch) -> Delta {
        ops::apply(
            &self.doc,
            &Op::Task(TaskOp::Update { task_id: task_id.clone(), patch }),
        )
    }

    pub fn delete_task(&self, task_id: &TaskId) -> Delta {
        ops::apply(&self.doc, &Op::Task(TaskOp::Delete { task_id: task_id.clone() }))
    }

    // ---- edges ----

    pub fn insert_edge(&self, source_task_id: &TaskId, target: EdgeTarget) -> (EdgeId, Delta) {
        let edge_id = self.alloc_edge_id();
        let delta = ops::apply(
            &self.doc,
            &Op::Edge(EdgeOp::Insert {
                edge_id: edge_id.clone(),
                source_task_id: source_task_id.clone(),
                target,
            }),
        );
        (edge_id, delta)
    }

    pub fn update_edge_break(&self, edge_id: &EdgeId, break_x: f64) -> Delta {
        ops::apply(
            &self.doc,
            &Op::Edge(EdgeOp::SetBreak { edge_id: edge_id.clone(), break_x }),
        )
    }

    pub fn delete_edge(&self, edge_id: &EdgeId) -> Delta {
        ops::apply(&self.doc, &Op::Edge(EdgeOp::Delete { edge_id: edge_id.clone() }))
    }

    // ---- board metadata ----

    pub fn set_title(&self, title: impl Into<String>) -> bool {
        self.doc.set_title(title)
    }

    pub fn set_description(&self, description: impl Into<String>) -> bool {
        self.doc.set_description(description)
    }

    pub fn set_owner(&self, owner: impl Into<String>) -> bool {
        self.doc.set_owner(owner)
    }

    // ---- id allocation ----

    fn alloc_section_id(&self) -> SectionId {
        self.alloc_id("s", |raw| {
            self.doc.sections(Orientation::Vertical).contains(raw)
                || self.doc.sections(Orientation::Horizontal).contains(raw)
        })
    }

    fn alloc_task_id(&self) -> TaskId {
        self.alloc_id("t", |raw| self.doc.tasks().contains(raw))
    }

    fn alloc_edge_id(&self) -> EdgeId {
        self.alloc_id("e", |raw| self.doc.edges().contains(raw))
    }

    /// Sequential ids with a collision probe, so hydrating a document that
    /// already holds `t:1` never hands out `t:1` again.
    fn alloc_id<T>(&self, prefix: &str, taken: impl Fn(&Id<T>) -> bool) -> Id<T> {
        loop {
            let n = self.next_id.fetch_add(1, AtomicOrdering::Relaxed);
            let candidate = Id::new(format!("{prefix}:{n}"))
                .expect("generated ids are non-empty and slash-free");
            if !taken(&candidate) {
                return candidate;
            }
        }
    }
}

impl std::fmt::Debug for BoardAggregate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardAggregate")
            .field("rev", &self.doc.rev())
            .finish_non_exhaustive()
    }
}
