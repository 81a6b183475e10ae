// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Storymap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Storymap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{EdgeId, TaskId};

/// A right-angle connection between two tasks.
///
/// `break_x` is the X coordinate of the edge's vertical routing segment; it
/// shifts with the sections it crosses, like a task's X position does.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    edge_id: EdgeId,
    source_task_id: TaskId,
    target_task_id: TaskId,
    break_x: f64,
}

impl Edge {
    pub fn new(edge_id: EdgeId, source_task_id: TaskId, target_task_id: TaskId, break_x: f64) -> Self {
        Self {
            edge_id,
            source_task_id,
            target_task_id,
            break_x,
        }
    }

    pub fn edge_id(&self) -> &EdgeId {
        &self.edge_id
    }

    pub fn source_task_id(&self) -> &TaskId {
        &self.source_task_id
    }

    pub fn target_task_id(&self) -> &TaskId {
        &self.target_task_id
    }

    pub fn break_x(&self) -> f64 {
        self.break_x
    }

    pub fn set_break_x(&mut self, break_x: f64) {
        self.break_x = break_x;
    }

    /// True when this edge touches the given task at either end.
    pub fn is_incident_to(&self, task_id: &TaskId) -> bool {
        &self.source_task_id == task_id || &self.target_task_id == task_id
    }

    /// True when this edge connects the given unordered pair.
    pub fn connects_pair(&self, a: &TaskId, b: &TaskId) -> bool {
        (&self.source_task_id == a && &self.target_task_id == b)
            || (&self.source_task_id == b && &self.target_task_id == a)
    }
}
