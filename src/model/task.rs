// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Storymap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Storymap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{SectionId, TaskId};
use super::point::Point;

/// A task card on the board canvas.
///
/// `section_x`/`section_y` are derived foreign keys: they are recomputed from
/// the task's position whenever it crosses a section boundary, and are `None`
/// when the position falls outside the partition along that axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    task_id: TaskId,
    position: Point,
    section_x: Option<SectionId>,
    section_y: Option<SectionId>,
    title: String,
    description: String,
    estimate: u32,
    link: Option<String>,
}

impl Task {
    pub fn new(task_id: TaskId, position: Point, title: impl Into<String>) -> Self {
        Self {
            task_id,
            position,
            section_x: None,
            section_y: None,
            title: title.into(),
            description: String::new(),
            estimate: 0,
            link: None,
        }
    }

    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn section_x(&self) -> Option<&SectionId> {
        self.section_x.as_ref()
    }

    pub fn section_y(&self) -> Option<&SectionId> {
        self.section_y.as_ref()
    }

    pub fn set_section_x(&mut self, section_x: Option<SectionId>) {
        self.section_x = section_x;
    }

    pub fn set_section_y(&mut self, section_y: Option<SectionId>) {
        self.section_y = section_y;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn estimate(&self) -> u32 {
        self.estimate
    }

    pub fn set_estimate(&mut self, estimate: u32) {
        self.estimate = estimate;
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn set_link<T: Into<String>>(&mut self, link: Option<T>) {
        self.link = link.map(Into::into);
    }

    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.set_title(title.clone());
        }
        if let Some(description) = &patch.description {
            self.set_description(description.clone());
        }
        if let Some(estimate) = patch.estimate {
            self.set_estimate(estimate);
        }
        if let Some(link) = &patch.link {
            self.link = link.clone();
        }
    }
}

/// Partial update for dialog-driven task edits.
///
/// `link` uses a nested `Option` so a patch can distinguish "leave the link
/// alone" from "clear the link".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimate: Option<u32>,
    pub link: Option<Option<String>>,
}
