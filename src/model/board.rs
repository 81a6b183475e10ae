// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Storymap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Storymap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{BoardId, SectionId};
use super::section::Orientation;

/// The board record: metadata plus the two canonical section order lists.
///
/// `x_order`/`y_order` are the single source of truth for section sequence.
/// They hold ids only; the section records themselves live in the store's
/// section collections, and an id with no matching record is dropped when
/// the ordered list is dereferenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRecord {
    board_id: BoardId,
    title: String,
    description: String,
    owner: String,
    x_order: Vec<SectionId>,
    y_order: Vec<SectionId>,
}

impl BoardRecord {
    pub fn new(board_id: BoardId, title: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            board_id,
            title: title.into(),
            description: String::new(),
            owner: owner.into(),
            x_order: Vec::new(),
            y_order: Vec::new(),
        }
    }

    pub fn board_id(&self) -> &BoardId {
        &self.board_id
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

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn set_owner(&mut self, owner: impl Into<String>) {
        self.owner = owner.into();
    }

    pub fn order(&self, orientation: Orientation) -> &[SectionId] {
        match orientation {
            Orientation::Vertical => &self.x_order,
            Orientation::Horizontal => &self.y_order,
        }
    }

    fn order_mut(&mut self, orientation: Orientation) -> &mut Vec<SectionId> {
        match orientation {
            Orientation::Vertical => &mut self.x_order,
            Orientation::Horizontal => &mut self.y_order,
        }
    }

    pub fn push_order(&mut self, orientation: Orientation, section_id: SectionId) {
        self.order_mut(orientation).push(section_id);
    }

    /// Splices the id into the order list, clamping the index to the list end.
    pub fn splice_order(&mut self, orientation: Orientation, index: usize, section_id: SectionId) {
        let order = self.order_mut(orientation);
        let index = index.min(order.len());
        order.insert(index, section_id);
    }

    /// Removes every occurrence of the id; returns whether anything was removed.
    pub fn remove_order(&mut self, orientation: Orientation, section_id: &SectionId) -> bool {
        let order = self.order_mut(orientation);
        let before = order.len();
        order.retain(|id| id != section_id);
        order.len() != before
    }

    pub fn set_order(&mut self, orientation: Orientation, order: Vec<SectionId>) {
        *self.order_mut(orientation) = order;
    }
}
