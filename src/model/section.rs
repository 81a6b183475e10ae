// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Storymap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Storymap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::ids::SectionId;

/// Which way a section partitions the board.
///
/// Vertical sections are columns (they partition the X axis); horizontal
/// sections are rows (they partition the Y axis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// The canvas axis a section's boundaries move along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Orientation {
    pub fn axis(self) -> Axis {
        match self {
            Self::Vertical => Axis::X,
            Self::Horizontal => Axis::Y,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => f.write_str("horizontal"),
            Self::Vertical => f.write_str("vertical"),
        }
    }
}

/// A named, sized segment partitioning the board along one orientation.
///
/// Sections carry their own size and identity; their *order* lives on the
/// board record's order lists, never here.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    section_id: SectionId,
    name: String,
    orientation: Orientation,
    size: f64,
}

impl Section {
    pub fn new(
        section_id: SectionId,
        name: impl Into<String>,
        orientation: Orientation,
        size: f64,
    ) -> Self {
        Self {
            section_id,
            name: name.into(),
            orientation,
            size: size.max(0.0),
        }
    }

    pub fn section_id(&self) -> &SectionId {
        &self.section_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    /// Sizes are clamped to be non-negative; a zero-size section is a
    /// degenerate (empty) interval, not an error.
    pub fn set_size(&mut self, size: f64) {
        self.size = size.max(0.0);
    }
}
