// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Storymap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Storymap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// A point on the board canvas, in continuous canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
