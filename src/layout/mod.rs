// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Storymap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Storymap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Board geometric layout: interval partitions, point-to-section mapping,
//! and the incremental shift calculator.

pub mod mapper;
pub mod partition;
pub mod shift;

pub use mapper::{map_to_sections, map_to_segment, SectionHit};
pub use partition::{partition, partition_sections, Interval};
pub use shift::{
    capture_resize, collect_beyond, delete_plan, insert_plan, EntityShifts, ResizePlan,
    ResolvedResize,
};

/// Base offset of every axis partition; reserves margin for axis headers.
pub const AXIS_HEADER_OFFSET: f64 = 80.0;

/// Size given to a freshly inserted section.
pub const NEW_SECTION_SIZE: f64 = 500.0;

/// Clearance kept between a dragged boundary and the entities behind it.
pub const RESIZE_MARGIN: f64 = 10.0;

/// Hit-test extent of a task card, for resolving point-targeted edge drops.
pub const TASK_CARD_WIDTH: f64 = 160.0;
pub const TASK_CARD_HEIGHT: f64 = 90.0;
