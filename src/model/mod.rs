// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Storymap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Storymap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core board data model.
//!
//! Boards own two ordered section lists (columns along X, rows along Y) plus
//! collections of tasks and edges; everything here is plain data with no
//! store or layout knowledge.

pub mod board;
pub mod edge;
pub mod ids;
pub mod point;
pub mod section;
pub mod task;

pub use board::BoardRecord;
pub use edge::Edge;
pub use ids::{BoardId, EdgeId, Id, IdError, SectionId, TaskId};
pub use point::Point;
pub use section::{Axis, Orientation, Section};
pub use task::{Task, TaskPatch};
