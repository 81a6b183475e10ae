// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Storymap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Storymap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Storymap — local-first story-mapping board core.
//!
//! The crate owns the board data model, the sectioned-canvas layout engine
//! (interval partitions, position mapping, incremental shifts), the mutation
//! applier, and the synced store the UI layers sit on top of.

pub mod aggregate;
pub mod layout;
pub mod model;
pub mod ops;
pub mod store;

pub use aggregate::{BoardAggregate, ResizeDrag, TaskFields};
