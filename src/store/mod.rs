// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Storymap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Storymap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Synced backing store for boards.
//!
//! A `BoardDocument` holds the board record plus its task/edge/section
//! collections with change subscriptions; `BoardFolder` persists snapshots
//! on disk as a single JSON file.

pub mod board_folder;
pub mod collection;
pub mod document;

pub use board_folder::{BoardFolder, StoreError, WriteDurability};
pub use collection::{Record, Subscription, SyncedCollection};
pub use document::{BoardDocument, BoardSnapshot, LoadState};
