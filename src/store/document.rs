// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Storymap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Storymap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::model::{BoardRecord, Edge, Orientation, Section, SectionId, Task};

use super::collection::{Subscription, SyncedCollection};

/// Resolution state of a shared document.
///
/// An unresolved or partially loaded document is absence, not an error;
/// consumers match on `Loading` instead of poking nullable fields.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
}

impl<T> LoadState<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Loading => None,
            Self::Ready(value) => Some(value),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// A fully-resolved copy of the document's state at one revision.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot {
    pub board: BoardRecord,
    pub sections_x: Vec<Section>,
    pub sections_y: Vec<Section>,
    pub tasks: Vec<Task>,
    pub edges: Vec<Edge>,
    pub rev: u64,
}

type DocCallback = Arc<dyn Fn(&LoadState<BoardSnapshot>) + Send + Sync>;
type DocSubscriberList = Arc<Mutex<Vec<(u64, DocCallback)>>>;

#[derive(Clone)]
struct DocShared {
    board: Arc<Mutex<Option<BoardRecord>>>,
    sections_x: SyncedCollection<Section>,
    sections_y: SyncedCollection<Section>,
    tasks: SyncedCollection<Task>,
    edges: SyncedCollection<Edge>,
    rev: Arc<AtomicU64>,
    subscribers: DocSubscriberList,
}

impl DocShared {
    fn snapshot(&self) -> LoadState<BoardSnapshot> {
        let board = self.board.lock().expect("board lock poisoned").clone();
        match board {
            None => LoadState::Loading,
            Some(board) => LoadState::Ready(BoardSnapshot {
                board,
                sections_x: self.sections_x.all(),
                sections_y: self.sections_y.all(),
                tasks: self.tasks.all(),
                edges: self.edges.all(),
                rev: self.rev.load(Ordering::SeqCst),
            }),
        }
    }

    fn touch(&self) {
        self.rev.fetch_add(1, Ordering::SeqCst);
        let callbacks = self
            .subscribers
            .lock()
            .expect("document subscribers lock poisoned")
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect::<Vec<_>>();
        if callbacks.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for callback in callbacks {
            callback(&snapshot);
        }
    }
}

/// The synced backing store for one board: the board record plus the four
/// entity collections, with document-level change subscriptions.
///
/// Collection mutations bubble up: every committed batch on any collection
/// bumps the document revision and re-delivers a fully-resolved snapshot to
/// document subscribers. Board-record mutations go through the document's
/// own mutators and do the same.
pub struct BoardDocument {
    shared: DocShared,
    next_subscriber: AtomicU64,
    _collection_subs: Vec<Subscription>,
}

impl BoardDocument {
    /// A document whose board record has not resolved yet.
    pub fn loading() -> Self {
        Self::build(None)
    }

    /// A document seeded with a resolved board record.
    pub fn new(board: BoardRecord) -> Self {
        Self::build(Some(board))
    }

    fn build(board: Option<BoardRecord>) -> Self {
        let shared = DocShared {
            board: Arc::new(Mutex::new(board)),
            sections_x: SyncedCollection::new(),
            sections_y: SyncedCollection::new(),
            tasks: SyncedCollection::new(),
            edges: SyncedCollection::new(),
            rev: Arc::new(AtomicU64::new(0)),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        };

        let forward = {
            let shared = shared.clone();
            move || shared.touch()
        };
        let collection_subs = vec![
            shared.sections_x.subscribe(forward.clone()),
            shared.sections_y.subscribe(forward.clone()),
            shared.tasks.subscribe(forward.clone()),
            shared.edges.subscribe(forward),
        ];

        Self {
            shared,
            next_subscriber: AtomicU64::new(0),
            _collection_subs: collection_subs,
        }
    }

    /// Seeds a loading (or stale) document with a resolved snapshot.
    pub fn hydrate(&self, snapshot: BoardSnapshot) {
        for section in snapshot.sections_x {
            self.shared.sections_x.insert(section);
        }
        for section in snapshot.sections_y {
            self.shared.sections_y.insert(section);
        }
        for task in snapshot.tasks {
            self.shared.tasks.insert(task);
        }
        for edge in snapshot.edges {
            self.shared.edges.insert(edge);
        }
        *self.shared.board.lock().expect("board lock poisoned") = Some(snapshot.board);
        self.shared.touch();
    }

    pub fn rev(&self) -> u64 {
        self.shared.rev.load(Ordering::SeqCst)
    }

    pub fn is_ready(&self) -> bool {
        self.shared.board.lock().expect("board lock poisoned").is_some()
    }

    pub fn board(&self) -> Option<BoardRecord> {
        self.shared.board.lock().expect("board lock poisoned").clone()
    }

    pub fn tasks(&self) -> &SyncedCollection<Task> {
        &self.shared.tasks
    }

    pub fn edges(&self) -> &SyncedCollection<Edge> {
        &self.shared.edges
    }

    pub fn sections(&self, orientation: Orientation) -> &SyncedCollection<Section> {
        match orientation {
            Orientation::Vertical => &self.shared.sections_x,
            Orientation::Horizontal => &self.shared.sections_y,
        }
    }

    /// Dereferences the board's order list against the matching section
    /// collection. Ids with no record are dropped silently; stale ids in the
    /// order list are an inconsistency the store tolerates.
    pub fn ordered_sections(&self, orientation: Orientation) -> Vec<Section> {
        let Some(board) = self.board() else {
            return Vec::new();
        };
        let collection = self.sections(orientation);
        board
            .order(orientation)
            .iter()
            .filter_map(|section_id| collection.get(section_id))
            .collect()
    }

    fn with_board_mut(&self, mutate: impl FnOnce(&mut BoardRecord)) -> bool {
        let mutated = {
            let mut board = self.shared.board.lock().expect("board lock poisoned");
            match board.as_mut() {
                Some(board) => {
                    mutate(board);
                    true
                }
                None => false,
            }
        };
        if mutated {
            self.shared.touch();
        }
        mutated
    }

    pub fn set_title(&self, title: impl Into<String>) -> bool {
        let title = title.into();
        self.with_board_mut(|board| board.set_title(title))
    }

    pub fn set_description(&self, description: impl Into<String>) -> bool {
        let description = description.into();
        self.with_board_mut(|board| board.set_description(description))
    }

    pub fn set_owner(&self, owner: impl Into<String>) -> bool {
        let owner = owner.into();
        self.with_board_mut(|board| board.set_owner(owner))
    }

    pub fn push_order(&self, orientation: Orientation, section_id: SectionId) -> bool {
        self.with_board_mut(|board| board.push_order(orientation, section_id))
    }

    pub fn splice_order(
        &self,
        orientation: Orientation,
        index: usize,
        section_id: SectionId,
    ) -> bool {
        self.with_board_mut(|board| board.splice_order(orientation, index, section_id))
    }

    pub fn remove_order(&self, orientation: Orientation, section_id: &SectionId) -> bool {
        let mut removed = false;
        let mutated = self.with_board_mut(|board| {
            removed = board.remove_order(orientation, section_id);
        });
        mutated && removed
    }

    pub fn snapshot(&self) -> LoadState<BoardSnapshot> {
        self.shared.snapshot()
    }

    /// Registers a document subscriber; it receives a fully-resolved
    /// snapshot (or `Loading`) after every committed mutation batch.
    pub fn subscribe(
        &self,
        callback: impl Fn(&LoadState<BoardSnapshot>) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.next_subscriber.fetch_add(1, Ordering::Relaxed);
        self.shared
            .subscribers
            .lock()
            .expect("document subscribers lock poisoned")
            .push((id, Arc::new(callback)));

        let subscribers: Weak<_> = Arc::downgrade(&self.shared.subscribers);
        Subscription::new(move || {
            if let Some(subscribers) = subscribers.upgrade() {
                subscribers
                    .lock()
                    .expect("document subscribers lock poisoned")
                    .retain(|(sub_id, _)| *sub_id != id);
            }
        })
    }
}

impl std::fmt::Debug for BoardDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardDocument")
            .field("ready", &self.is_ready())
            .field("rev", &self.rev())
            .finish_non_exhaustive()
    }
}
