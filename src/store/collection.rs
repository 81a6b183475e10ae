// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Storymap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Storymap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::model::{Edge, EdgeId, Section, SectionId, Task, TaskId};

/// A key-addressed record a synced collection can hold.
pub trait Record: Clone {
    type Key: Ord + Clone;

    fn key(&self) -> &Self::Key;
}

impl Record for Task {
    type Key = TaskId;

    fn key(&self) -> &TaskId {
        self.task_id()
    }
}

impl Record for Edge {
    type Key = EdgeId;

    fn key(&self) -> &EdgeId {
        self.edge_id()
    }
}

impl Record for Section {
    type Key = SectionId;

    fn key(&self) -> &SectionId {
        self.section_id()
    }
}

type ChangeCallback = Arc<dyn Fn() + Send + Sync>;
type SubscriberList = Arc<Mutex<Vec<(u64, ChangeCallback)>>>;

/// Guard returned by `subscribe`; dropping it unsubscribes.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub(crate) fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct Inner<T: Record> {
    records: BTreeMap<T::Key, T>,
    rev: u64,
}

/// In-memory synced collection: key-addressed records, change revision,
/// change subscriptions.
///
/// Batch updates (`update_many`, `remove_where`) hold the lock for the whole
/// batch and notify once, so other readers observe either none or all of a
/// batch — never a partial state. Conflict resolution across writers is
/// last-writer-wins per record.
pub struct SyncedCollection<T: Record> {
    inner: Arc<Mutex<Inner<T>>>,
    subscribers: SubscriberList,
    next_subscriber: Arc<AtomicU64>,
}

impl<T: Record> Clone for SyncedCollection<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            subscribers: self.subscribers.clone(),
            next_subscriber: self.next_subscriber.clone(),
        }
    }
}

impl<T: Record> Default for SyncedCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> SyncedCollection<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                records: BTreeMap::new(),
                rev: 0,
            })),
            subscribers: Arc::new(Mutex::new(Vec::new())),
            next_subscriber: Arc::new(AtomicU64::new(0)),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<T>> {
        self.inner.lock().expect("collection lock poisoned")
    }

    pub fn rev(&self) -> u64 {
        self.lock().rev
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().records.is_empty()
    }

    pub fn get(&self, key: &T::Key) -> Option<T> {
        self.lock().records.get(key).cloned()
    }

    pub fn contains(&self, key: &T::Key) -> bool {
        self.lock().records.contains_key(key)
    }

    /// All records, in key order.
    pub fn all(&self) -> Vec<T> {
        self.lock().records.values().cloned().collect()
    }

    pub fn query(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.lock()
            .records
            .values()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    /// Inserts the record; a duplicate key is a no-op and returns `false`.
    pub fn insert(&self, record: T) -> bool {
        let inserted = {
            let mut inner = self.lock();
            if inner.records.contains_key(record.key()) {
                false
            } else {
                inner.records.insert(record.key().clone(), record);
                inner.rev += 1;
                true
            }
        };
        if inserted {
            self.notify();
        }
        inserted
    }

    /// Patches one record in place; an unknown key is a no-op and returns
    /// `false`.
    pub fn update(&self, key: &T::Key, patch: impl FnOnce(&mut T)) -> bool {
        let updated = {
            let mut inner = self.lock();
            match inner.records.get_mut(key) {
                Some(record) => {
                    patch(record);
                    inner.rev += 1;
                    true
                }
                None => false,
            }
        };
        if updated {
            self.notify();
        }
        updated
    }

    /// Patches every listed record as one batch: a single lock hold, a single
    /// revision bump, a single notification. Unknown keys are skipped.
    pub fn update_many(&self, keys: &[T::Key], patch: impl Fn(&mut T)) -> usize {
        let patched = {
            let mut inner = self.lock();
            let mut patched = 0;
            for key in keys {
                if let Some(record) = inner.records.get_mut(key) {
                    patch(record);
                    patched += 1;
                }
            }
            if patched > 0 {
                inner.rev += 1;
            }
            patched
        };
        if patched > 0 {
            self.notify();
        }
        patched
    }

    pub fn remove(&self, key: &T::Key) -> Option<T> {
        let removed = {
            let mut inner = self.lock();
            let removed = inner.records.remove(key);
            if removed.is_some() {
                inner.rev += 1;
            }
            removed
        };
        if removed.is_some() {
            self.notify();
        }
        removed
    }

    /// Removes every record matching the predicate as one batch; returns the
    /// removed records in key order.
    pub fn remove_where(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let removed = {
            let mut inner = self.lock();
            let keys = inner
                .records
                .values()
                .filter(|record| predicate(record))
                .map(|record| record.key().clone())
                .collect::<Vec<_>>();
            let removed = keys
                .iter()
                .filter_map(|key| inner.records.remove(key))
                .collect::<Vec<_>>();
            if !removed.is_empty() {
                inner.rev += 1;
            }
            removed
        };
        if !removed.is_empty() {
            self.notify();
        }
        removed
    }

    /// Registers a change callback, invoked after every committed mutation
    /// batch. The callback pulls whatever state it needs; no payload is
    /// pushed.
    pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) -> Subscription {
        let id = self.next_subscriber.fetch_add(1, Ordering::Relaxed);
        self.subscribers
            .lock()
            .expect("collection subscribers lock poisoned")
            .push((id, Arc::new(callback)));

        let subscribers: Weak<_> = Arc::downgrade(&self.subscribers);
        Subscription::new(move || {
            if let Some(subscribers) = subscribers.upgrade() {
                subscribers
                    .lock()
                    .expect("collection subscribers lock poisoned")
                    .retain(|(sub_id, _)| *sub_id != id);
            }
        })
    }

    fn notify(&self) {
        let callbacks = self
            .subscribers
            .lock()
            .expect("collection subscribers lock poisoned")
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect::<Vec<_>>();
        for callback in callbacks {
            callback();
        }
    }
}

impl<T: Record + std::fmt::Debug> std::fmt::Debug for SyncedCollection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncedCollection")
            .field("len", &self.len())
            .field("rev", &self.rev())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::SyncedCollection;
    use crate::model::{Point, Task, TaskId};

    fn task(raw: &str, x: f64) -> Task {
        Task::new(TaskId::new(raw).expect("task id"), Point::new(x, 0.0), raw)
    }

    #[test]
    fn insert_rejects_duplicate_keys_silently() {
        let collection = SyncedCollection::<Task>::new();
        assert!(collection.insert(task("t1", 1.0)));
        assert!(!collection.insert(task("t1", 2.0)));

        let stored = collection.get(&TaskId::new("t1").expect("id")).expect("record");
        assert_eq!(stored.position().x, 1.0);
        assert_eq!(collection.rev(), 1);
    }

    #[test]
    fn update_many_bumps_rev_once_and_notifies_once() {
        let collection = SyncedCollection::<Task>::new();
        collection.insert(task("t1", 10.0));
        collection.insert(task("t2", 20.0));
        let rev_before = collection.rev();

        let notifications = Arc::new(AtomicUsize::new(0));
        let _sub = collection.subscribe({
            let notifications = notifications.clone();
            move || {
                notifications.fetch_add(1, Ordering::SeqCst);
            }
        });

        let keys = vec![
            TaskId::new("t1").expect("id"),
            TaskId::new("t2").expect("id"),
            TaskId::new("missing").expect("id"),
        ];
        let patched = collection.update_many(&keys, |record| {
            let mut position = record.position();
            position.x += 500.0;
            record.set_position(position);
        });

        assert_eq!(patched, 2);
        assert_eq!(collection.rev(), rev_before + 1);
        assert_eq!(notifications.load(Ordering::SeqCst), 1);
        assert_eq!(
            collection.get(&TaskId::new("t1").expect("id")).expect("record").position().x,
            510.0
        );
    }

    #[test]
    fn dropping_a_subscription_stops_notifications() {
        let collection = SyncedCollection::<Task>::new();
        let notifications = Arc::new(AtomicUsize::new(0));
        let sub = collection.subscribe({
            let notifications = notifications.clone();
            move || {
                notifications.fetch_add(1, Ordering::SeqCst);
            }
        });

        collection.insert(task("t1", 0.0));
        assert_eq!(notifications.load(Ordering::SeqCst), 1);

        drop(sub);
        collection.insert(task("t2", 0.0));
        assert_eq!(notifications.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn remove_where_removes_matching_records_as_one_batch() {
        let collection = SyncedCollection::<Task>::new();
        collection.insert(task("t1", 10.0));
        collection.insert(task("t2", 600.0));
        collection.insert(task("t3", 700.0));
        let rev_before = collection.rev();

        let removed = collection.remove_where(|record| record.position().x > 500.0);
        assert_eq!(removed.len(), 2);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.rev(), rev_before + 1);

        assert!(collection.remove_where(|record| record.position().x > 500.0).is_empty());
        assert_eq!(collection.rev(), rev_before + 1);
    }

    #[test]
    fn query_filters_without_mutating() {
        let collection = SyncedCollection::<Task>::new();
        collection.insert(task("t1", 10.0));
        collection.insert(task("t2", 600.0));

        let beyond = collection.query(|record| record.position().x > 500.0);
        assert_eq!(beyond.len(), 1);
        assert_eq!(beyond[0].task_id().as_str(), "t2");
        assert_eq!(collection.len(), 2);
    }
}
