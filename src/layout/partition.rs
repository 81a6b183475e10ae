// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Storymap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Storymap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{Section, SectionId};

/// One derived segment of an axis partition.
///
/// Intervals are contiguous and non-overlapping by construction:
/// `start[0] == base_offset`, `end[i] == start[i] + size[i]`,
/// `start[i + 1] == end[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    section_id: SectionId,
    start: f64,
    end: f64,
    index: usize,
}

impl Interval {
    pub fn section_id(&self) -> &SectionId {
        &self.section_id
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn size(&self) -> f64 {
        self.end - self.start
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// Computes the interval partition for an ordered `(id, size)` sequence.
///
/// The input must already be dereferenced through the board's order list;
/// this function is pure and depends only on the sequence it is handed, not
/// on any backing collection's insertion order.
pub fn partition(
    segments: impl IntoIterator<Item = (SectionId, f64)>,
    base_offset: f64,
) -> Vec<Interval> {
    let mut intervals = Vec::new();
    let mut cursor = base_offset;

    for (index, (section_id, size)) in segments.into_iter().enumerate() {
        let start = cursor;
        let end = start + size.max(0.0);
        intervals.push(Interval {
            section_id,
            start,
            end,
            index,
        });
        cursor = end;
    }

    intervals
}

/// Convenience over section records, preserving the given order.
pub fn partition_sections(sections: &[Section], base_offset: f64) -> Vec<Interval> {
    partition(
        sections
            .iter()
            .map(|section| (section.section_id().clone(), section.size())),
        base_offset,
    )
}

#[cfg(test)]
mod tests {
    use super::{partition, partition_sections};
    use crate::model::{Orientation, Section, SectionId};

    fn section_id(raw: &str) -> SectionId {
        SectionId::new(raw).expect("section id")
    }

    #[test]
    fn partition_accumulates_contiguous_intervals() {
        let intervals = partition(
            vec![(section_id("a"), 100.0), (section_id("b"), 50.0)],
            0.0,
        );

        assert_eq!(intervals.len(), 2);
        assert_eq!(intervals[0].section_id(), &section_id("a"));
        assert_eq!(intervals[0].start(), 0.0);
        assert_eq!(intervals[0].end(), 100.0);
        assert_eq!(intervals[0].index(), 0);
        assert_eq!(intervals[1].section_id(), &section_id("b"));
        assert_eq!(intervals[1].start(), 100.0);
        assert_eq!(intervals[1].end(), 150.0);
        assert_eq!(intervals[1].index(), 1);
    }

    #[test]
    fn partition_starts_at_base_offset() {
        let intervals = partition(vec![(section_id("a"), 10.0)], 80.0);
        assert_eq!(intervals[0].start(), 80.0);
        assert_eq!(intervals[0].end(), 90.0);
    }

    #[test]
    fn partition_of_empty_sequence_is_empty() {
        assert!(partition(Vec::new(), 80.0).is_empty());
    }

    #[test]
    fn consecutive_intervals_share_boundaries() {
        let sizes = [37.5, 0.0, 112.0, 9.25];
        let intervals = partition(
            sizes
                .iter()
                .enumerate()
                .map(|(i, size)| (section_id(&format!("s{i}")), *size)),
            42.0,
        );

        assert_eq!(intervals[0].start(), 42.0);
        for pair in intervals.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
        for (interval, size) in intervals.iter().zip(sizes) {
            assert_eq!(interval.size(), size);
        }
    }

    #[test]
    fn partition_sections_uses_record_sizes_in_given_order() {
        let sections = vec![
            Section::new(section_id("b"), "Later", Orientation::Vertical, 50.0),
            Section::new(section_id("a"), "Now", Orientation::Vertical, 100.0),
        ];
        let intervals = partition_sections(&sections, 0.0);

        // Order is the caller's order, not id order.
        assert_eq!(intervals[0].section_id(), &section_id("b"));
        assert_eq!(intervals[0].end(), 50.0);
        assert_eq!(intervals[1].section_id(), &section_id("a"));
        assert_eq!(intervals[1].end(), 150.0);
    }
}
