// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Storymap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Storymap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{Point, SectionId};

use super::partition::Interval;

/// Resolved section membership for a canvas point.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SectionHit {
    pub section_x: Option<SectionId>,
    pub section_y: Option<SectionId>,
}

/// Returns the unique segment with `start <= coord < end`, or `None` when the
/// coordinate falls before the first start or at/after the last end.
///
/// Intervals are half-open, so a coordinate exactly on a shared boundary
/// belongs to the segment starting there.
pub fn map_to_segment(intervals: &[Interval], coord: f64) -> Option<&Interval> {
    intervals
        .iter()
        .find(|interval| interval.start() <= coord && coord < interval.end())
}

/// Resolves a point's X and Y section independently per axis.
///
/// Point and partitions share the board's canvas coordinate space (the
/// partitions already begin at the axis-header offset); converting raw
/// pointer coordinates into canvas space is the caller's job.
pub fn map_to_sections(
    partition_x: &[Interval],
    partition_y: &[Interval],
    point: Point,
) -> SectionHit {
    SectionHit {
        section_x: map_to_segment(partition_x, point.x).map(|i| i.section_id().clone()),
        section_y: map_to_segment(partition_y, point.y).map(|i| i.section_id().clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::{map_to_sections, map_to_segment};
    use crate::layout::partition::partition;
    use crate::model::{Point, SectionId};

    fn section_id(raw: &str) -> SectionId {
        SectionId::new(raw).expect("section id")
    }

    fn two_segment_partition() -> Vec<crate::layout::Interval> {
        partition(
            vec![(section_id("a"), 100.0), (section_id("b"), 50.0)],
            0.0,
        )
    }

    #[test]
    fn maps_interior_coordinates_to_their_segment() {
        let intervals = two_segment_partition();
        assert_eq!(
            map_to_segment(&intervals, 120.0).map(|i| i.section_id().clone()),
            Some(section_id("b"))
        );
        assert_eq!(
            map_to_segment(&intervals, 0.5).map(|i| i.section_id().clone()),
            Some(section_id("a"))
        );
    }

    #[test]
    fn boundary_coordinate_belongs_to_the_segment_starting_there() {
        let intervals = two_segment_partition();
        assert_eq!(
            map_to_segment(&intervals, 100.0).map(|i| i.section_id().clone()),
            Some(section_id("b"))
        );
        assert_eq!(
            map_to_segment(&intervals, 0.0).map(|i| i.section_id().clone()),
            Some(section_id("a"))
        );
    }

    #[test]
    fn coordinates_outside_the_partition_map_to_none() {
        let intervals = two_segment_partition();
        assert!(map_to_segment(&intervals, -0.01).is_none());
        assert!(map_to_segment(&intervals, 150.0).is_none());
        assert!(map_to_segment(&intervals, 9999.0).is_none());
        assert!(map_to_segment(&[], 10.0).is_none());
    }

    #[test]
    fn maps_point_per_axis_independently() {
        let partition_x = two_segment_partition();
        let partition_y = partition(vec![(section_id("r"), 500.0)], 0.0);

        let hit = map_to_sections(&partition_x, &partition_y, Point::new(120.0, 600.0));
        assert_eq!(hit.section_x, Some(section_id("b")));
        assert_eq!(hit.section_y, None);

        let hit = map_to_sections(&partition_x, &partition_y, Point::new(-5.0, 10.0));
        assert_eq!(hit.section_x, None);
        assert_eq!(hit.section_y, Some(section_id("r")));
    }
}
