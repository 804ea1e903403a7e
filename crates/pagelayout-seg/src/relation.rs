//! Spatial relationships between regions
//!
//! Every unordered pair `(i, j)`, `i < j`, is tested against a short rule
//! list; the first match is recorded and the rest are not consulted, so a
//! pair carries at most one relationship.

use crate::detect::Region;
use crate::{SegError, SegResult};
use pagelayout_core::Box;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Maximum difference, in pixels, between top edges (or left edges) of
/// two regions considered aligned. The comparison is strict.
pub const ALIGNMENT_TOLERANCE: i32 = 10;

/// Kind of relationship from the first region of a pair to the second
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// Top edges within tolerance
    HorizontallyAligned,
    /// Left edges within tolerance
    VerticallyAligned,
    /// The second region's top-left corner lies strictly inside the first
    Contains,
    /// The first region's top-left corner lies strictly inside the second
    ContainedBy,
}

impl RelationKind {
    /// All kinds, in rule order
    pub const ALL: [RelationKind; 4] = [
        RelationKind::HorizontallyAligned,
        RelationKind::VerticallyAligned,
        RelationKind::Contains,
        RelationKind::ContainedBy,
    ];

    /// Stable snake_case name
    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::HorizontallyAligned => "horizontally_aligned",
            RelationKind::VerticallyAligned => "vertically_aligned",
            RelationKind::Contains => "contains",
            RelationKind::ContainedBy => "contained_by",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationKind {
    type Err = SegError;

    fn from_str(s: &str) -> SegResult<Self> {
        RelationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SegError::UnknownName {
                what: "relationship",
                name: s.to_string(),
            })
    }
}

/// Relationship between regions `first` and `second` (`first < second`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Relationship {
    /// Index of the first region
    pub first: usize,
    /// Index of the second region
    pub second: usize,
    /// How `first` relates to `second`
    pub kind: RelationKind,
}

/// Relate two boxes, or `None` if no rule applies.
///
/// Only the top-left corner of the other box is tested for containment,
/// so partially overlapping boxes can "contain" each other.
pub fn relate(a: &Box, b: &Box, tolerance: i32) -> Option<RelationKind> {
    if (a.y - b.y).abs() < tolerance {
        Some(RelationKind::HorizontallyAligned)
    } else if (a.x - b.x).abs() < tolerance {
        Some(RelationKind::VerticallyAligned)
    } else if a.strictly_contains_point(b.x, b.y) {
        Some(RelationKind::Contains)
    } else if b.strictly_contains_point(a.x, a.y) {
        Some(RelationKind::ContainedBy)
    } else {
        None
    }
}

/// Relationships among `regions` with the default tolerance.
///
/// Output is ordered by `(first, second)`; indices refer to `regions`.
pub fn analyze_relationships(regions: &[Region]) -> Vec<Relationship> {
    analyze_relationships_with_tolerance(regions, ALIGNMENT_TOLERANCE)
}

/// Relationships among `regions` with an explicit alignment tolerance.
pub fn analyze_relationships_with_tolerance(
    regions: &[Region],
    tolerance: i32,
) -> Vec<Relationship> {
    let span = tracing::debug_span!("analyze_relationships", regions = regions.len(), tolerance);
    let _enter = span.enter();

    let mut relationships = Vec::new();
    for (i, a) in regions.iter().enumerate() {
        for (j, b) in regions.iter().enumerate().skip(i + 1) {
            if let Some(kind) = relate(&a.bbox, &b.bbox, tolerance) {
                relationships.push(Relationship {
                    first: i,
                    second: j,
                    kind,
                });
            }
        }
    }

    debug!(relationships = relationships.len(), "relationships found");
    relationships
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::RegionKind;

    fn region(x: i32, y: i32, w: i32, h: i32) -> Region {
        Region {
            kind: RegionKind::Unknown,
            bbox: Box::new_unchecked(x, y, w, h),
        }
    }

    #[test]
    fn test_horizontal_alignment() {
        let rels = analyze_relationships(&[region(10, 100, 50, 20), region(200, 105, 40, 20)]);
        assert_eq!(
            rels,
            vec![Relationship {
                first: 0,
                second: 1,
                kind: RelationKind::HorizontallyAligned
            }]
        );
    }

    #[test]
    fn test_tolerance_is_strict() {
        let a = Box::new_unchecked(0, 0, 5, 5);
        let b = Box::new_unchecked(100, 10, 5, 5);
        assert_eq!(relate(&a, &b, 10), None);
        assert_eq!(
            relate(&a, &b, 11),
            Some(RelationKind::HorizontallyAligned)
        );
    }

    #[test]
    fn test_vertical_alignment() {
        let a = Box::new_unchecked(40, 0, 5, 5);
        let b = Box::new_unchecked(45, 300, 5, 5);
        assert_eq!(
            relate(&a, &b, ALIGNMENT_TOLERANCE),
            Some(RelationKind::VerticallyAligned)
        );
    }

    #[test]
    fn test_containment() {
        let rels = analyze_relationships(&[region(0, 0, 300, 300), region(100, 100, 50, 50)]);
        assert_eq!(rels.len(), 1);
        assert_eq!(rels[0].kind, RelationKind::Contains);

        let rels = analyze_relationships(&[region(100, 100, 50, 50), region(0, 0, 300, 300)]);
        assert_eq!(rels[0].kind, RelationKind::ContainedBy);
    }

    #[test]
    fn test_alignment_beats_containment() {
        let outer = Box::new_unchecked(0, 0, 300, 300);
        let inner = Box::new_unchecked(50, 5, 20, 20);
        assert_eq!(
            relate(&outer, &inner, ALIGNMENT_TOLERANCE),
            Some(RelationKind::HorizontallyAligned)
        );
    }

    #[test]
    fn test_corner_on_edge_is_not_contained() {
        let a = Box::new_unchecked(0, 0, 100, 100);
        let b = Box::new_unchecked(100, 50, 10, 10);
        assert_eq!(relate(&a, &b, ALIGNMENT_TOLERANCE), None);
    }

    #[test]
    fn test_pair_order_and_indices() {
        let regions = [
            region(0, 0, 10, 10),
            region(500, 3, 10, 10),
            region(4, 400, 10, 10),
            region(300, 300, 10, 10),
        ];
        let rels = analyze_relationships(&regions);
        let pairs: Vec<_> = rels.iter().map(|r| (r.first, r.second, r.kind)).collect();
        assert_eq!(
            pairs,
            vec![
                (0, 1, RelationKind::HorizontallyAligned),
                (0, 2, RelationKind::VerticallyAligned),
            ]
        );
        for r in &rels {
            assert!(r.first < r.second && r.second < regions.len());
        }
    }

    #[test]
    fn test_empty_and_single() {
        assert!(analyze_relationships(&[]).is_empty());
        assert!(analyze_relationships(&[region(0, 0, 5, 5)]).is_empty());
    }

    #[test]
    fn test_names() {
        for kind in RelationKind::ALL {
            assert_eq!(kind.as_str().parse::<RelationKind>().unwrap(), kind);
        }
        assert_eq!(RelationKind::ContainedBy.to_string(), "contained_by");
        assert!("overlaps".parse::<RelationKind>().is_err());
    }
}
