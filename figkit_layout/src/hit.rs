// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-to-site resolution.

use hashbrown::HashSet;
use kurbo::{Point, Rect};
use rstar::RTree;
use rstar::primitives::GeomWithData;

use crate::voronoi::contains_closed;

type Site = GeomWithData<[f64; 2], usize>;

/// R-tree over laid-out point positions.
///
/// `nearest` returns the same site as locating the pointer in the [`Voronoi`](crate::Voronoi)
/// cells over the same extent, in logarithmic time.
#[derive(Debug)]
pub struct HitIndex {
    extent: Rect,
    tree: RTree<Site>,
}

impl HitIndex {
    /// Indexes `sites` for hits within `extent`. Duplicate and non-finite sites are skipped;
    /// the first of several equal sites wins.
    pub fn new(extent: Rect, sites: &[Point]) -> Self {
        let mut seen: HashSet<(u64, u64)> = HashSet::with_capacity(sites.len());
        let entries: Vec<Site> = sites
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_finite() && seen.insert((p.x.to_bits(), p.y.to_bits())))
            .map(|(i, p)| GeomWithData::new([p.x, p.y], i))
            .collect();
        Self {
            extent: extent.abs(),
            tree: RTree::bulk_load(entries),
        }
    }

    /// The hit extent.
    pub fn extent(&self) -> Rect {
        self.extent
    }

    /// Number of indexed sites.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Returns `true` if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Index of the site nearest to `p`, or `None` outside the extent.
    pub fn nearest(&self, p: Point) -> Option<usize> {
        if !contains_closed(self.extent, p) {
            return None;
        }
        self.tree.nearest_neighbor(&[p.x, p.y]).map(|s| s.data)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::Voronoi;

    #[test]
    fn agrees_with_voronoi_cells() {
        let extent = Rect::new(0.0, 0.0, 120.0, 80.0);
        let sites = [
            Point::new(12.0, 9.0),
            Point::new(60.0, 40.0),
            Point::new(101.0, 15.0),
            Point::new(33.0, 70.0),
            Point::new(90.0, 66.0),
        ];
        let index = HitIndex::new(extent, &sites);
        let cells = Voronoi::new(extent, &sites);
        for ix in 0..12 {
            for iy in 0..8 {
                let p = Point::new(f64::from(ix) * 10.0 + 3.0, f64::from(iy) * 10.0 + 3.0);
                assert_eq!(index.nearest(p), cells.find(p), "pointer at {p:?}");
            }
        }
    }

    #[test]
    fn outside_extent_and_duplicates() {
        let p = Point::new(5.0, 5.0);
        let index = HitIndex::new(Rect::new(0.0, 0.0, 10.0, 10.0), &[p, p, Point::new(9.0, 9.0)]);
        assert_eq!(index.len(), 2, "duplicate skipped");
        assert_eq!(index.nearest(Point::new(4.0, 4.0)), Some(0), "first duplicate wins");
        assert_eq!(index.nearest(Point::new(11.0, 4.0)), None, "outside");
        assert!(HitIndex::new(Rect::ZERO, &[]).nearest(Point::ZERO).is_none(), "empty");
    }
}
