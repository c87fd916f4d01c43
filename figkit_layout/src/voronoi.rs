// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearest-site partition of a rectangle.

use kurbo::{BezPath, Point, Rect, Vec2};
use smallvec::SmallVec;

/// Polygon vertices of one cell, counter-clockwise in screen space.
pub type Cell = SmallVec<[Point; 8]>;

/// Voronoi cells of a set of sites, clipped to an extent.
///
/// Each cell is the extent rectangle cut by the perpendicular bisector half-plane of every
/// other site. Quadratic in the number of sites, which is fine for the few dozen points of a
/// swarm plot.
#[derive(Clone, Debug)]
pub struct Voronoi {
    extent: Rect,
    sites: Vec<Point>,
    cells: Vec<Option<Cell>>,
}

impl Voronoi {
    /// Computes the cells of `sites` within `extent`.
    ///
    /// A site equal to an earlier one gets no cell (the first wins), as do sites whose cell
    /// is empty within the extent. Non-finite sites get no cell.
    pub fn new(extent: Rect, sites: &[Point]) -> Self {
        let extent = extent.abs();
        let mut cells = Vec::with_capacity(sites.len());
        for (i, &site) in sites.iter().enumerate() {
            let duplicate = sites[..i].iter().any(|s| *s == site);
            if duplicate || !site.is_finite() {
                cells.push(None);
                continue;
            }
            let mut poly: Cell = SmallVec::from_slice(&[
                Point::new(extent.x0, extent.y0),
                Point::new(extent.x1, extent.y0),
                Point::new(extent.x1, extent.y1),
                Point::new(extent.x0, extent.y1),
            ]);
            for (j, &other) in sites.iter().enumerate() {
                if j == i || other == site || !other.is_finite() {
                    continue;
                }
                poly = clip(&poly, site, other);
                if poly.len() < 3 {
                    break;
                }
            }
            cells.push((poly.len() >= 3).then_some(poly));
        }
        Self {
            extent,
            sites: sites.to_vec(),
            cells,
        }
    }

    /// The clipping rectangle.
    pub fn extent(&self) -> Rect {
        self.extent
    }

    /// Number of sites.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Returns `true` if there are no sites.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// The cell polygon of site `i`.
    pub fn cell(&self, i: usize) -> Option<&[Point]> {
        self.cells.get(i)?.as_deref()
    }

    /// The cell of site `i` as a closed path.
    pub fn to_path(&self, i: usize) -> Option<BezPath> {
        let cell = self.cell(i)?;
        let (first, rest) = cell.split_first()?;
        let mut path = BezPath::new();
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close_path();
        Some(path)
    }

    /// The site whose cell contains `p` (brute force).
    pub fn find(&self, p: Point) -> Option<usize> {
        if !contains_closed(self.extent, p) {
            return None;
        }
        self.cells
            .iter()
            .zip(&self.sites)
            .enumerate()
            .filter(|(_, (cell, _))| cell.is_some())
            .map(|(i, (_, site))| (i, site.distance_squared(p)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }
}

pub(crate) fn contains_closed(r: Rect, p: Point) -> bool {
    p.x >= r.x0 && p.x <= r.x1 && p.y >= r.y0 && p.y <= r.y1
}

/// Keeps the part of `poly` closer to `site` than to `other` (Sutherland-Hodgman).
fn clip(poly: &[Point], site: Point, other: Point) -> Cell {
    let normal: Vec2 = other - site;
    let mid = site.midpoint(other);
    let side = |p: Point| (p - mid).dot(normal);

    let mut out = Cell::new();
    for (k, &cur) in poly.iter().enumerate() {
        let prev = poly[(k + poly.len() - 1) % poly.len()];
        let (sc, sp) = (side(cur), side(prev));
        if sc <= 0.0 {
            if sp > 0.0 {
                out.push(prev.lerp(cur, sp / (sp - sc)));
            }
            out.push(cur);
        } else if sp <= 0.0 {
            out.push(prev.lerp(cur, sp / (sp - sc)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn area(poly: &[Point]) -> f64 {
        let mut a = 0.0;
        for (k, p) in poly.iter().enumerate() {
            let q = poly[(k + 1) % poly.len()];
            a += p.x * q.y - q.x * p.y;
        }
        (a * 0.5).abs()
    }

    #[test]
    fn two_sites_split_at_the_bisector() {
        let v = Voronoi::new(
            Rect::new(0.0, 0.0, 100.0, 50.0),
            &[Point::new(25.0, 25.0), Point::new(75.0, 25.0)],
        );
        let left = v.cell(0).unwrap();
        assert!(left.iter().all(|p| p.x <= 50.0 + 1e-9), "left cell {left:?}");
        assert!((area(left) - 2500.0).abs() < 1e-6, "half the extent");
        assert!((area(v.cell(1).unwrap()) - 2500.0).abs() < 1e-6, "other half");
    }

    #[test]
    fn cells_tile_the_extent() {
        let sites = [
            Point::new(10.0, 10.0),
            Point::new(80.0, 20.0),
            Point::new(40.0, 70.0),
            Point::new(90.0, 90.0),
            Point::new(55.0, 45.0),
        ];
        let v = Voronoi::new(Rect::new(0.0, 0.0, 100.0, 100.0), &sites);
        let total: f64 = (0..sites.len()).filter_map(|i| v.cell(i)).map(area).sum();
        assert!((total - 10_000.0).abs() < 1e-6, "areas sum to the extent, got {total}");
        assert_eq!(v.find(Point::new(52.0, 47.0)), Some(4), "nearest site");
        assert_eq!(v.find(Point::new(-1.0, 47.0)), None, "outside the extent");
    }

    #[test]
    fn duplicate_sites_keep_the_first() {
        let p = Point::new(30.0, 30.0);
        let v = Voronoi::new(Rect::new(0.0, 0.0, 60.0, 60.0), &[p, p]);
        assert!(v.cell(0).is_some(), "first site owns the whole extent");
        assert!(v.cell(1).is_none(), "duplicate has no cell");
        assert!(v.to_path(0).is_some(), "path of a cell");
    }
}
