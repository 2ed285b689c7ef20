use crate::Aabb;
use skidphys_core::{Scalar, Vec2};

/// Closed polygon ring with a cached bounding box. Built once per track;
/// `contains` never allocates.
#[derive(Clone, Debug)]
pub struct Polygon {
    pts: Vec<Vec2>,
    aabb: Aabb,
}

impl Polygon {
    /// `pts` is the ring without a repeated closing vertex. Callers validate
    /// point count up front (track loading rejects rings with < 3 points).
    pub fn new(pts: Vec<Vec2>) -> Self {
        debug_assert!(pts.len() >= 3);
        let aabb = Aabb::from_points(&pts);
        Self { pts, aabb }
    }

    pub fn points(&self) -> &[Vec2] { &self.pts }
    pub fn aabb(&self) -> Aabb { self.aabb }

    pub fn centroid(&self) -> Vec2 {
        let sum: Vec2 = self.pts.iter().copied().sum();
        sum / self.pts.len() as Scalar
    }

    /// Even-odd ray crossing. Boundary convention is half-open: the
    /// `(y_i > p.y) != (y_j > p.y)` test counts edges touching the scanline
    /// from below only, so for an axis-aligned rectangle the left and bottom
    /// edges classify as inside and the right and top edges as outside.
    pub fn contains(&self, p: Vec2) -> bool {
        if !self.aabb.contains(p) {
            return false;
        }
        let mut inside = false;
        let n = self.pts.len();
        let mut j = n - 1;
        for i in 0..n {
            let a = self.pts[i];
            let b = self.pts[j];
            if (a.y > p.y) != (b.y > p.y)
                && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

/// Drivable surface: one outer ring minus zero-or-more excluded interior
/// rings. Read-only after construction; share by reference across trackers.
#[derive(Clone, Debug)]
pub struct DriveArea {
    outer: Polygon,
    holes: Vec<Polygon>,
}

impl DriveArea {
    pub fn new(outer: Polygon, holes: Vec<Polygon>) -> Self {
        Self { outer, holes }
    }

    pub fn outer(&self) -> &Polygon { &self.outer }
    pub fn holes(&self) -> &[Polygon] { &self.holes }

    /// Inside the outer ring and inside none of the holes.
    pub fn contains(&self, p: Vec2) -> bool {
        self.outer.contains(p) && !self.holes.iter().any(|h| h.contains(p))
    }
}
