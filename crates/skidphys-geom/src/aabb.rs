use skidphys_core::{Scalar, Vec2};

#[derive(Copy, Clone, Debug)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_points(pts: &[Vec2]) -> Self {
        let mut min = Vec2::splat(Scalar::INFINITY);
        let mut max = Vec2::splat(Scalar::NEG_INFINITY);
        for p in pts {
            min = min.min(*p);
            max = max.max(*p);
        }
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skidphys_core::vec2;

    #[test]
    fn bounds_and_containment() {
        let b = Aabb::from_points(&[vec2(-1.0, 2.0), vec2(3.0, -4.0), vec2(0.0, 0.0)]);
        assert_eq!(b.min, vec2(-1.0, -4.0));
        assert_eq!(b.max, vec2(3.0, 2.0));
        assert!(b.contains(vec2(0.0, 0.0)));
        assert!(!b.contains(vec2(3.1, 0.0)));
    }
}
