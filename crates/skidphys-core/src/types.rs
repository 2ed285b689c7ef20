use crate::Scalar;

pub type Vec2 = glam::Vec2;

#[inline] pub fn vec2(x: Scalar, y: Scalar) -> Vec2 { Vec2::new(x, y) }

/// Planar pose: position plus heading in degrees (0 = +X, counter-clockwise).
#[derive(Copy, Clone, Debug, Default)]
pub struct Pose {
    pub pos: Vec2,
    pub heading_deg: Scalar,
}

impl Pose {
    pub fn new(pos: Vec2, heading_deg: Scalar) -> Self {
        Self { pos, heading_deg: crate::math::wrap_deg(heading_deg) }
    }
}
