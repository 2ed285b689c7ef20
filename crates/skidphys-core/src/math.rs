use crate::{Scalar, Vec2};

/// Wrap a heading into [0, 360). Total for every finite input, including
/// large negatives (-450 -> 270).
#[inline]
pub fn wrap_deg(deg: Scalar) -> Scalar {
    let w = deg % 360.0;
    if w < 0.0 { w + 360.0 } else { w }
}

/// Unit forward vector for a heading in degrees (0 = +X, CCW positive).
#[inline]
pub fn forward_from_heading(heading_deg: Scalar) -> Vec2 {
    let (s, c) = heading_deg.to_radians().sin_cos();
    Vec2::new(c, s)
}

/// Unit vector 90 degrees to the right of `fwd` (clockwise rotation).
#[inline]
pub fn right_of(fwd: Vec2) -> Vec2 {
    Vec2::new(fwd.y, -fwd.x)
}

#[inline]
pub fn lerp(a: Scalar, b: Scalar, t: Scalar) -> Scalar {
    a + (b - a) * t
}

/// Frame-rate independent decay factor: `retention` is the fraction kept
/// after one second, so `v *= decay(retention, dt)` integrates identically
/// for any tick size.
#[inline]
pub fn decay(retention: Scalar, dt: Scalar) -> Scalar {
    retention.powf(dt)
}
