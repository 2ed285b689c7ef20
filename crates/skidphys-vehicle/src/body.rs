use skidphys_core::{forward_from_heading, wrap_deg, Pose, Scalar, Vec2};

/// Plain kinematic state of one vehicle. Exclusively owned by the engine's
/// host; presentation code wraps a copy of this, never the live value.
#[derive(Copy, Clone, Debug)]
pub struct VehicleBody {
    pub pos: Vec2,
    /// Always finite and wrapped to [0, 360). Mutate through `set_heading`.
    heading_deg: Scalar,
    pub vel: Vec2,
}

impl VehicleBody {
    pub fn spawn(pose: Pose) -> Self {
        Self {
            pos: pose.pos,
            heading_deg: wrap_deg(pose.heading_deg),
            vel: Vec2::ZERO,
        }
    }

    pub fn heading_deg(&self) -> Scalar {
        self.heading_deg
    }

    pub fn set_heading(&mut self, deg: Scalar) {
        self.heading_deg = wrap_deg(deg);
    }

    pub fn teleport(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    pub fn zero_velocity(&mut self) {
        self.vel = Vec2::ZERO;
    }

    pub fn forward(&self) -> Vec2 {
        forward_from_heading(self.heading_deg)
    }

    pub fn speed(&self) -> Scalar {
        self.vel.length()
    }

    /// Read-only copy for external consumers.
    pub fn snapshot(&self) -> VehicleBody {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skidphys_core::vec2;

    #[test]
    fn heading_stays_wrapped() {
        let mut b = VehicleBody::spawn(Pose::new(Vec2::ZERO, 0.0));
        b.set_heading(365.0);
        assert!((b.heading_deg() - 5.0).abs() < 1e-6);
        b.set_heading(-10.0);
        assert!((b.heading_deg() - 350.0).abs() < 1e-6);
    }

    #[test]
    fn spawn_is_at_rest() {
        let b = VehicleBody::spawn(Pose::new(vec2(3.0, 4.0), 90.0));
        assert_eq!(b.vel, Vec2::ZERO);
        assert_eq!(b.pos, vec2(3.0, 4.0));
        assert!((b.forward() - vec2(0.0, 1.0)).length() < 1e-6);
    }
}
