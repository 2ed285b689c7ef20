use crate::{DriftParams, VehicleBody};
use skidphys_core::{decay, lerp, right_of, Scalar, StepCtx};

/// Handling regime. `Handbrake` is forced by input and overrides drift
/// detection; `Drift` engages when lateral velocity reaches the threshold.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DriftState {
    Normal,
    Drift,
    Handbrake,
}

impl DriftState {
    #[inline]
    fn friction(self, p: &DriftParams) -> Scalar {
        match self {
            DriftState::Normal => p.friction_normal,
            DriftState::Drift => p.friction_drift,
            DriftState::Handbrake => p.friction_handbrake,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            DriftState::Normal => 0,
            DriftState::Drift => 1,
            DriftState::Handbrake => 2,
        }
    }
}

/// Controls consumed by one engine tick, already normalized by the input rig.
#[derive(Copy, Clone, Debug, Default)]
pub struct DriveInput {
    /// -1, 0 or 1.
    pub throttle: Scalar,
    /// -1, 0 or 1; positive steers CCW.
    pub steer: Scalar,
    pub handbrake: bool,
}

/// Per-tick read-only outputs for UI, audio and scoring.
#[derive(Copy, Clone, Debug)]
pub struct DriftTelemetry {
    pub state: DriftState,
    pub target: DriftState,
    /// [0, 1]; monotone within a transition, clamps at 1.
    pub progress: Scalar,
    /// atan2(lateral, forward) in degrees; positive = sliding right of
    /// heading; exactly 0 for a zero-length velocity.
    pub drift_angle_deg: Scalar,
    pub lateral_vel: Scalar,
    pub forward_speed: Scalar,
    /// Scalar speed after this tick's integration.
    pub speed: Scalar,
}

impl Default for DriftTelemetry {
    fn default() -> Self {
        Self {
            state: DriftState::Normal,
            target: DriftState::Normal,
            progress: 1.0,
            drift_angle_deg: 0.0,
            lateral_vel: 0.0,
            forward_speed: 0.0,
            speed: 0.0,
        }
    }
}

// Smoothed state machine. `from_friction` is re-sampled from the current
// effective friction whenever the target changes, so the blend stays
// continuous even when a transition is interrupted mid-flight.
#[derive(Copy, Clone, Debug)]
struct DriftCtrl {
    current: DriftState,
    target: DriftState,
    progress: Scalar,
    from_friction: Scalar,
}

impl DriftCtrl {
    fn new(p: &DriftParams) -> Self {
        Self {
            current: DriftState::Normal,
            target: DriftState::Normal,
            progress: 1.0,
            from_friction: p.friction_normal,
        }
    }

    fn effective_friction(&self, p: &DriftParams) -> Scalar {
        if self.progress >= 1.0 {
            self.current.friction(p)
        } else {
            lerp(self.from_friction, self.target.friction(p), self.progress)
        }
    }

    fn retarget(&mut self, target: DriftState, p: &DriftParams) {
        if target != self.target {
            self.from_friction = self.effective_friction(p);
            self.target = target;
            self.progress = 0.0;
        }
    }

    fn advance(&mut self, dt: Scalar, p: &DriftParams) {
        self.progress = (self.progress + dt / p.transition_time).min(1.0);
        if self.progress >= 1.0 {
            self.current = self.target;
        }
    }
}

pub struct DriftEngine {
    params: DriftParams,
    ctrl: DriftCtrl,
    telemetry: DriftTelemetry,
}

impl DriftEngine {
    /// `params` must already be validated; see `DriftParams::validated`.
    pub fn new(params: DriftParams) -> Self {
        Self {
            ctrl: DriftCtrl::new(&params),
            telemetry: DriftTelemetry::default(),
            params,
        }
    }

    pub fn params(&self) -> &DriftParams {
        &self.params
    }

    pub fn telemetry(&self) -> DriftTelemetry {
        self.telemetry
    }

    /// Back to Normal with the transition settled; the body is reinitialized
    /// separately by the owner.
    pub fn reset(&mut self) {
        self.ctrl = DriftCtrl::new(&self.params);
        self.telemetry = DriftTelemetry::default();
    }

    /// One movement tick. Never panics; total for every finite `dt > 0`.
    ///
    /// Order is load-bearing: classification reads the velocity produced by
    /// the PREVIOUS tick, then this tick's acceleration/steering/friction
    /// apply. The forward vector is computed once from the entry heading and
    /// reused for every projection this tick.
    pub fn step(&mut self, ctx: StepCtx, input: DriveInput, body: &mut VehicleBody) {
        let p = self.params;
        let dt = ctx.dt;
        let fwd = body.forward();
        let right = right_of(fwd);

        // -- classification (last tick's velocity) --
        let forward_speed = body.vel.dot(fwd);
        let lateral_vel = body.vel.dot(right);
        let drift_angle_deg = if body.vel.length_squared() > Scalar::EPSILON {
            lateral_vel.atan2(forward_speed).to_degrees()
        } else {
            0.0
        };

        let target = if input.handbrake {
            DriftState::Handbrake
        } else if lateral_vel.abs() >= p.drift_threshold {
            DriftState::Drift
        } else {
            DriftState::Normal
        };
        self.ctrl.retarget(target, &p);
        self.ctrl.advance(dt, &p);

        // -- throttle / brake / reverse --
        if input.throttle > 0.0 {
            body.vel += fwd * (input.throttle * p.accel * dt);
        } else if input.throttle < 0.0 {
            let rate = if forward_speed > 0.0 { p.brake_force } else { p.accel };
            body.vel += fwd * (input.throttle * rate * dt);
        }

        // -- steering (speed-stepped rate; zero steer never rotates) --
        if input.steer != 0.0 {
            let speed = body.speed();
            let rate = if speed < p.tight_turn_speed {
                p.turn_rate_low
            } else {
                p.turn_rate_high
            };
            body.set_heading(body.heading_deg() + rate * input.steer * dt);
        }

        // -- friction, blended across the state transition --
        let friction = self.ctrl.effective_friction(&p);
        body.vel *= decay(friction, dt) * decay(p.drag, dt);

        // -- state-dependent speed scrub --
        match self.ctrl.current {
            DriftState::Drift => body.vel *= decay(p.drift_retention, dt),
            DriftState::Handbrake => body.vel *= decay(p.handbrake_retention, dt),
            DriftState::Normal => {}
        }

        // -- hard limits: reverse cap on the forward component only, then the
        //    scalar max-speed clamp --
        let f = body.vel.dot(fwd).max(-p.reverse_speed);
        let l = body.vel.dot(right);
        body.vel = fwd * f + right * l;
        let speed = body.vel.length();
        if speed > p.max_speed {
            body.vel *= p.max_speed / speed;
        }

        // -- integrate position --
        body.pos += body.vel * dt;

        self.telemetry = DriftTelemetry {
            state: self.ctrl.current,
            target: self.ctrl.target,
            progress: self.ctrl.progress,
            drift_angle_deg,
            lateral_vel,
            forward_speed,
            speed: body.speed(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skidphys_core::{vec2, Pose, Vec2};

    const DT: Scalar = 0.01667; // 16.67 ms

    fn engine() -> DriftEngine {
        DriftEngine::new(DriftParams::default().validated().unwrap())
    }

    fn body_at_rest() -> VehicleBody {
        VehicleBody::spawn(Pose::new(Vec2::ZERO, 0.0))
    }

    fn ctx(dt: Scalar, tick: u64) -> StepCtx {
        StepCtx { dt, tick, now: tick as Scalar * dt }
    }

    fn run(
        e: &mut DriftEngine,
        b: &mut VehicleBody,
        input: DriveInput,
        dt: Scalar,
        ticks: u64,
    ) {
        for t in 0..ticks {
            e.step(ctx(dt, t), input, b);
        }
    }

    #[test]
    fn straight_line_drive_stays_normal() {
        let mut e = engine();
        let mut b = body_at_rest();
        let input = DriveInput { throttle: 1.0, ..Default::default() };
        run(&mut e, &mut b, input, DT, 120); // ~2 s

        let t = e.telemetry();
        assert_eq!(t.state, DriftState::Normal);
        assert!(t.drift_angle_deg.abs() < 1e-3);
        assert!(t.speed > 0.0);
        assert!(t.speed <= e.params().max_speed + 1e-3);
        assert!(b.pos.x > 0.0);
        assert_eq!(b.pos.y, 0.0);
    }

    #[test]
    fn forced_drift_reaches_full_transition() {
        let mut e = engine();
        let mut b = body_at_rest();
        // heading 0: lateral is -120 against a threshold of 100
        b.vel = vec2(100.0, 120.0);
        let input = DriveInput { throttle: 1.0, ..Default::default() };
        for t in 0..15 {
            e.step(ctx(DT, t), input, &mut b);
            b.vel = vec2(100.0, 120.0); // hold the slide
        }
        let t = e.telemetry();
        assert_eq!(t.state, DriftState::Drift);
        assert_eq!(t.progress, 1.0);
        assert!(t.lateral_vel < 0.0); // +Y slide is LEFT of a +X heading
        assert!(t.drift_angle_deg < 0.0);
    }

    #[test]
    fn handbrake_overrides_drift_detection() {
        let mut e = engine();
        let mut b = body_at_rest();
        b.vel = vec2(100.0, 120.0);
        let input = DriveInput { handbrake: true, ..Default::default() };
        for t in 0..30 {
            e.step(ctx(DT, t), input, &mut b);
            b.vel = vec2(100.0, 120.0);
            assert_ne!(e.telemetry().target, DriftState::Drift);
        }
        assert_eq!(e.telemetry().state, DriftState::Handbrake);
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut e = engine();
        let mut b = body_at_rest();
        // lateral exactly at the threshold: |vel·right| == 100
        b.vel = vec2(0.0, 100.0);
        e.step(ctx(DT, 0), DriveInput::default(), &mut b);
        assert_eq!(e.telemetry().target, DriftState::Drift);

        let mut e = engine();
        let mut b = body_at_rest();
        b.vel = vec2(0.0, 99.9);
        e.step(ctx(DT, 0), DriveInput::default(), &mut b);
        assert_eq!(e.telemetry().target, DriftState::Normal);
    }

    #[test]
    fn progress_is_monotone_and_resets_only_on_retarget() {
        let mut e = engine();
        let mut b = body_at_rest();
        b.vel = vec2(100.0, 120.0);
        let mut last = 0.0;
        for t in 0..20 {
            e.step(ctx(DT, t), DriveInput::default(), &mut b);
            b.vel = vec2(100.0, 120.0);
            let p = e.telemetry().progress;
            if t > 0 {
                assert!(p >= last, "progress regressed within one transition");
            }
            last = p;
        }
        // target flips back to Normal: progress restarts small
        b.vel = Vec2::ZERO;
        e.step(ctx(DT, 20), DriveInput::default(), &mut b);
        let t = e.telemetry();
        assert_eq!(t.target, DriftState::Normal);
        assert!(t.progress < 0.1);
    }

    #[test]
    fn reverse_component_never_exceeds_cap() {
        let mut e = engine();
        let mut b = body_at_rest();
        let input = DriveInput { throttle: -1.0, ..Default::default() };
        for t in 0..600 {
            e.step(ctx(DT, t), input, &mut b);
            let fwd = skidphys_core::forward_from_heading(b.heading_deg());
            assert!(b.vel.dot(fwd) >= -e.params().reverse_speed - 1e-3);
        }
    }

    #[test]
    fn speed_never_exceeds_max() {
        let mut e = engine();
        let mut b = body_at_rest();
        // absurd injected velocity clamps back on the next tick
        b.vel = vec2(5000.0, -3000.0);
        let input = DriveInput { throttle: 1.0, steer: 1.0, handbrake: false };
        for t in 0..120 {
            e.step(ctx(DT, t), input, &mut b);
            assert!(b.speed() <= e.params().max_speed + 1e-2);
        }
    }

    #[test]
    fn zero_velocity_has_zero_drift_angle() {
        let mut e = engine();
        let mut b = body_at_rest();
        e.step(ctx(DT, 0), DriveInput::default(), &mut b);
        let t = e.telemetry();
        assert_eq!(t.drift_angle_deg, 0.0);
        assert_eq!(t.lateral_vel, 0.0);
        assert_eq!(t.state, DriftState::Normal);
    }

    #[test]
    fn tick_size_does_not_change_the_outcome_much() {
        // 1 s of full throttle via 60 small vs 10 large steps: the
        // time-exponentiated decays keep the results close (a flat per-frame
        // multiply would be off by a large factor here).
        let input = DriveInput { throttle: 1.0, ..Default::default() };

        let mut e1 = engine();
        let mut b1 = body_at_rest();
        run(&mut e1, &mut b1, input, 1.0 / 60.0, 60);

        let mut e2 = engine();
        let mut b2 = body_at_rest();
        run(&mut e2, &mut b2, input, 0.1, 10);

        let (s1, s2) = (b1.speed(), b2.speed());
        assert!(s1 > 0.0 && s2 > 0.0);
        let rel = (s1 - s2).abs() / s1.max(s2);
        assert!(rel < 0.08, "tick-size divergence {rel}");
        assert_eq!(b1.heading_deg(), b2.heading_deg());
    }

    #[test]
    fn zero_steer_never_rotates() {
        let mut e = engine();
        let mut b = body_at_rest();
        b.vel = vec2(400.0, 0.0);
        run(&mut e, &mut b, DriveInput { throttle: 1.0, ..Default::default() }, DT, 60);
        assert_eq!(b.heading_deg(), 0.0);
    }

    #[test]
    fn steering_rate_steps_at_tight_turn_speed() {
        let p = DriftParams::default().validated().unwrap();
        let steer = DriveInput { steer: 1.0, ..Default::default() };

        let mut e = DriftEngine::new(p);
        let mut b = body_at_rest();
        b.vel = vec2(50.0, 0.0); // below tight_turn_speed
        e.step(ctx(DT, 0), steer, &mut b);
        let slow_turn = b.heading_deg();

        let mut e = DriftEngine::new(p);
        let mut b = body_at_rest();
        b.vel = vec2(400.0, 0.0);
        e.step(ctx(DT, 0), steer, &mut b);
        let fast_turn = b.heading_deg();

        assert!((slow_turn - p.turn_rate_low * DT).abs() < 1e-4);
        assert!((fast_turn - p.turn_rate_high * DT).abs() < 1e-4);
    }
}
