//! Polled input: the host writes raw digital button states, then calls
//! `InputRig::update(now)` exactly once per tick before the movement engine
//! reads the snapshot. All timing is simulation-clock seconds handed in by
//! the caller; the rig never reads a wall clock.

use skidphys_core::Scalar;

#[derive(Copy, Clone, Debug)]
pub struct InputParams {
    /// Minimum simulation time between two accepted restart triggers (s).
    pub restart_cooldown: Scalar,
}

impl Default for InputParams {
    fn default() -> Self {
        Self { restart_cooldown: 0.3 }
    }
}

/// Raw device states for one tick, as sampled by the host.
#[derive(Copy, Clone, Debug, Default)]
pub struct RawButtons {
    pub accelerate: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
    pub handbrake: bool,
    pub restart: bool,
    pub pause: bool,
}

/// Normalized view of one tick's input.
#[derive(Copy, Clone, Debug, Default)]
pub struct InputSnapshot {
    /// -1, 0 or 1. Opposite keys cancel to 0.
    pub throttle: Scalar,
    /// -1, 0 or 1; positive steers left (heading increases, CCW).
    pub steer: Scalar,
    pub handbrake: bool,
    /// Restart edge that survived the debounce this tick.
    pub restart: bool,
    /// Pause pressed this exact tick.
    pub pause: bool,
}

pub struct InputRig {
    params: InputParams,
    raw: RawButtons,
    prev: RawButtons,
    snapshot: InputSnapshot,
    last_restart_t: Option<Scalar>,
}

impl InputRig {
    pub fn new(params: InputParams) -> Self {
        Self {
            params,
            raw: RawButtons::default(),
            prev: RawButtons::default(),
            snapshot: InputSnapshot::default(),
            last_restart_t: None,
        }
    }

    /// Host-side handle for writing this tick's device states.
    pub fn raw_mut(&mut self) -> &mut RawButtons {
        &mut self.raw
    }

    pub fn snapshot(&self) -> InputSnapshot {
        self.snapshot
    }

    /// Derive the normalized snapshot for this tick. `now` is the simulation
    /// clock in seconds and must be monotone across calls.
    pub fn update(&mut self, now: Scalar) -> InputSnapshot {
        let axis = |pos: bool, neg: bool| -> Scalar {
            match (pos, neg) {
                (true, false) => 1.0,
                (false, true) => -1.0,
                _ => 0.0,
            }
        };

        let restart_edge = self.raw.restart && !self.prev.restart;
        let restart = restart_edge && self.debounce_restart(now);

        self.snapshot = InputSnapshot {
            throttle: axis(self.raw.accelerate, self.raw.brake),
            steer: axis(self.raw.steer_left, self.raw.steer_right),
            handbrake: self.raw.handbrake,
            restart,
            pause: self.raw.pause && !self.prev.pause,
        };
        self.prev = self.raw;
        self.snapshot
    }

    /// Full reinitialization, including the debounce window and edge memory.
    pub fn reset(&mut self) {
        self.raw = RawButtons::default();
        self.prev = RawButtons::default();
        self.snapshot = InputSnapshot::default();
        self.last_restart_t = None;
    }

    // Accepted trigger restarts the cooldown; rejected ones do not.
    fn debounce_restart(&mut self, now: Scalar) -> bool {
        let ok = match self.last_restart_t {
            None => true,
            Some(t) => now - t >= self.params.restart_cooldown,
        };
        if ok {
            self.last_restart_t = Some(now);
        }
        ok
    }
}
