//! The orchestrator: one `World` owns the vehicle body, the drift engine,
//! the input rig, the track geometry and the off-track tracker, and advances
//! them in a fixed order each tick. All timing comes in through `step(dt)`;
//! nothing in here reads a wall clock.

pub mod ledger;
pub mod offtrack;

pub use ledger::{Ledger, LedgerEvent};
pub use offtrack::OffTrackTracker;

use anyhow::Result;
use skidphys_core::{hash_scalar, hash_vec2, Pose, Scalar, StepCtx, StepHasher};
use skidphys_geom::DriveArea;
use skidphys_input::{InputParams, InputRig, InputSnapshot, RawButtons};
use skidphys_track::TrackDef;
use skidphys_vehicle::{DriftEngine, DriftParams, DriftTelemetry, DriveInput, VehicleBody};

pub struct WorldBuilder {
    params: DriftParams,
    input: InputParams,
}

impl WorldBuilder {
    pub fn new() -> Self {
        Self { params: DriftParams::default(), input: InputParams::default() }
    }

    pub fn with_params(mut self, params: DriftParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_input(mut self, input: InputParams) -> Self {
        self.input = input;
        self
    }

    /// Validates params and track eagerly; an invalid configuration never
    /// produces a `World`.
    pub fn build(self, track: &TrackDef) -> Result<World> {
        let params = self.params.validated()?;
        track.validate()?;
        let spawn = track.spawn_pose();
        Ok(World {
            body: VehicleBody::spawn(spawn),
            engine: DriftEngine::new(params),
            input: InputRig::new(self.input),
            area: track.drive_area(),
            spawn,
            tracker: OffTrackTracker::default(),
            ledger: Ledger::default(),
            tick: 0,
            time: 0.0,
        })
    }
}

impl Default for WorldBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything external collaborators need from one tick.
#[derive(Clone, Debug)]
pub struct StepReport {
    pub telemetry: DriftTelemetry,
    pub input: InputSnapshot,
    pub off_road: bool,
    pub off_road_time: Scalar,
    pub events: Vec<LedgerEvent>,
    /// True when this tick consumed an accepted restart trigger.
    pub restarted: bool,
}

pub struct World {
    body: VehicleBody,
    engine: DriftEngine,
    input: InputRig,
    area: DriveArea,
    spawn: Pose,
    tracker: OffTrackTracker,
    ledger: Ledger,
    tick: u64,
    time: Scalar,
}

impl World {
    /// Host-side handle for writing this tick's device states before `step`.
    pub fn raw_input_mut(&mut self) -> &mut RawButtons {
        self.input.raw_mut()
    }

    pub fn body(&self) -> &VehicleBody {
        &self.body
    }

    pub fn telemetry(&self) -> DriftTelemetry {
        self.engine.telemetry()
    }

    pub fn area(&self) -> &DriveArea {
        &self.area
    }

    pub fn off_road(&self) -> bool {
        self.tracker.off_road()
    }

    pub fn off_road_time(&self) -> Scalar {
        self.tracker.off_road_time()
    }

    pub fn time(&self) -> Scalar {
        self.time
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Advance one tick. Input is polled first, then the engine (which reads
    /// the previous tick's velocity for classification before integrating),
    /// then the off-track sample against the post-integration position.
    pub fn step(&mut self, dt: Scalar) -> StepReport {
        let snapshot = self.input.update(self.time);
        let t_end = self.time + dt;

        if snapshot.restart {
            self.reset();
            self.ledger.push(LedgerEvent::Reset { t: t_end });
            self.time = t_end;
            self.tick += 1;
            return StepReport {
                telemetry: self.engine.telemetry(),
                input: snapshot,
                off_road: false,
                off_road_time: 0.0,
                events: self.ledger.take(),
                restarted: true,
            };
        }

        let before = self.engine.telemetry().state;
        let ctx = StepCtx { dt, tick: self.tick, now: self.time };
        let drive = DriveInput {
            throttle: snapshot.throttle,
            steer: snapshot.steer,
            handbrake: snapshot.handbrake,
        };
        self.engine.step(ctx, drive, &mut self.body);

        let after = self.engine.telemetry().state;
        if after != before {
            self.ledger.push(LedgerEvent::StateChange { from: before, to: after, t: t_end });
        }

        if let Some(e) = self.tracker.sample(self.body.pos, t_end, dt, &self.area) {
            self.ledger.push(e);
        }

        self.time = t_end;
        self.tick += 1;
        StepReport {
            telemetry: self.engine.telemetry(),
            input: snapshot,
            off_road: self.tracker.off_road(),
            off_road_time: self.tracker.off_road_time(),
            events: self.ledger.take(),
            restarted: false,
        }
    }

    /// Full reinitialization: body back at the spawn pose and at rest,
    /// classification settled in Normal, off-track counters zeroed. The
    /// session clock keeps running so input debounce stays meaningful.
    pub fn reset(&mut self) {
        self.body = VehicleBody::spawn(self.spawn);
        self.engine.reset();
        self.tracker.reset();
    }

    /// Deterministic digest of the dynamic state; two runs fed identical
    /// inputs at identical tick sizes digest identically.
    pub fn state_digest(&self) -> [u8; 32] {
        let mut h = StepHasher::new();
        hash_vec2(&mut h, &self.body.pos);
        hash_scalar(&mut h, self.body.heading_deg());
        hash_vec2(&mut h, &self.body.vel);
        let t = self.engine.telemetry();
        h.update_bytes(&[t.state.as_u8(), t.target.as_u8()]);
        hash_scalar(&mut h, t.progress);
        h.update_bytes(&[self.tracker.off_road() as u8]);
        hash_scalar(&mut h, self.tracker.off_road_time());
        h.update_bytes(&self.tracker.off_road_count().to_le_bytes());
        h.update_bytes(&self.tick.to_le_bytes());
        h.finalize()
    }
}
