// Scenario soak for the drift core: laps a rectangular ring track at a fixed
// tick, prints periodic telemetry, and finishes with a replay-digest check.
//
// Env knobs: SKID_TICKS (total ticks), SKID_HZ (tick rate),
// SKID_PRINT_EVERY (telemetry cadence in ticks, 0 = quiet).

use skidphys_core::{DeterminismContract, Scalar};
use skidphys_track::{PointDef, SpawnDef, TrackDef};
use skidphys_vehicle::DriftState;
use skidphys_world::{LedgerEvent, World, WorldBuilder};

fn env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key).ok().and_then(|s| s.parse::<u32>().ok()).unwrap_or(default)
}

fn pt(x: Scalar, y: Scalar) -> PointDef {
    PointDef { x, y }
}

// Ring: 2000x1200 outer rectangle with an excluded 1200x400 infield.
fn ring_track() -> TrackDef {
    TrackDef {
        outer_boundary: vec![
            pt(0.0, 0.0),
            pt(2000.0, 0.0),
            pt(2000.0, 1200.0),
            pt(0.0, 1200.0),
        ],
        inner_boundaries: vec![vec![
            pt(400.0, 400.0),
            pt(1600.0, 400.0),
            pt(1600.0, 800.0),
            pt(400.0, 800.0),
        ]],
        spawn_point: SpawnDef { x: 1000.0, y: 200.0, angle: 0.0 },
    }
}

// Scripted driver: full throttle, hard left near the ends of the straights,
// an occasional handbrake stab entering the corner.
fn drive(w: &mut World, tick: u32) {
    let x = w.body().pos.x;
    let cornering = !(300.0..=1700.0).contains(&x);
    let raw = w.raw_input_mut();
    raw.accelerate = true;
    raw.steer_left = cornering;
    raw.steer_right = false;
    raw.handbrake = cornering && tick % 7 == 0;
}

fn run(ticks: u32, dt: Scalar, print_every: u32) -> World {
    let mut w = WorldBuilder::new()
        .build(&ring_track())
        .expect("default params and ring track must validate");

    let mut drift_ticks = 0u32;
    let mut excursions = 0u32;
    for t in 0..ticks {
        drive(&mut w, t);
        let r = w.step(dt);
        if r.telemetry.state == DriftState::Drift {
            drift_ticks += 1;
        }
        for e in &r.events {
            if let LedgerEvent::OffRoad { pos, t: at } = e {
                excursions += 1;
                println!("[offroad] t={at:.2}s pos=({:.1}, {:.1})", pos.x, pos.y);
            }
        }
        if print_every > 0 && t % print_every == 0 {
            let tel = r.telemetry;
            println!(
                "t={:>6.2}s pos=({:>7.1},{:>7.1}) v={:>6.1} state={:?} angle={:>6.1} off={:.2}s",
                w.time(),
                w.body().pos.x,
                w.body().pos.y,
                tel.speed,
                tel.state,
                tel.drift_angle_deg,
                r.off_road_time,
            );
        }
    }
    println!(
        "done: {ticks} ticks, {drift_ticks} drifting, {excursions} off-track excursions, {:.2}s off-road",
        w.off_road_time()
    );
    w
}

fn main() {
    let contract = DeterminismContract::default_contract();
    let ticks = env_u32("SKID_TICKS", 3600);
    let hz = env_u32("SKID_HZ", 0);
    let print_every = env_u32("SKID_PRINT_EVERY", 60);
    let dt = if hz > 0 { 1.0 / hz as Scalar } else { contract.fixed_dt };

    let a = run(ticks, dt, print_every);

    // replay check: identical script + tick size must digest identically
    let b = run(ticks, dt, 0);
    let (da, db) = (a.state_digest(), b.state_digest());
    assert_eq!(da, db, "replay digest mismatch");
    println!("replay digest ok: {}", hex_prefix(&da));
}

fn hex_prefix(d: &[u8; 32]) -> String {
    d[..8].iter().map(|b| format!("{b:02x}")).collect()
}
