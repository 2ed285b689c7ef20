use crate::ledger::LedgerEvent;
use skidphys_core::{Scalar, Vec2};
use skidphys_geom::DriveArea;

/// Edge-triggered off-track bookkeeping. Sampled once per tick against an
/// immutable `DriveArea`; an event fires only when the on/off status changes.
#[derive(Copy, Clone, Debug, Default)]
pub struct OffTrackTracker {
    off_road: bool,
    off_road_time: Scalar,
    off_road_count: u32,
    last_transition_t: Scalar,
}

impl OffTrackTracker {
    pub fn off_road(&self) -> bool {
        self.off_road
    }

    pub fn off_road_time(&self) -> Scalar {
        self.off_road_time
    }

    pub fn off_road_count(&self) -> u32 {
        self.off_road_count
    }

    pub fn last_transition_t(&self) -> Scalar {
        self.last_transition_t
    }

    /// Compare this tick's position to the previous status. Time accrues for
    /// every tick whose resulting status is off-road, including the tick that
    /// crossed the boundary.
    pub fn sample(
        &mut self,
        pos: Vec2,
        now: Scalar,
        dt: Scalar,
        area: &DriveArea,
    ) -> Option<LedgerEvent> {
        let off = !area.contains(pos);
        let event = if off != self.off_road {
            self.off_road = off;
            self.last_transition_t = now;
            if off {
                self.off_road_count += 1;
                Some(LedgerEvent::OffRoad { pos, t: now })
            } else {
                Some(LedgerEvent::OnRoad { pos, t: now })
            }
        } else {
            None
        };
        if self.off_road {
            self.off_road_time += dt;
        }
        event
    }

    /// Zero all counters. Does NOT reposition the vehicle; that belongs to
    /// the caller's restart path.
    pub fn reset(&mut self) {
        *self = OffTrackTracker::default();
    }
}
