use skidphys_core::{Scalar, Vec2};
use skidphys_vehicle::DriftState;

/// Events produced by one or more ticks. Replaces the usual emitter/listener
/// registry: the world owns the sink, the caller drains it, lifetimes stay
/// explicit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LedgerEvent {
    OffRoad { pos: Vec2, t: Scalar },
    OnRoad { pos: Vec2, t: Scalar },
    StateChange { from: DriftState, to: DriftState, t: Scalar },
    Reset { t: Scalar },
}

#[derive(Default)]
pub struct Ledger {
    events: Vec<LedgerEvent>,
}

impl Ledger {
    pub fn push(&mut self, e: LedgerEvent) {
        self.events.push(e);
    }

    /// Hand the accumulated events to the caller and clear the sink.
    pub fn take(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
