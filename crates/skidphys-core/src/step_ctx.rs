use crate::Scalar;

/// Per-tick context passed into every subsystem step.
#[derive(Copy, Clone, Debug)]
pub struct StepCtx {
    pub dt: Scalar,
    pub tick: u64,
    /// Simulation clock at the START of this tick (seconds).
    pub now: Scalar,
}
