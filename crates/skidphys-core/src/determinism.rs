#[derive(Copy, Clone, Debug)]
pub struct DeterminismContract {
    pub fixed_dt: f32,
    pub float: &'static str,
    pub time_source: &'static str,
}

impl DeterminismContract {
    /// Contract the test suite and bench harness pin against: one fixed tick,
    /// f32 math, and all timing threaded through explicit `dt` parameters
    /// (never an internal wall clock).
    pub fn default_contract() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            float: "f32",
            time_source: "explicit-dt",
        }
    }
}
