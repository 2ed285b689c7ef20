//! Vehicle body plus the drift/movement engine: acceleration, speed-dependent
//! steering, a three-state handling classifier (Normal | Drift | Handbrake)
//! with smoothed friction transitions, and the hard speed clamps.

pub mod params;
pub mod body;
pub mod drift;

pub use params::{DriftParams, ParamError};
pub use body::VehicleBody;
pub use drift::{DriftEngine, DriftState, DriftTelemetry, DriveInput};
