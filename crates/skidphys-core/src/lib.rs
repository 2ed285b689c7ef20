pub mod scalar;
pub mod types;
pub mod math;
pub mod step_ctx;
pub mod hash;
pub mod determinism;

pub use scalar::Scalar;
pub use types::{Pose, Vec2, vec2};
pub use math::{decay, forward_from_heading, lerp, right_of, wrap_deg};
pub use step_ctx::StepCtx;
pub use hash::{StepHasher, hash_scalar, hash_vec2};
pub use determinism::DeterminismContract;
