use skidphys_core::Scalar;
use std::fmt;

/// Handling tunables. Units: world units/s for speeds, world units/s^2 for
/// accelerations, deg/s for turn rates, seconds for durations. Friction,
/// retention and drag values are per-second retention fractions in [0, 1]
/// (applied as `value.powf(dt)` each tick).
#[derive(Copy, Clone, Debug)]
pub struct DriftParams {
    pub max_speed: Scalar,
    pub accel: Scalar,
    pub brake_force: Scalar,
    /// Reverse speed cap; also the reverse acceleration is `accel`.
    pub reverse_speed: Scalar,
    /// Turn rate below `tight_turn_speed` (deg/s).
    pub turn_rate_low: Scalar,
    /// Turn rate at or above `tight_turn_speed` (deg/s).
    pub turn_rate_high: Scalar,
    /// Speed below which the low (tight) turn rate applies.
    pub tight_turn_speed: Scalar,
    /// Lateral velocity (units/s) at which the Drift state engages
    /// (inclusive: `|lateral| >= threshold` drifts).
    pub drift_threshold: Scalar,
    pub friction_normal: Scalar,
    pub friction_drift: Scalar,
    pub friction_handbrake: Scalar,
    /// Seconds for a handling-state change to fully propagate.
    pub transition_time: Scalar,
    /// Extra per-second speed retention while drifting.
    pub drift_retention: Scalar,
    /// Extra per-second speed retention under handbrake.
    pub handbrake_retention: Scalar,
    /// Baseline per-second velocity retention applied in every state.
    pub drag: Scalar,
    /// Angular damping in [0, 1]. Heading is integrated directly from the
    /// steer axis, so this value only participates in validation.
    pub angular_drag: Scalar,
}

impl Default for DriftParams {
    fn default() -> Self {
        Self {
            max_speed: 600.0,
            accel: 900.0,
            brake_force: 1200.0,
            reverse_speed: 220.0,
            turn_rate_low: 220.0,
            turn_rate_high: 140.0,
            tight_turn_speed: 160.0,
            drift_threshold: 100.0,
            friction_normal: 0.2,
            friction_drift: 0.55,
            friction_handbrake: 0.8,
            transition_time: 0.25,
            drift_retention: 0.9,
            handbrake_retention: 0.62,
            drag: 0.95,
            angular_drag: 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// Rates and durations must be strictly positive and finite.
    NonPositive { field: &'static str, value: Scalar },
    /// Friction/retention/drag fractions must lie in [0, 1].
    OutOfUnit { field: &'static str, value: Scalar },
    /// Speed thresholds must ascend where they are compared.
    Ordering { lo: &'static str, hi: &'static str },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::NonPositive { field, value } => {
                write!(f, "{field} must be strictly positive and finite, got {value}")
            }
            ParamError::OutOfUnit { field, value } => {
                write!(f, "{field} must be in [0, 1], got {value}")
            }
            ParamError::Ordering { lo, hi } => {
                write!(f, "{lo} must be below {hi}")
            }
        }
    }
}

impl std::error::Error for ParamError {}

impl DriftParams {
    /// Fail-fast validation: a `DriftEngine` is only constructible from a
    /// params value that has passed through here. No silent clamping.
    pub fn validated(self) -> Result<Self, ParamError> {
        let positive = [
            ("max_speed", self.max_speed),
            ("accel", self.accel),
            ("brake_force", self.brake_force),
            ("reverse_speed", self.reverse_speed),
            ("turn_rate_low", self.turn_rate_low),
            ("turn_rate_high", self.turn_rate_high),
            ("tight_turn_speed", self.tight_turn_speed),
            ("drift_threshold", self.drift_threshold),
            ("transition_time", self.transition_time),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ParamError::NonPositive { field, value });
            }
        }

        let unit = [
            ("friction_normal", self.friction_normal),
            ("friction_drift", self.friction_drift),
            ("friction_handbrake", self.friction_handbrake),
            ("drift_retention", self.drift_retention),
            ("handbrake_retention", self.handbrake_retention),
            ("drag", self.drag),
            ("angular_drag", self.angular_drag),
        ];
        for (field, value) in unit {
            if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
                return Err(ParamError::OutOfUnit { field, value });
            }
        }

        if self.tight_turn_speed >= self.max_speed {
            return Err(ParamError::Ordering { lo: "tight_turn_speed", hi: "max_speed" });
        }
        Ok(self)
    }
}
