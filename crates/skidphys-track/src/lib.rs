//! Track definitions: the serde record a track file deserializes into, eager
//! geometry validation, and conversion into the runtime `DriveArea` + spawn
//! pose. A track that fails validation never becomes playable.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use skidphys_core::{vec2, Pose, Scalar, Vec2};
use skidphys_geom::{DriveArea, Polygon};
use std::fmt;
use std::path::Path;

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct PointDef {
    pub x: Scalar,
    pub y: Scalar,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct SpawnDef {
    pub x: Scalar,
    pub y: Scalar,
    /// Heading in degrees (0 = +X, CCW).
    pub angle: Scalar,
}

/// On-disk track shape. `inner_boundaries` are excluded regions fully nested
/// inside the outer ring; nesting is a data-authoring contract, not enforced.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDef {
    pub outer_boundary: Vec<PointDef>,
    #[serde(default)]
    pub inner_boundaries: Vec<Vec<PointDef>>,
    pub spawn_point: SpawnDef,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrackError {
    /// Every ring needs at least 3 points. Ring 0 is the outer boundary,
    /// ring N is `inner_boundaries[N-1]`.
    TooFewPoints { ring: usize, count: usize },
    NonFiniteCoord { ring: usize, index: usize },
    NonFiniteSpawn,
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackError::TooFewPoints { ring, count } => {
                write!(f, "boundary ring {ring} has {count} points, need at least 3")
            }
            TrackError::NonFiniteCoord { ring, index } => {
                write!(f, "boundary ring {ring} point {index} is not finite")
            }
            TrackError::NonFiniteSpawn => write!(f, "spawn point is not finite"),
        }
    }
}

impl std::error::Error for TrackError {}

impl TrackDef {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let def: TrackDef = serde_json::from_str(json).context("failed to parse track JSON")?;
        def.validate()?;
        Ok(def)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read track file {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("invalid track {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), TrackError> {
        let rings = std::iter::once(&self.outer_boundary).chain(self.inner_boundaries.iter());
        for (ring, pts) in rings.enumerate() {
            if pts.len() < 3 {
                return Err(TrackError::TooFewPoints { ring, count: pts.len() });
            }
            for (index, p) in pts.iter().enumerate() {
                if !(p.x.is_finite() && p.y.is_finite()) {
                    return Err(TrackError::NonFiniteCoord { ring, index });
                }
            }
        }
        let s = &self.spawn_point;
        if !(s.x.is_finite() && s.y.is_finite() && s.angle.is_finite()) {
            return Err(TrackError::NonFiniteSpawn);
        }
        Ok(())
    }

    /// Build the immutable runtime geometry. Call after `validate`.
    pub fn drive_area(&self) -> DriveArea {
        let ring = |pts: &[PointDef]| -> Polygon {
            Polygon::new(pts.iter().map(|p| vec2(p.x, p.y)).collect::<Vec<Vec2>>())
        };
        DriveArea::new(
            ring(&self.outer_boundary),
            self.inner_boundaries.iter().map(|h| ring(h)).collect(),
        )
    }

    pub fn spawn_pose(&self) -> Pose {
        Pose::new(vec2(self.spawn_point.x, self.spawn_point.y), self.spawn_point.angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK: &str = r#"{
        "outerBoundary": [
            {"x": 0, "y": 0}, {"x": 200, "y": 0},
            {"x": 200, "y": 120}, {"x": 0, "y": 120}
        ],
        "innerBoundaries": [[
            {"x": 60, "y": 40}, {"x": 140, "y": 40},
            {"x": 140, "y": 80}, {"x": 60, "y": 80}
        ]],
        "spawnPoint": {"x": 20, "y": 20, "angle": 90}
    }"#;

    #[test]
    fn parses_and_builds_geometry() {
        let def = TrackDef::from_json_str(TRACK).unwrap();
        let area = def.drive_area();
        assert!(area.contains(vec2(20.0, 20.0)));
        assert!(!area.contains(vec2(100.0, 60.0))); // inside the hole
        assert!(!area.contains(vec2(500.0, 60.0)));
        let pose = def.spawn_pose();
        assert_eq!(pose.pos, vec2(20.0, 20.0));
        assert_eq!(pose.heading_deg, 90.0);
    }

    #[test]
    fn inner_boundaries_are_optional() {
        let json = r#"{
            "outerBoundary": [{"x": 0, "y": 0}, {"x": 10, "y": 0}, {"x": 5, "y": 10}],
            "spawnPoint": {"x": 5, "y": 3, "angle": 0}
        }"#;
        let def = TrackDef::from_json_str(json).unwrap();
        assert!(def.inner_boundaries.is_empty());
        assert!(def.drive_area().contains(vec2(5.0, 3.0)));
    }

    #[test]
    fn rejects_degenerate_ring() {
        let def = TrackDef {
            outer_boundary: vec![PointDef { x: 0.0, y: 0.0 }, PointDef { x: 1.0, y: 0.0 }],
            inner_boundaries: vec![],
            spawn_point: SpawnDef { x: 0.0, y: 0.0, angle: 0.0 },
        };
        assert_eq!(def.validate(), Err(TrackError::TooFewPoints { ring: 0, count: 2 }));
    }

    #[test]
    fn rejects_non_finite_hole_point() {
        let sq = vec![
            PointDef { x: 0.0, y: 0.0 },
            PointDef { x: 10.0, y: 0.0 },
            PointDef { x: 10.0, y: 10.0 },
        ];
        let mut bad = sq.clone();
        bad[1].y = Scalar::NAN;
        let def = TrackDef {
            outer_boundary: sq,
            inner_boundaries: vec![bad],
            spawn_point: SpawnDef { x: 1.0, y: 1.0, angle: 0.0 },
        };
        assert_eq!(def.validate(), Err(TrackError::NonFiniteCoord { ring: 1, index: 1 }));
    }

    #[test]
    fn malformed_json_reports_context() {
        let err = TrackDef::from_json_str("{\"outerBoundary\": [").unwrap_err();
        assert!(format!("{err:#}").contains("parse track JSON"));
    }
}
