use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-Aligned Bounding Box in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb3 {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb3 {
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, or `None` for an empty slice.
    ///
    /// Non-finite coordinates are skipped so a single blown-up sample does not
    /// swallow the whole box.
    pub fn from_points(points: &[Point3]) -> Option<Self> {
        points
            .iter()
            .filter(|p| p.is_finite())
            .fold(None, |acc: Option<Self>, &p| match acc {
                None => Some(Self::new(p, p)),
                Some(b) => Some(b.include(p)),
            })
    }

    /// Grow the box so it contains `p`.
    pub fn include(self, p: Point3) -> Self {
        Self {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    pub fn center(&self) -> Point3 {
        (self.min + self.max) * 0.5
    }

    pub fn extents(&self) -> Vector3 {
        self.max - self.min
    }

    /// Radius of the sphere through the box corners, centered on [`Self::center`].
    pub fn bounding_radius(&self) -> f64 {
        self.extents().length() * 0.5
    }

    pub fn contains_point(&self, p: Point3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}
