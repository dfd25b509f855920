use serde::{Deserialize, Serialize};
use sievert_math::{Aabb3, DMat4, DQuat, DVec3, Point3};

/// Trackball-style camera: the model is rotated about `target`, then pushed
/// `distance` units down the view axis.
///
/// `model_view = translate(0, 0, -distance) * rotation * translate(-target)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub rotation: DQuat,   // accumulated trackball rotation
    pub target: Point3,    // model-space point kept at the view center
    pub distance: f64,     // eye to target
    pub fov_y: f64,        // vertical FOV in radians
    pub aspect: f64,       // width/height
    pub near: f64,         // near clip plane
    pub far: f64,          // far clip plane
}

impl Camera {
    /// Model-view matrix (column-major, right-handed, camera looks down -Z).
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::from_translation(DVec3::new(0.0, 0.0, -self.distance))
            * DMat4::from_quat(self.rotation)
            * DMat4::from_translation(-self.target)
    }

    /// OpenGL-style perspective projection (NDC z in -1..1).
    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Inverse-transpose of the model-view, for transforming normals.
    pub fn normal_matrix(&self) -> DMat4 {
        self.view_matrix().inverse().transpose()
    }

    /// Eye position in model space.
    pub fn eye(&self) -> Point3 {
        self.view_matrix().inverse().transform_point3(Point3::ZERO)
    }

    /// Rotate the model by a drag of `(delta_x, delta_y)` radians in the view
    /// plane: horizontal drags spin about the view Y axis, vertical drags
    /// about the view X axis.
    pub fn orbit(&mut self, delta_x: f64, delta_y: f64) {
        let angle = delta_x.hypot(delta_y);
        if angle <= f64::EPSILON {
            return;
        }
        let axis = DVec3::new(delta_y, delta_x, 0.0) / angle;
        self.rotation = (DQuat::from_axis_angle(axis, angle) * self.rotation).normalize();
    }

    /// Move the eye toward the target. Positive delta moves closer; the eye
    /// never crosses or touches the target.
    pub fn zoom(&mut self, delta: f64) {
        let new_distance = self.distance - delta;
        if new_distance > 0.1 {
            self.distance = new_distance;
        }
    }

    /// Slide the target in the view plane by `(dx, dy)` view units.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.target -= self.rotation.inverse() * DVec3::new(dx, dy, 0.0);
    }

    pub fn set_aspect(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Center `aabb` and back off until its bounding sphere fits the vertical
    /// FOV, tightening the clip planes around it.
    pub fn fit_to_aabb(&mut self, aabb: &Aabb3) {
        let radius = aabb.bounding_radius().max(1e-3);
        self.target = aabb.center();
        self.distance = radius / (self.fov_y / 2.0).sin();
        self.near = (self.distance - radius).max(1e-3);
        self.far = self.distance + radius;
    }
}

impl Default for Camera {
    /// Classic framing of the surface: 22.5 degree FOV, square viewport, the
    /// model 10 units away and tilted 0.7 rad about `(0.707, 0.707, 0)`.
    fn default() -> Self {
        Self {
            rotation: DQuat::from_axis_angle(DVec3::new(0.707, 0.707, 0.0).normalize(), 0.7),
            target: Point3::ZERO,
            distance: 10.0,
            fov_y: std::f64::consts::PI / 8.0,
            aspect: 1.0,
            near: 8.0,
            far: 12.0,
        }
    }
}
