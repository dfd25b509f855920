pub mod aabb;
pub mod scalar;
pub mod vector;

pub use glam::{DMat3, DMat4, DQuat, DVec2, DVec3, DVec4};
pub use aabb::Aabb3;
pub use scalar::{lerp, normalize_range};
pub use vector::normalize_or;

pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector2 = DVec2;
pub type Vector3 = DVec3;
