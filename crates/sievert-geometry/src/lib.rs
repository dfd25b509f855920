//! Sievert surface geometry: the closed-form surface and grid sampling.

pub mod params;
pub mod sampling;
pub mod surface;

pub use params::SurfaceParams;
pub use sampling::{sample_grid, GridSamples, GridSpec};
pub use surface::{SievertSurface, Surface};
