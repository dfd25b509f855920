//! Viewer configuration, loadable from JSON. Missing keys take defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sievert_core::traits::Validate;
use sievert_core::{Result, SvError};
use sievert_geometry::SurfaceParams;
use sievert_mesh::MeshOptions;
use sievert_render::{Camera, Material, RenderMode};

/// Frames drawn when nothing else is asked for.
pub const DEFAULT_FRAMES: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub surface: SurfaceParams,
    pub mesh: MeshOptions,
    pub mode: RenderMode,
    pub camera: Camera,
    pub material: Material,
    /// Number of frames the headless loop draws.
    pub frames: u32,
    /// Radians the camera orbits between frames.
    pub orbit_step: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceParams::default(),
            mesh: MeshOptions::default(),
            mode: RenderMode::default(),
            camera: Camera::default(),
            material: Material::default(),
            frames: DEFAULT_FRAMES,
            orbit_step: 0.02,
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| SvError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
            .map_err(|e| SvError::Config(format!("{}: {e}", path.display())))
    }
}

impl Validate for ViewerConfig {
    fn validate(&self) -> Result<()> {
        self.surface.validate()?;
        self.mesh.tolerance.validate()?;
        if !self.orbit_step.is_finite() {
            return Err(SvError::Config("orbit_step must be finite".into()));
        }
        Ok(())
    }
}
