//! Names and slots shared with the shader program.
//!
//! The shader source itself belongs to the backend; these constants are the
//! only part of it the mesh side relies on.

/// Vertex attribute names.
pub mod attributes {
    pub const POSITION: &str = "position";
    pub const NORMAL: &str = "normal";
    pub const TANGENT: &str = "tangent";
    pub const UV: &str = "uv";
}

/// Uniform names.
pub mod uniforms {
    pub const PROJECTION: &str = "projection";
    pub const MODEL_VIEW: &str = "model_view";
    pub const NORMAL_MATRIX: &str = "normal_matrix";
    pub const COLOR: &str = "color";
    pub const LIGHT_LOCATION: &str = "light_location";
    pub const DIFFUSE_TEXTURE: &str = "diffuse_texture";
    pub const NORMAL_TEXTURE: &str = "normal_texture";
    pub const SPECULAR_TEXTURE: &str = "specular_texture";
}

/// Texture units used by the normal-mapped variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum TextureSlot {
    Diffuse = 0,
    Normal = 1,
    Specular = 2,
}

impl TextureSlot {
    pub const ALL: [TextureSlot; 3] = [TextureSlot::Diffuse, TextureSlot::Normal, TextureSlot::Specular];

    pub fn unit(self) -> u32 {
        self as u32
    }

    /// Sampler uniform bound to this unit.
    pub fn uniform_name(self) -> &'static str {
        match self {
            TextureSlot::Diffuse => uniforms::DIFFUSE_TEXTURE,
            TextureSlot::Normal => uniforms::NORMAL_TEXTURE,
            TextureSlot::Specular => uniforms::SPECULAR_TEXTURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_units() {
        let units: Vec<u32> = TextureSlot::ALL.iter().map(|s| s.unit()).collect();
        assert_eq!(units, vec![0, 1, 2]);
        assert_eq!(TextureSlot::Normal.uniform_name(), "normal_texture");
    }
}
