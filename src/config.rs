//! Render configuration loaded from TOML.
//!
//! Every section and field is optional; anything left out takes the value of
//! the built-in diorama setup. Command-line flags are applied on top with
//! [`Config::apply_overrides`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use glam::Vec3A;
use log::{debug, warn};
use serde::Deserialize;

use crate::camera::{Camera, Viewport};
use crate::cuboid::Cuboid;
use crate::error::{RenderError, Result};
use crate::material::rgb8;
use crate::output::OutputFormat;
use crate::scene::Light;
use crate::skybox::Skybox;
use crate::texture::{CheckerSpec, TextureSource, TextureStore};
use crate::tracer::{TraceSettings, DEFAULT_BIAS, DEFAULT_MAX_DEPTH};

/// Top-level configuration file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub render: RenderConfig,
    pub camera: CameraConfig,
    pub light: LightConfig,
    pub skybox: SkyboxConfig,
    /// Texture sources by key
    pub textures: BTreeMap<String, TextureSource>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub max_depth: u32,
    pub bias: f32,
    /// Output file; `.png` or `.exr`
    pub output: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
    /// Vertical field of view
    pub fov_degrees: f32,
    /// Rotation of the position about the target around world Y
    pub orbit_degrees: f32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LightConfig {
    pub position: [f32; 3],
    pub intensity: f32,
    pub color: [u8; 3],
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SkyboxConfig {
    pub min: [f32; 3],
    pub max: [f32; 3],
    pub fallback: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            max_depth: DEFAULT_MAX_DEPTH,
            bias: DEFAULT_BIAS,
            output: "output.png".to_string(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 5.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov_degrees: 60.0,
            orbit_degrees: 0.0,
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: [-10.0, 10.0, 20.0],
            intensity: 1.0,
            color: [255, 0, 0],
        }
    }
}

impl Default for SkyboxConfig {
    fn default() -> Self {
        Self {
            min: [-100.0, -50.0, 100.0],
            max: [100.0, 70.0, -100.0],
            fallback: [173, 216, 230],
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            camera: CameraConfig::default(),
            light: LightConfig::default(),
            skybox: SkyboxConfig::default(),
            textures: default_textures(),
        }
    }
}

/// Procedural stand-ins for every texture the diorama and skybox sample, so
/// a render works without any image files.
fn default_textures() -> BTreeMap<String, TextureSource> {
    let checker = |a, b| TextureSource::Checker {
        checker: CheckerSpec {
            width: 16,
            height: 16,
            cell: 4,
            a,
            b,
        },
    };
    let solid = |c| TextureSource::Solid { solid: c };

    [
        ("grass", checker([95, 159, 53], [76, 128, 42])),
        ("netherrack", checker([111, 54, 52], [84, 35, 35])),
        ("stone", checker([128, 128, 128], [112, 112, 112])),
        ("gold", checker([252, 238, 75], [222, 177, 45])),
        ("obsidian", checker([20, 18, 30], [59, 41, 88])),
        ("portal", checker([143, 39, 226], [89, 12, 164])),
        ("diamond", checker([161, 251, 232], [74, 237, 217])),
        ("sideSky", solid([135, 206, 235])),
        ("floor", checker([64, 64, 64], [48, 48, 48])),
        ("upSky", solid([173, 216, 230])),
    ]
    .into_iter()
    .map(|(key, source)| (key.to_string(), source))
    .collect()
}

fn vec3(value: [f32; 3]) -> Vec3A {
    Vec3A::from_array(value)
}

fn is_finite_vec3(value: [f32; 3]) -> bool {
    value.iter().all(|c| c.is_finite())
}

fn invalid(message: impl Into<String>) -> RenderError {
    RenderError::InvalidConfig(message.into())
}

impl Config {
    /// Read a configuration file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!("Config file {} not found, using built-in defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Parse a configuration from TOML text.
    ///
    /// A `[textures]` table replaces the default texture set as a whole.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Command-line values take precedence over the file.
    pub fn apply_overrides(
        &mut self,
        width: Option<u32>,
        height: Option<u32>,
        max_depth: Option<u32>,
        output: Option<String>,
    ) {
        if let Some(width) = width {
            self.render.width = width;
        }
        if let Some(height) = height {
            self.render.height = height;
        }
        if let Some(max_depth) = max_depth {
            self.render.max_depth = max_depth;
        }
        if let Some(output) = output {
            self.render.output = output;
        }
    }

    /// Reject configurations that cannot produce an image.
    pub fn validate(&self) -> Result<()> {
        let render = &self.render;
        if render.width == 0 || render.height == 0 {
            return Err(invalid("width and height must be positive"));
        }
        if render.max_depth == 0 {
            return Err(invalid("max_depth must be at least 1"));
        }
        if !render.bias.is_finite() || render.bias < 0.0 {
            return Err(invalid("bias must be a finite non-negative number"));
        }
        OutputFormat::from_path(Path::new(&render.output))?;

        let camera = &self.camera;
        if ![camera.position, camera.target, camera.up]
            .into_iter()
            .all(is_finite_vec3)
        {
            return Err(invalid("camera vectors must contain finite values"));
        }
        let position = vec3(camera.position);
        let target = vec3(camera.target);
        if (position - target).length() < 0.0001 {
            return Err(invalid("camera position must differ from camera target"));
        }
        if (target - position).cross(vec3(camera.up)).length() < 0.0001 {
            return Err(invalid("camera up must not be parallel to the view direction"));
        }
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(invalid("fov_degrees must lie in (0, 180)"));
        }
        if !camera.orbit_degrees.is_finite() {
            return Err(invalid("orbit_degrees must be finite"));
        }

        if !is_finite_vec3(self.light.position) || !self.light.intensity.is_finite() {
            return Err(invalid("light position and intensity must be finite"));
        }
        if !is_finite_vec3(self.skybox.min) || !is_finite_vec3(self.skybox.max) {
            return Err(invalid("skybox bounds must contain finite values"));
        }

        for (key, source) in &self.textures {
            if let TextureSource::Checker { checker } = source {
                if checker.width == 0 || checker.height == 0 {
                    return Err(invalid(format!("checker texture '{key}' has zero size")));
                }
            }
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.render.width, self.render.height)
    }

    pub fn settings(&self) -> TraceSettings {
        TraceSettings {
            max_depth: self.render.max_depth,
            bias: self.render.bias,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.render.output)
    }

    /// Camera with the configured orbit already applied.
    pub fn camera(&self) -> Camera {
        let c = &self.camera;
        let mut camera = Camera::new(
            vec3(c.position),
            vec3(c.target),
            vec3(c.up),
            c.fov_degrees.to_radians(),
        );
        if c.orbit_degrees != 0.0 {
            camera.orbit(c.orbit_degrees);
        }
        camera
    }

    pub fn light(&self) -> Light {
        let [r, g, b] = self.light.color;
        Light {
            position: vec3(self.light.position),
            intensity: self.light.intensity,
            color: rgb8(r, g, b),
        }
    }

    pub fn skybox(&self) -> Skybox {
        let [r, g, b] = self.skybox.fallback;
        Skybox {
            bounds: Cuboid::new(vec3(self.skybox.min), vec3(self.skybox.max)),
            fallback: rgb8(r, g, b),
            ..Skybox::default()
        }
    }

    /// Build the texture store; file paths resolve against `base_dir`.
    pub fn texture_store(&self, base_dir: &Path) -> Result<TextureStore> {
        TextureStore::from_sources(&self.textures, base_dir)
    }
}
