use crate::core::color::Color;
use crate::core::geometry::Vertex;
use crate::error::{Error, Result};
use crate::pipeline::canvas::AspectRatio;
use crate::scene::mesh::DEFAULT_COLOR_VARIANCE;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory searched for bare mesh file names.
pub const ASSET_DIR: &str = "assets";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SceneConfig {
    #[serde(default = "default_mesh")]
    pub mesh: PathBuf,
    /// Per-channel spread of the face color jitter.
    #[serde(default = "default_variance")]
    pub variance: i32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            mesh: default_mesh(),
            variance: default_variance(),
        }
    }
}

fn default_mesh() -> PathBuf {
    PathBuf::from("demo.mesh")
}
fn default_variance() -> i32 {
    DEFAULT_COLOR_VARIANCE
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_origin")]
    pub origin: [f64; 3],
    #[serde(default)]
    pub look_at: [f64; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            look_at: [0.0, 0.0, 0.0],
        }
    }
}

fn default_origin() -> [f64; 3] {
    [10.0, 10.0, 10.0]
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: [f64; 2],
    /// Pixels per camera-plane unit.
    #[serde(default = "default_resolution")]
    pub resolution: u32,
    #[serde(default = "default_background")]
    pub background: [i32; 3],
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: default_aspect_ratio(),
            resolution: default_resolution(),
            background: default_background(),
            output: default_output(),
        }
    }
}

fn default_aspect_ratio() -> [f64; 2] {
    [4.0, 3.0]
}
fn default_resolution() -> u32 {
    300
}
fn default_background() -> [i32; 3] {
    [30, 30, 30]
}
fn default_output() -> PathBuf {
    PathBuf::from("render.png")
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Rejects settings the renderer cannot work with.
    pub fn validate(&self) -> Result<()> {
        let [h, v] = self.render.aspect_ratio;
        if !(h > 0.0 && v > 0.0) {
            return Err(Error::Config(format!(
                "aspect ratio components must be positive, got {h}:{v}"
            )));
        }
        if self.render.resolution == 0 {
            return Err(Error::Config("resolution must be positive".to_string()));
        }
        if self.scene.variance < 0 {
            return Err(Error::Config(format!(
                "color variance must not be negative, got {}",
                self.scene.variance
            )));
        }
        if self.camera.origin == self.camera.look_at {
            return Err(Error::Config(
                "camera origin and look-at point must differ".to_string(),
            ));
        }
        self.background()?;
        Ok(())
    }

    pub fn origin(&self) -> Vertex {
        Vertex::from(self.camera.origin)
    }

    pub fn look_at(&self) -> Vertex {
        Vertex::from(self.camera.look_at)
    }

    pub fn aspect_ratio(&self) -> Result<AspectRatio> {
        let [h, v] = self.render.aspect_ratio;
        AspectRatio::new(h, v)
    }

    pub fn background(&self) -> Result<Color> {
        let [r, g, b] = self.render.background;
        Color::new(r, g, b)
    }

    /// Finds the mesh file: the path as given when it exists (or is absolute),
    /// otherwise the same name under [`ASSET_DIR`].
    pub fn resolve_mesh_path(&self) -> PathBuf {
        let mesh = &self.scene.mesh;
        if mesh.is_absolute() || mesh.exists() {
            return mesh.clone();
        }
        let candidate = Path::new(ASSET_DIR).join(mesh);
        if candidate.exists() {
            candidate
        } else {
            mesh.clone()
        }
    }
}
