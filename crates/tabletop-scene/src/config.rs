use std::path::PathBuf;
use std::time::Duration;

use glam::Vec3;
use tabletop_engine::paint::Color;

/// Environment variable overriding [`SceneConfig::assets_dir`].
pub const ASSETS_ENV: &str = "TABLETOP_ASSETS";

/// Perspective camera looking at the table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(8.0, 5.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_degrees: 60.0,
            near: 1.0,
            far: 100.0,
        }
    }
}

/// Box motion: a linear rise followed by a circular orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    pub rise_from: f32,
    pub rise_to: f32,
    pub rise_duration: Duration,
    pub orbit_period: Duration,
    pub initial_radius: f32,
    /// Radius change per frame while an arrow key is held.
    pub radius_step: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            rise_from: 2.7,
            rise_to: 5.0,
            rise_duration: Duration::from_millis(3000),
            orbit_period: Duration::from_millis(2000),
            initial_radius: 4.0,
            radius_step: 0.1,
        }
    }
}

/// Image file names, relative to the assets directory.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureFiles {
    pub table: String,
    pub floor: String,
    pub crate_box: String,
}

impl Default for TextureFiles {
    fn default() -> Self {
        Self {
            table: "wood_128x128.jpg".into(),
            floor: "wood_floor_256.jpg".into(),
            crate_box: "wicker_256.jpg".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub title: String,
    pub window_size: (f64, f64),
    pub clear: Color,
    pub camera: CameraConfig,
    pub animation: AnimationConfig,
    pub assets_dir: PathBuf,
    pub textures: TextureFiles,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            title: "tabletop".into(),
            window_size: (1024.0, 768.0),
            clear: Color::BLACK,
            camera: CameraConfig::default(),
            animation: AnimationConfig::default(),
            assets_dir: PathBuf::from("assets"),
            textures: TextureFiles::default(),
        }
    }
}

impl SceneConfig {
    /// Defaults, with the assets directory taken from `TABLETOP_ASSETS` when set.
    pub fn from_env() -> Self {
        Self::default().with_assets_override(std::env::var_os(ASSETS_ENV).map(PathBuf::from))
    }

    /// Replaces the assets directory with `dir` unless it is `None` or empty.
    pub fn with_assets_override(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir.filter(|d| !d.as_os_str().is_empty()) {
            self.assets_dir = dir;
        }
        self
    }

    pub fn table_texture_path(&self) -> PathBuf {
        self.assets_dir.join(&self.textures.table)
    }

    pub fn floor_texture_path(&self) -> PathBuf {
        self.assets_dir.join(&self.textures.floor)
    }

    pub fn box_texture_path(&self) -> PathBuf {
        self.assets_dir.join(&self.textures.crate_box)
    }
}
