// Configuration loading and defaults.

use crate::controller::RevealSettings;
use crate::error::Error;
use crate::mask::{DEFAULT_STOPS, GradientStop, RadialGradient};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub assets: AssetsConfig,

    #[serde(default)]
    pub reveal: RevealConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_width")]
    pub width: usize,

    #[serde(default = "default_height")]
    pub height: usize,

    /// Frame cap (0 = uncapped)
    #[serde(default = "default_target_fps")]
    pub target_fps: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Image shown on top until revealed
    #[serde(default = "default_cover")]
    pub cover: PathBuf,

    /// Image uncovered by the pointer
    #[serde(default = "default_hidden")]
    pub hidden: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Radius the hover reveal grows to (px)
    #[serde(default = "default_base_radius")]
    pub base_radius: f32,

    /// Fraction of the animated radius used for permanent paints
    #[serde(default = "default_paint_scale")]
    pub paint_scale: f32,

    /// Fixed radius for touch/drag reveals (px)
    #[serde(default = "default_touch_radius")]
    pub touch_radius: f32,

    /// Grow/shrink animation length (ms)
    #[serde(default = "default_animation_ms")]
    pub animation_ms: f64,

    /// Mask falloff, centre (offset 0) to rim (offset 1)
    #[serde(default = "default_stops")]
    pub gradient: Vec<StopConfig>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StopConfig {
    pub offset: f32,
    pub alpha: f32,
}

// Default value functions
fn default_title() -> String {
    "Magic Reveal".to_string()
}
fn default_width() -> usize {
    960
}
fn default_height() -> usize {
    640
}
fn default_target_fps() -> usize {
    60
}
fn default_cover() -> PathBuf {
    PathBuf::from("images/cover_image.jpg")
}
fn default_hidden() -> PathBuf {
    PathBuf::from("images/hidden_image.jpg")
}
fn default_base_radius() -> f32 {
    120.0
}
fn default_paint_scale() -> f32 {
    0.8
}
fn default_touch_radius() -> f32 {
    80.0
}
fn default_animation_ms() -> f64 {
    300.0
}
fn default_stops() -> Vec<StopConfig> {
    DEFAULT_STOPS
        .iter()
        .map(|s| StopConfig { offset: s.offset, alpha: s.alpha })
        .collect()
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
            target_fps: default_target_fps(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self { cover: default_cover(), hidden: default_hidden() }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            base_radius: default_base_radius(),
            paint_scale: default_paint_scale(),
            touch_radius: default_touch_radius(),
            animation_ms: default_animation_ms(),
            gradient: default_stops(),
        }
    }
}

impl RevealConfig {
    /// Settings handed to the reveal controller.
    pub fn settings(&self) -> RevealSettings {
        let stops = self
            .gradient
            .iter()
            .map(|s| GradientStop { offset: s.offset, alpha: s.alpha })
            .collect();
        RevealSettings {
            base_radius: self.base_radius,
            paint_scale: self.paint_scale,
            touch_radius: self.touch_radius,
            animation_ms: self.animation_ms,
            gradient: RadialGradient::new(stops),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let config_path = path.map(PathBuf::from).or_else(Self::default_config_path);

        if let Some(ref path) = config_path {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
                let config = Self::parse(&contents)?;
                return Ok(config);
            }
        }

        Ok(Config::default())
    }

    /// Parse and validate TOML text.
    pub fn parse(contents: &str) -> Result<Self, Error> {
        let config: Config = toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the effect can't draw with.
    pub fn validate(&self) -> Result<(), Error> {
        let r = &self.reveal;
        for (name, value) in [
            ("base_radius", r.base_radius),
            ("paint_scale", r.paint_scale),
            ("touch_radius", r.touch_radius),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!("reveal.{name} must be a non-negative number, got {value}")));
            }
        }
        if !r.animation_ms.is_finite() || r.animation_ms <= 0.0 {
            return Err(Error::Config(format!("reveal.animation_ms must be positive, got {}", r.animation_ms)));
        }
        for stop in &r.gradient {
            let in_range = |v: f32| (0.0..=1.0).contains(&v);
            if !in_range(stop.offset) || !in_range(stop.alpha) {
                return Err(Error::Config(format!(
                    "reveal.gradient stop {{ offset = {}, alpha = {} }} is outside 0..1",
                    stop.offset, stop.alpha
                )));
            }
        }
        if r.gradient.windows(2).any(|w| w[1].offset < w[0].offset) {
            return Err(Error::Config("reveal.gradient stops must be sorted by offset".into()));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(Error::Config("window.width and window.height must be non-zero".into()));
        }
        Ok(())
    }

    /// Get the default config file path
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "magic-reveal")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_effect() {
        let settings = Config::default().reveal.settings();
        assert_eq!(settings, RevealSettings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::parse(
            r#"
            [reveal]
            base_radius = 60.0

            [assets]
            hidden = "art/secret.png"
            "#,
        )
        .unwrap();
        assert_eq!(config.reveal.base_radius, 60.0);
        assert_eq!(config.reveal.touch_radius, 80.0);
        assert_eq!(config.assets.hidden, PathBuf::from("art/secret.png"));
        assert_eq!(config.assets.cover, PathBuf::from("images/cover_image.jpg"));
        assert_eq!(config.window.width, 960);
    }

    #[test]
    fn custom_gradient_is_parsed() {
        let config = Config::parse(
            r#"
            [reveal]
            gradient = [
                { offset = 0.0, alpha = 1.0 },
                { offset = 1.0, alpha = 0.0 },
            ]
            "#,
        )
        .unwrap();
        let g = config.reveal.settings().gradient;
        assert!((g.alpha_at(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn invalid_values_are_rejected() {
        for text in [
            "[reveal]\nbase_radius = -1.0",
            "[reveal]\nanimation_ms = 0.0",
            "[reveal]\ngradient = [{ offset = 0.5, alpha = 1.0 }, { offset = 0.2, alpha = 0.0 }]",
            "[reveal]\ngradient = [{ offset = 0.0, alpha = 2.0 }]",
            "[window]\nwidth = 0",
            "[reveal]\nbase_radius = \"big\"",
        ] {
            assert!(matches!(Config::parse(text), Err(Error::Config(_))), "accepted: {text}");
        }
    }

    #[test]
    fn load_reads_explicit_file_or_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[window]\ntitle = \"Test\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.window.title, "Test");

        let missing = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(missing.window.title, "Magic Reveal");
    }
}
