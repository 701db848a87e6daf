//! Application configuration.
//!
//! The configuration is loaded from a JSON file, by default
//! `$XDG_CONFIG_HOME/casteljau/config.json`, or the path passed with
//! `--config <path>`.  Every section is optional and falls back to the
//! reference setup: an 800×600 window, a cubic curve (4 control points)
//! and 30 frames per second.
//!
//! # Example
//!
//! ```json
//! {
//!   "window": { "width": 1024, "height": 768 },
//!   "initial_points": 3,
//!   "animation": { "fps": 60, "sweep_steps": 200 },
//!   "curve": { "sample_step": 0.01, "point_radius": 6.0 },
//!   "theme": { "curve": [0, 0, 255] }
//! }
//! ```

use crate::bezier::{DEFAULT_SAMPLE_STEP, MIN_SAMPLE_STEP};
use crate::clock::{DEFAULT_FPS, DEFAULT_SWEEP_STEPS, MIN_FPS};
use crate::geometry::Color;
use crate::menu::MenuLayout;
use crate::points::{MAX_POINTS, MIN_POINTS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
///
/// Every field is optional: a minimal `{}` file is valid and unknown keys
/// are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    /// Control points at startup (`2..=6`).
    pub initial_points: usize,
    pub animation: AnimationConfig,
    pub curve: CurveConfig,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            initial_points: 4,
            animation: AnimationConfig::default(),
            curve: CurveConfig::default(),
            theme: Theme::default(),
        }
    }
}

/// Window geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Height of the menu bar above the workspace.
    pub menu_height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Bezier curve visualization".into(),
            menu_height: 100,
        }
    }
}

/// Animation cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Initial frames per second.  Governs both input polling and how fast
    /// `t` sweeps.
    pub fps: u32,
    /// Frames per `0 → 1` sweep of `t`.
    pub sweep_steps: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            sweep_steps: DEFAULT_SWEEP_STEPS,
        }
    }
}

/// Curve sampling and drawing sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    /// Parameter step between polyline samples.
    pub sample_step: f64,
    /// Radius of drawn points, also used to hit-test control points.
    pub point_radius: f64,
    pub curve_width: f64,
    /// Spacing of the background grid in pixels.
    pub grid_step: u32,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            sample_step: DEFAULT_SAMPLE_STEP,
            point_radius: 5.0,
            curve_width: 2.0,
            grid_step: 50,
        }
    }
}

/// Colors, each written as an `[r, g, b]` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: Color,
    pub grid: Color,
    pub menu: Color,
    /// Menu buttons and labels.
    pub chrome: Color,
    /// Lines between construction points.
    pub construction: Color,
    pub curve: Color,
    /// Intermediate construction points.
    pub intermediate: Color,
    /// The point on the curve at the current `t`.
    pub evaluated: Color,
    pub control: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            grid: Color::LIGHT_GRAY,
            menu: Color::LIGHT_GRAY,
            chrome: Color::WHITE,
            construction: Color::BLACK,
            curve: Color::BLACK,
            intermediate: Color::YELLOW,
            evaluated: Color::BLUE,
            control: Color::RED,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path` and validate it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_POINTS..=MAX_POINTS).contains(&self.initial_points) {
            return Err(ConfigError::Invalid(format!(
                "initial_points must be in {}..={}, got {}",
                MIN_POINTS, MAX_POINTS, self.initial_points
            )));
        }
        if self.animation.fps < MIN_FPS {
            return Err(ConfigError::Invalid(format!(
                "animation.fps must be at least {}, got {}",
                MIN_FPS, self.animation.fps
            )));
        }
        if self.animation.sweep_steps == 0 {
            return Err(ConfigError::Invalid(
                "animation.sweep_steps must be positive".into(),
            ));
        }
        let step = self.curve.sample_step;
        if !(step >= MIN_SAMPLE_STEP && step <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "curve.sample_step must be in [{}, 1], got {}",
                MIN_SAMPLE_STEP, step
            )));
        }
        if !(self.curve.point_radius >= 0.0) {
            return Err(ConfigError::Invalid(
                "curve.point_radius must not be negative".into(),
            ));
        }
        if self.window.menu_height >= self.window.height {
            return Err(ConfigError::Invalid(format!(
                "window.menu_height ({}) leaves no workspace in a {} px window",
                self.window.menu_height, self.window.height
            )));
        }
        let (right, bottom) = MenuLayout::default().extent();
        if f64::from(self.window.menu_height) < bottom {
            return Err(ConfigError::Invalid(format!(
                "window.menu_height ({}) is shorter than the menu buttons ({} px)",
                self.window.menu_height, bottom
            )));
        }
        if f64::from(self.window.width) < right {
            return Err(ConfigError::Invalid(format!(
                "window.width ({}) is narrower than the menu buttons ({} px)",
                self.window.width, right
            )));
        }
        Ok(())
    }
}

/// Error from loading, parsing or validating a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_config() {
        let json = r#"{
            "window": { "width": 1024, "height": 768, "title": "t", "menu_height": 80 },
            "initial_points": 3,
            "animation": { "fps": 60, "sweep_steps": 200 },
            "curve": { "sample_step": 0.01, "point_radius": 6.0, "curve_width": 3.0, "grid_step": 40 },
            "theme": { "curve": [0, 0, 255] }
        }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.window.width, 1024);
        assert_eq!(cfg.window.menu_height, 80);
        assert_eq!(cfg.initial_points, 3);
        assert_eq!(cfg.animation.fps, 60);
        assert_eq!(cfg.animation.sweep_steps, 200);
        assert_eq!(cfg.curve.sample_step, 0.01);
        assert_eq!(cfg.curve.grid_step, 40);
        assert_eq!(cfg.theme.curve, Color::rgb(0, 0, 255));
        assert_eq!(cfg.theme.control, Color::RED);
        cfg.validate().unwrap();
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.window.width, 800);
        assert_eq!(cfg.window.height, 600);
        assert_eq!(cfg.window.menu_height, 100);
        assert_eq!(cfg.initial_points, 4);
        assert_eq!(cfg.animation.fps, 30);
        assert_eq!(cfg.animation.sweep_steps, 100);
        assert_eq!(cfg.curve.sample_step, 0.005);
        assert_eq!(cfg.curve.point_radius, 5.0);
        assert_eq!(cfg.theme, Theme::default());
        cfg.validate().unwrap();
    }

    #[test]
    fn deserialize_partial_section() {
        let json = r#"{ "animation": { "fps": 12 } }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.animation.fps, 12);
        assert_eq!(cfg.animation.sweep_steps, DEFAULT_SWEEP_STEPS);
    }

    #[test]
    fn unknown_top_level_keys_ignored() {
        let json = r#"{ "animation": {}, "future_section": { "key": 42 } }"#;
        let _cfg: Config = serde_json::from_str(json).unwrap();
    }

    #[test]
    fn validate_rejects_unsupported_point_count() {
        for n in [0, 1, 7, 100] {
            let cfg = Config {
                initial_points: n,
                ..Config::default()
            };
            assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))), "n = {}", n);
        }
    }

    #[test]
    fn validate_rejects_fps_below_floor_and_bad_step() {
        let mut cfg = Config::default();
        cfg.animation.fps = 0;
        assert!(cfg.validate().is_err());
        cfg.animation.fps = 5;
        assert!(cfg.validate().is_err());
        cfg.animation.fps = MIN_FPS;
        cfg.validate().unwrap();

        let mut cfg = Config::default();
        cfg.curve.sample_step = 0.0;
        assert!(cfg.validate().is_err());
        cfg.curve.sample_step = f64::NAN;
        assert!(cfg.validate().is_err());
        cfg.curve.sample_step = 1.5;
        assert!(cfg.validate().is_err());
        cfg.curve.sample_step = 1e-10;
        assert!(cfg.validate().is_err());
        cfg.curve.sample_step = MIN_SAMPLE_STEP;
        cfg.validate().unwrap();
    }

    #[test]
    fn validate_rejects_menu_taller_than_window() {
        let mut cfg = Config::default();
        cfg.window.menu_height = 600;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_window_too_small_for_menu_buttons() {
        let mut cfg = Config::default();
        cfg.window.menu_height = 40;
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
        cfg.window.menu_height = 75;
        cfg.validate().unwrap();

        let mut cfg = Config::default();
        cfg.window.width = 700;
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(Path::new("/nonexistent/casteljau/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
