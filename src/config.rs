//! Demo/runtime configuration loaded from TOML.

use flexspace_anim::AnimationConfig;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

const DEFAULT_CONFIG_PATH: &str = "config/demo.toml";

/// Settings for the headless demo loop.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Root width in layout units.
    pub width: f32,
    /// Root height in layout units.
    pub height: f32,
    /// Pixels per layout unit for content raster requests.
    pub ppu: f32,
    /// Frames to run before exiting.
    pub max_frames: u64,
    /// Simulated time step per frame, in milliseconds.
    pub frame_interval: f64,
    /// Transition settings applied to the demo tree.
    pub animation: AnimationSettings,
}

/// Transition settings with opaque easing/interpolation identifiers.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Transition length in milliseconds.
    pub duration: f32,
    /// Delay before progress starts.
    pub delay: f32,
    /// Easing identifier; unrecognized values fall back to linear.
    pub easing: String,
    /// Interpolation identifier; unrecognized values fall back to linear.
    pub interpolation: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            ppu: 16.0,
            max_frames: 120,
            frame_interval: 1000.0 / 60.0,
            animation: AnimationSettings::default(),
        }
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration: 1000.0,
            delay: 0.0,
            easing: "linear".to_string(),
            interpolation: "linear".to_string(),
        }
    }
}

impl DemoConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults
    /// on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<DemoConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    DemoConfig::default()
                }
            },
            Err(err) => {
                warn!("Failed to read {}: {err}. Using defaults", path.display());
                DemoConfig::default()
            }
        }
    }

    /// Resolve the animation identifiers into a transition config.
    pub fn animation_config(&self) -> AnimationConfig {
        AnimationConfig::from_identifiers(
            self.animation.duration,
            self.animation.delay,
            &self.animation.easing,
            &self.animation.interpolation,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexspace_anim::Easing;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let cfg = DemoConfig::load_from_path(Path::new("/nonexistent/demo.toml"));
        assert_eq!(cfg.width, 100.0);
        assert_eq!(cfg.max_frames, 120);
    }

    #[test]
    fn test_parse_partial_config() {
        let cfg: DemoConfig = toml::from_str(
            r#"
            width = 64.0

            [animation]
            duration = 250.0
            easing = "quad-out"
            "#,
        )
        .expect("valid toml");
        assert_eq!(cfg.width, 64.0);
        assert_eq!(cfg.height, 100.0);
        assert_eq!(cfg.animation.duration, 250.0);
        assert_eq!(cfg.animation_config().easing, Easing::QuadOut);
    }

    #[test]
    fn test_unknown_easing_falls_back_to_linear() {
        let mut cfg = DemoConfig::default();
        cfg.animation.easing = "wobble".to_string();
        assert_eq!(cfg.animation_config().easing, Easing::Linear);
    }
}
