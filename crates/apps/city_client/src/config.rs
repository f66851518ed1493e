use std::path::{Path, PathBuf};

use foundation::Viewport;
use foundation::math::Vec3;
use scene::view::{DEFAULT_EYE, DEFAULT_TARGET, DEFAULT_VERTICAL_FOV};
use scene::{ViewError, ViewState};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::colors;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid initial view: {0}")]
    InvalidView(#[from] ViewError),
    #[error("pan_speed must be finite and positive, got {0}")]
    InvalidPanSpeed(f64),
    #[error("retina_factor must be finite and positive, got {0}")]
    InvalidRetinaFactor(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    pub eye: [f64; 3],
    pub target: [f64; 3],
    /// Radians.
    pub vertical_fov: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            eye: DEFAULT_EYE.to_array(),
            target: DEFAULT_TARGET.to_array(),
            vertical_fov: DEFAULT_VERTICAL_FOV,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Startup configuration. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub initial_view: ViewConfig,
    pub viewport: ViewportConfig,
    pub clear_color: [f32; 4],
    pub retina_factor: f64,
    pub pan_speed: f64,
    pub rendering_enabled: bool,
    /// Default tracing filter, used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            initial_view: ViewConfig::default(),
            viewport: ViewportConfig::default(),
            clear_color: colors::opaque(colors::GRASS),
            retina_factor: 2.0,
            pan_speed: 1.0,
            rendering_enabled: true,
            log_level: "info".to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.view_state()?;
        if !(self.pan_speed.is_finite() && self.pan_speed > 0.0) {
            return Err(ConfigError::InvalidPanSpeed(self.pan_speed));
        }
        if !(self.retina_factor.is_finite() && self.retina_factor > 0.0) {
            return Err(ConfigError::InvalidRetinaFactor(self.retina_factor));
        }
        Ok(())
    }

    pub fn view_state(&self) -> Result<ViewState, ViewError> {
        let v = &self.initial_view;
        ViewState::try_new(
            Vec3::from_array(v.eye),
            Vec3::from_array(v.target),
            v.vertical_fov,
        )
    }

    /// Negative or non-finite sizes are clamped to an empty viewport.
    pub fn viewport(&self) -> Viewport {
        let clamp = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Viewport::new(clamp(self.viewport.width), clamp(self.viewport.height))
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ViewerConfig};
    use crate::colors;
    use foundation::math::Vec3;
    use pretty_assertions::assert_eq;
    use scene::ViewState;

    #[test]
    fn empty_object_is_the_default() {
        let config = ViewerConfig::from_json_str("{}").expect("config");
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.clear_color, colors::opaque(colors::GRASS));
        assert_eq!(config.view_state().expect("view"), ViewState::default());
    }

    #[test]
    fn retina_factor_defaults_to_high_density() {
        assert_eq!(ViewerConfig::default().retina_factor, 2.0);
        let config = ViewerConfig::from_json_str(r#"{ "retina_factor": 1 }"#).expect("config");
        assert_eq!(config.retina_factor, 1.0);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = ViewerConfig::from_json_str(
            r#"{ "initial_view": { "eye": [0.0, -50.0, 80.0] }, "viewport": { "width": 640 } }"#,
        )
        .expect("config");
        let view = config.view_state().expect("view");
        assert_eq!(view.eye, Vec3::new(0.0, -50.0, 80.0));
        assert_eq!(view.target, Vec3::ZERO);
        assert_eq!(config.viewport.width, 640.0);
        assert_eq!(config.viewport.height, 720.0);
    }

    #[test]
    fn eye_at_target_is_rejected() {
        let err = ViewerConfig::from_json_str(
            r#"{ "initial_view": { "eye": [0, 0, 0], "target": [0, 0, 0] } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidView(_)), "{err}");
    }

    #[test]
    fn bad_scalars_are_rejected() {
        assert!(matches!(
            ViewerConfig::from_json_str(r#"{ "pan_speed": 0 }"#),
            Err(ConfigError::InvalidPanSpeed(_))
        ));
        assert!(matches!(
            ViewerConfig::from_json_str(r#"{ "retina_factor": -2 }"#),
            Err(ConfigError::InvalidRetinaFactor(_))
        ));
        assert!(matches!(
            ViewerConfig::from_json_str(r#"{ "pan_sped": 2 }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ViewerConfig::load("/nonexistent/city_client.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/city_client.json"));
    }

    #[test]
    fn negative_viewport_clamps_to_empty() {
        let mut config = ViewerConfig::default();
        config.viewport.width = -10.0;
        assert!(config.viewport().is_empty());
    }
}
