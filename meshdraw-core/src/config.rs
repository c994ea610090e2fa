/// Drawing configuration: colours, default canvas size, degenerate handling
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::canvas::Rgba;
use crate::error::ConfigError;

/// What the wireframe renderer does when a vertex projects with a zero or
/// non-finite clip `w`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Log it and hand the extreme coordinates to the canvas anyway
    #[default]
    Tolerate,
    /// Abort the draw call with `DrawError::DegenerateTransform`
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    pub wireframe_colour: Rgba,
    pub texcoord_colour: Rgba,
    /// Fill colour of canvases allocated by the renderers
    pub background: Rgba,
    /// `(width, height)` of canvases allocated by the renderers
    pub canvas_size: (u32, u32),
    pub degenerate_policy: DegeneratePolicy,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            wireframe_colour: Rgba::GREEN,
            texcoord_colour: Rgba::BLUE,
            background: Rgba::OPAQUE_BLACK,
            canvas_size: (512, 512),
            degenerate_policy: DegeneratePolicy::Tolerate,
        }
    }
}

impl DrawConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: DrawConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded draw config from {}", path.display());
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (w, h) = self.canvas_size;
        if w == 0 || h == 0 {
            return Err(ConfigError::EmptyCanvas(w, h));
        }
        Ok(())
    }
}
