//! Aggregated configuration, loadable from JSON.
//!
//! Every section defaults independently, so a file only needs the fields
//! it overrides:
//!
//! ```json
//! { "camera": { "easing": 0.08 }, "layout": { "placement": "angular" } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::CameraConfig;
use crate::dataset::read_json;
use crate::error::Result;
use crate::interaction::InteractionConfig;
use crate::layout::LayoutConfig;
use crate::render::RenderConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub layout: LayoutConfig,
    pub camera: CameraConfig,
    pub interaction: InteractionConfig,
    pub render: RenderConfig,
}

impl StarfieldConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let cfg: Self = read_json(path)?;
        log::info!("config: loaded {}", path.display());
        Ok(cfg)
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }
}
