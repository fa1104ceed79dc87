use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::{
    core::MAX_SURFACE_DIM,
    error::{MemeError, MemeResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Rasterization options for [`crate::Compositor`].
pub struct CompositorOpts {
    /// Load the platform's installed fonts.
    pub load_system_fonts: bool,
    /// Extra directories scanned for `.ttf`/`.otf`/`.ttc` files.
    pub font_dirs: Vec<PathBuf>,
    /// Font families tried, in order, for emoji markers.
    pub emoji_font_families: Vec<String>,
    /// Blur sigma in logical units at 100% intensity.
    pub blur_sigma_per_100: f64,
}

impl Default for CompositorOpts {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
            font_dirs: Vec::new(),
            emoji_font_families: vec![
                "Noto Color Emoji".to_string(),
                "Apple Color Emoji".to_string(),
                "Segoe UI Emoji".to_string(),
                "Twemoji Mozilla".to_string(),
            ],
            blur_sigma_per_100: 5.0,
        }
    }
}

impl CompositorOpts {
    /// Options that skip system font discovery. Captions render only with faces from
    /// `font_dirs`.
    pub fn headless() -> Self {
        Self {
            load_system_fonts: false,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Options for an [`crate::Editor`] session.
pub struct EditorOpts {
    /// Longest allowed surface side; larger images are downscaled uniformly.
    pub max_surface_dim: u32,
    /// Compositor configuration.
    pub compositor: CompositorOpts,
}

impl Default for EditorOpts {
    fn default() -> Self {
        Self {
            max_surface_dim: MAX_SURFACE_DIM,
            compositor: CompositorOpts::default(),
        }
    }
}

impl EditorOpts {
    /// Parse options from JSON; missing keys take their defaults.
    pub fn from_json(json: &str) -> MemeResult<Self> {
        let opts: Self = serde_json::from_str(json)
            .map_err(|e| MemeError::validation(format!("invalid editor options: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Read and parse an options file.
    pub fn from_path(path: impl AsRef<Path>) -> MemeResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read editor options '{}'", path.display()))?;
        Self::from_json(&json)
    }

    /// Reject option values the engine cannot honour.
    pub fn validate(&self) -> MemeResult<()> {
        if self.max_surface_dim == 0 {
            return Err(MemeError::validation("max_surface_dim must be > 0"));
        }
        let sigma = self.compositor.blur_sigma_per_100;
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(MemeError::validation(
                "blur_sigma_per_100 must be finite and >= 0",
            ));
        }
        Ok(())
    }
}
