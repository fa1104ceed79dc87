use std::{fmt, ops::RangeInclusive, str::FromStr};

use crate::foundation::{
    core::{LOGICAL_EXTENT, LogicalPoint, Rgb8},
    error::{MemeError, MemeResult},
};

/// Valid caption font sizes, in logical units.
pub const FONT_SIZE_RANGE: RangeInclusive<u32> = 10..=100;
/// Valid caption baselines, in logical units.
pub const TEXT_Y_RANGE: RangeInclusive<u32> = 0..=400;
/// Valid filter intensities, in percent.
pub const FILTER_INTENSITY_RANGE: RangeInclusive<u32> = 0..=200;

/// Glyphs offered by the emoji picker.
pub const EMOJI_PALETTE: [&str; 8] = ["😂", "🤔", "😎", "🥳", "😱", "🤯", "🙄", "🤪"];

/// Opaque reference to a decoded image held by an [`crate::ImageStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageHandle(pub(crate) u64);

impl ImageHandle {
    /// Raw identifier, stable for the lifetime of the store that issued it.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Caption typeface.
pub enum FontFamily {
    /// Arial.
    #[default]
    #[serde(rename = "Arial")]
    Arial,
    /// Impact.
    #[serde(rename = "Impact")]
    Impact,
    /// Comic Sans MS.
    #[serde(rename = "Comic Sans MS")]
    ComicSansMs,
    /// Courier New.
    #[serde(rename = "Courier New")]
    CourierNew,
}

impl FontFamily {
    /// Every selectable family, in picker order.
    pub const ALL: [Self; 4] = [Self::Arial, Self::Impact, Self::ComicSansMs, Self::CourierNew];

    /// Family name as used by font lookup.
    pub fn name(self) -> &'static str {
        match self {
            Self::Arial => "Arial",
            Self::Impact => "Impact",
            Self::ComicSansMs => "Comic Sans MS",
            Self::CourierNew => "Courier New",
        }
    }

    /// Generic family used when the named face is not installed.
    pub fn generic_fallback(self) -> &'static str {
        match self {
            Self::Arial | Self::Impact => "sans-serif",
            Self::ComicSansMs => "cursive",
            Self::CourierNew => "monospace",
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FontFamily {
    type Err = MemeError;

    fn from_str(s: &str) -> MemeResult<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MemeError::validation(format!("unknown font family '{wanted}'")))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Global raster filter applied to the base image before overlays.
pub enum FilterKind {
    /// No filtering.
    #[default]
    None,
    /// Desaturate toward luminance.
    Grayscale,
    /// Warm brown tone matrix.
    Sepia,
    /// Channel negation.
    Invert,
    /// Gaussian blur; intensity maps to the sigma.
    Blur,
    /// Linear channel gain; 100% is neutral.
    Brightness,
    /// Scale around mid-grey; 100% is neutral.
    Contrast,
}

impl FilterKind {
    /// Every filter, in picker order.
    pub const ALL: [Self; 7] = [
        Self::None,
        Self::Grayscale,
        Self::Sepia,
        Self::Invert,
        Self::Blur,
        Self::Brightness,
        Self::Contrast,
    ];

    /// Lowercase identifier.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Grayscale => "grayscale",
            Self::Sepia => "sepia",
            Self::Invert => "invert",
            Self::Blur => "blur",
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = MemeError;

    fn from_str(s: &str) -> MemeResult<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| MemeError::validation(format!("unknown filter '{wanted}'")))
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Draggable emoji glyph positioned in logical space.
pub struct EmojiMarker {
    /// Glyph text (usually a single emoji cluster).
    pub glyph: String,
    /// Logical x of the glyph's horizontal center.
    pub x: f64,
    /// Logical y of the glyph's baseline.
    pub y: f64,
}

impl EmojiMarker {
    /// Marker at `p`, clamped into the logical frame.
    pub fn new(glyph: impl Into<String>, p: LogicalPoint) -> Self {
        let p = clamp_logical_point(p);
        Self {
            glyph: glyph.into(),
            x: p.x,
            y: p.y,
        }
    }

    /// Current logical position.
    pub fn position(&self) -> LogicalPoint {
        LogicalPoint::new(self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Complete, immutable snapshot of every editable field.
///
/// Positions and sizes are expressed in the 400x400 logical frame. The image handle is runtime
/// state and is never serialized.
pub struct SceneState {
    /// Loaded base image; `None` renders the blank placeholder.
    #[serde(skip)]
    pub image: Option<ImageHandle>,
    /// Caption drawn at `top_text_y`.
    pub top_text: String,
    /// Caption drawn at `bottom_text_y`.
    pub bottom_text: String,
    /// Caption size in logical units, within [`FONT_SIZE_RANGE`].
    pub font_size: u32,
    /// Caption fill color.
    pub text_color: Rgb8,
    /// Caption typeface.
    pub font_family: FontFamily,
    /// Top caption baseline, within [`TEXT_Y_RANGE`].
    pub top_text_y: u32,
    /// Bottom caption baseline, within [`TEXT_Y_RANGE`].
    pub bottom_text_y: u32,
    /// Emoji markers in paint order.
    pub emoji_markers: Vec<EmojiMarker>,
    /// Global filter.
    pub filter_kind: FilterKind,
    /// Filter strength in percent, within [`FILTER_INTENSITY_RANGE`].
    pub filter_intensity: u32,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            image: None,
            top_text: String::new(),
            bottom_text: String::new(),
            font_size: 30,
            text_color: Rgb8::WHITE,
            font_family: FontFamily::Arial,
            top_text_y: 50,
            bottom_text_y: 350,
            emoji_markers: Vec::new(),
            filter_kind: FilterKind::None,
            filter_intensity: 100,
        }
    }
}

impl SceneState {
    /// Copy of `self` with every numeric field clamped into its domain.
    ///
    /// Used for scene data that did not come through the editor's setters.
    pub fn sanitized(mut self) -> Self {
        self.font_size = clamp_font_size(i64::from(self.font_size));
        self.top_text_y = clamp_text_y(i64::from(self.top_text_y));
        self.bottom_text_y = clamp_text_y(i64::from(self.bottom_text_y));
        self.filter_intensity = clamp_filter_intensity(i64::from(self.filter_intensity));
        for m in &mut self.emoji_markers {
            let p = clamp_logical_point(m.position());
            m.x = p.x;
            m.y = p.y;
        }
        self
    }

    /// Parse a scene from JSON and sanitize it.
    pub fn from_json(json: &str) -> MemeResult<Self> {
        let scene: Self = serde_json::from_str(json)
            .map_err(|e| MemeError::validation(format!("invalid scene json: {e}")))?;
        Ok(scene.sanitized())
    }
}

fn clamp_into(v: i64, range: &RangeInclusive<u32>) -> u32 {
    v.clamp(i64::from(*range.start()), i64::from(*range.end())) as u32
}

/// Clamp a requested font size into [`FONT_SIZE_RANGE`].
pub fn clamp_font_size(v: i64) -> u32 {
    clamp_into(v, &FONT_SIZE_RANGE)
}

/// Clamp a requested caption baseline into [`TEXT_Y_RANGE`].
pub fn clamp_text_y(v: i64) -> u32 {
    clamp_into(v, &TEXT_Y_RANGE)
}

/// Clamp a requested filter intensity into [`FILTER_INTENSITY_RANGE`].
pub fn clamp_filter_intensity(v: i64) -> u32 {
    clamp_into(v, &FILTER_INTENSITY_RANGE)
}

/// Clamp a point into the logical frame. Non-finite coordinates collapse to 0.
pub fn clamp_logical_point(p: LogicalPoint) -> LogicalPoint {
    fn axis(v: f64) -> f64 {
        if v.is_finite() {
            v.clamp(0.0, LOGICAL_EXTENT)
        } else {
            0.0
        }
    }
    LogicalPoint::new(axis(p.x), axis(p.y))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
