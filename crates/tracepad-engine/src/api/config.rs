use serde::{Deserialize, Serialize};

use crate::components::color::Color;
use crate::error::TraceError;

/// Configuration for a practice board, provided by the host.
///
/// Every field has a default, so a host can pass a partial JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Backing raster height of both layers (always fixed).
    pub surface_height: f32,
    /// Surface width for a single character.
    pub single_width: f32,
    /// Surface width for an uppercase/lowercase pair.
    pub dual_width: f32,
    /// Upper bound for word surfaces measured from the hosting container.
    pub word_max_width: f32,
    /// Word surface width when the container cannot be measured.
    pub word_fallback_width: f32,

    /// Horizontal inset of the guide lines from each side.
    pub guide_inset: f32,
    /// Total horizontal margin reserved around a word template.
    pub word_margin: f32,
    pub guide_line_width: f32,
    pub guide_color: Color,
    pub midline_color: Color,
    pub midline_dash: [f32; 2],

    pub outline_width: f32,
    pub outline_dash: [f32; 2],
    pub outline_color: Color,
    /// Template fill; kept faint so it never competes with ink.
    pub outline_fill: Color,
    /// CSS font family for the template glyphs (always drawn bold).
    pub font_family: String,

    /// Ink stroke width in backing-raster units.
    pub stroke_width: f32,
    pub default_stroke_color: Color,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            surface_height: 500.0,
            single_width: 400.0,
            dual_width: 700.0,
            word_max_width: 900.0,
            word_fallback_width: 700.0,
            guide_inset: 20.0,
            word_margin: 60.0,
            guide_line_width: 2.0,
            guide_color: Color::rgb8(0xd4, 0xc4, 0xf5),
            midline_color: Color::rgb8(0xe8, 0xdf, 0xf5),
            midline_dash: [10.0, 10.0],
            outline_width: 3.0,
            outline_dash: [8.0, 10.0],
            outline_color: Color::rgb8(0xc4, 0xb5, 0xe8),
            outline_fill: Color::rgb8(228, 218, 245).with_alpha(0.25),
            font_family: "Arial, sans-serif".to_string(),
            stroke_width: 18.0,
            default_stroke_color: Color::PURPLE,
        }
    }
}

impl BoardConfig {
    /// Parse a config from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TraceError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "stroke_width": 12.0, "word_max_width": 1200.0 }"#;
        let config = BoardConfig::from_json(json).unwrap();
        assert_eq!(config.stroke_width, 12.0);
        assert_eq!(config.word_max_width, 1200.0);
        assert_eq!(config.surface_height, 500.0);
        assert_eq!(config.outline_dash, [8.0, 10.0]);
    }

    #[test]
    fn empty_json_is_default() {
        assert_eq!(BoardConfig::from_json("{}").unwrap(), BoardConfig::default());
    }

    #[test]
    fn malformed_json_is_error() {
        assert!(matches!(
            BoardConfig::from_json("{ stroke_width: }"),
            Err(TraceError::Config(_))
        ));
    }
}
