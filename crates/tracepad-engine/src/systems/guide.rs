//! Guide layer layout: ruled lines plus a dashed, faintly filled template.
//!
//! Rendering is a pure function of (content, width, height); the output list
//! always starts with a full clear, so repainting with the same inputs yields
//! an identical list.

use glam::Vec2;

use crate::api::config::BoardConfig;
use crate::api::content::{to_lower, to_upper, CaseMode, PracticeContent};
use crate::renderer::command::{DisplayList, DrawCommand, LineStyle, OutlineStyle};

/// Topline, as a fraction of surface height.
pub const TOP_LINE: f32 = 0.15;
/// Dashed midline (x-height).
pub const MIDDLE_LINE: f32 = 0.5;
/// Baseline.
pub const BASELINE: f32 = 0.85;

/// Share of the topline-to-baseline band a glyph occupies.
pub const GLYPH_FILL: f32 = 0.9;
/// Words start from a smaller size than single characters.
pub const WORD_SCALE: f32 = 0.8;
/// Average glyph advance as a fraction of font size, used to estimate word width.
pub const AVG_CHAR_WIDTH: f32 = 0.6;

/// Vertical layout derived from the surface height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideMetrics {
    pub top: f32,
    pub middle: f32,
    pub baseline: f32,
    /// Font size for single characters and case pairs.
    pub glyph_height: f32,
    /// Vertical center of every template (midpoint of topline and baseline).
    pub center_y: f32,
}

impl GuideMetrics {
    pub fn new(height: f32) -> Self {
        Self {
            top: height * TOP_LINE,
            middle: height * MIDDLE_LINE,
            baseline: height * BASELINE,
            glyph_height: height * (BASELINE - TOP_LINE) * GLYPH_FILL,
            center_y: height * (TOP_LINE + BASELINE) / 2.0,
        }
    }
}

/// Font size for a word of `len` characters.
///
/// Starts at `WORD_SCALE * glyph_height`; when the estimated width exceeds
/// `available`, scales down so the estimate fits exactly.
pub fn word_font_size(len: usize, glyph_height: f32, available: f32) -> f32 {
    let base = glyph_height * WORD_SCALE;
    let estimated = len as f32 * base * AVG_CHAR_WIDTH;
    if estimated > available {
        (base * available / estimated).max(0.0)
    } else {
        base
    }
}

/// Paints the guide layer from a [`BoardConfig`].
pub struct GuideRenderer {
    inset: f32,
    word_margin: f32,
    solid: LineStyle,
    dashed: LineStyle,
    outline: OutlineStyle,
}

impl GuideRenderer {
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            inset: config.guide_inset,
            word_margin: config.word_margin,
            solid: LineStyle {
                width: config.guide_line_width,
                color: config.guide_color,
                dash: Vec::new(),
            },
            dashed: LineStyle {
                width: config.guide_line_width,
                color: config.midline_color,
                dash: config.midline_dash.to_vec(),
            },
            outline: OutlineStyle {
                width: config.outline_width,
                dash: config.outline_dash.to_vec(),
                stroke: config.outline_color,
                fill: config.outline_fill,
                font_family: config.font_family.clone(),
            },
        }
    }

    /// Build the full guide layer for `content` on a `width` × `height` surface.
    pub fn render(&self, content: &PracticeContent, width: f32, height: f32) -> DisplayList {
        let metrics = GuideMetrics::new(height);
        let mut list = DisplayList::new();

        list.push(DrawCommand::Clear { width, height });
        self.push_line(&mut list, metrics.top, width, &self.solid);
        self.push_line(&mut list, metrics.middle, width, &self.dashed);
        self.push_line(&mut list, metrics.baseline, width, &self.solid);

        match content {
            PracticeContent::Character { ch, case: CaseMode::Both } => {
                let offset = width / 4.0;
                let (upper, lower) = (to_upper(*ch).to_string(), to_lower(*ch).to_string());
                let size = metrics.glyph_height;
                self.push_text(&mut list, upper, width / 2.0 - offset, &metrics, size);
                self.push_text(&mut list, lower, width / 2.0 + offset, &metrics, size);
            }
            PracticeContent::Character { ch, case } => {
                let glyph = case.apply(*ch).to_string();
                self.push_text(&mut list, glyph, width / 2.0, &metrics, metrics.glyph_height);
            }
            PracticeContent::Word { text } => {
                let len = text.chars().count();
                if len == 0 {
                    log::debug!("guide: empty word, drawing guide lines only");
                    return list;
                }
                let size = word_font_size(len, metrics.glyph_height, width - self.word_margin);
                self.push_text(&mut list, text.clone(), width / 2.0, &metrics, size);
            }
        }

        list
    }

    fn push_line(&self, list: &mut DisplayList, y: f32, width: f32, style: &LineStyle) {
        list.push(DrawCommand::Line {
            from: Vec2::new(self.inset, y),
            to: Vec2::new(width - self.inset, y),
            style: style.clone(),
        });
    }

    fn push_text(
        &self,
        list: &mut DisplayList,
        text: String,
        x: f32,
        metrics: &GuideMetrics,
        font_size: f32,
    ) {
        // Degenerate surfaces can drive a word's size to zero.
        if font_size <= 0.0 {
            return;
        }
        list.push(DrawCommand::Text {
            text,
            center: Vec2::new(x, metrics.center_y),
            font_size,
            style: self.outline.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn renderer() -> GuideRenderer {
        GuideRenderer::new(&BoardConfig::default())
    }

    #[test]
    fn guide_lines_at_fixed_fractions() {
        for (width, height) in [(400.0, 500.0), (700.0, 500.0), (123.0, 77.0), (900.0, 1000.0)] {
            let content = PracticeContent::character('A', CaseMode::Uppercase);
            let list = renderer().render(&content, width, height);
            let ys: Vec<f32> = list.lines().map(|(from, to, _)| {
                assert_eq!(from.y, to.y);
                from.y
            }).collect();
            assert_eq!(ys, vec![height * 0.15, height * 0.5, height * 0.85]);
        }
    }

    #[test]
    fn guide_lines_span_inset() {
        let content = PracticeContent::character('A', CaseMode::Uppercase);
        let list = renderer().render(&content, 400.0, 500.0);
        let styles: Vec<_> = list.lines().map(|(from, to, style)| {
            assert_eq!(from.x, 20.0);
            assert_eq!(to.x, 380.0);
            style.dash.is_empty()
        }).collect();
        // Top and baseline solid, midline dashed
        assert_eq!(styles, vec![true, false, true]);
    }

    #[test]
    fn starts_with_full_clear() {
        let list = renderer().render(&PracticeContent::word("SOL"), 640.0, 500.0);
        assert_eq!(list.commands()[0], DrawCommand::Clear { width: 640.0, height: 500.0 });
    }

    #[test]
    fn single_character_scenario() {
        let content = PracticeContent::character('A', CaseMode::Uppercase);
        let list = renderer().render(&content, 400.0, 500.0);
        let texts: Vec<_> = list.texts().collect();
        assert_eq!(texts.len(), 1);
        let (text, center, size) = texts[0];
        assert_eq!(text, "A");
        assert!(approx(center.x, 200.0));
        assert!(approx(center.y, 250.0));
        assert!(approx(size, 315.0), "font size was {size}");
    }

    #[test]
    fn single_character_follows_case() {
        let content = PracticeContent::character('A', CaseMode::Lowercase);
        let list = renderer().render(&content, 400.0, 500.0);
        assert_eq!(list.texts().next().unwrap().0, "a");
    }

    #[test]
    fn dual_case_side_by_side_at_full_size() {
        let content = PracticeContent::character('m', CaseMode::Both);
        let list = renderer().render(&content, 700.0, 500.0);
        let texts: Vec<_> = list.texts().collect();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0].0, "M");
        assert_eq!(texts[1].0, "m");
        assert!(approx(texts[0].1.x, 175.0));
        assert!(approx(texts[1].1.x, 525.0));
        let single = GuideMetrics::new(500.0).glyph_height;
        assert_eq!(texts[0].2, single);
        assert_eq!(texts[1].2, single);
    }

    #[test]
    fn case_switch_recenters_without_changing_height() {
        for case in CaseMode::ALL {
            let width = if case == CaseMode::Both { 700.0 } else { 400.0 };
            let list = renderer().render(&PracticeContent::character('b', case), width, 500.0);
            let xs: Vec<f32> = list.texts().map(|(_, c, _)| c.x).collect();
            let mean = xs.iter().sum::<f32>() / xs.len() as f32;
            assert!(approx(mean, width / 2.0));
            for (_, center, _) in list.texts() {
                assert!(approx(center.y, 250.0));
            }
            assert_eq!(list.commands()[0], DrawCommand::Clear { width, height: 500.0 });
        }
    }

    #[test]
    fn word_fits_without_scaling() {
        let height = 500.0;
        let metrics = GuideMetrics::new(height);
        let base = WORD_SCALE * metrics.glyph_height;
        let list = renderer().render(&PracticeContent::word("SOL"), 900.0, height);
        let (text, center, size) = list.texts().next().unwrap();
        assert_eq!(text, "SOL");
        assert!(approx(center.x, 450.0));
        assert_eq!(size, base);
        // 3 * 252 * 0.6 = 453.6 <= 840
        assert!(3.0 * size * AVG_CHAR_WIDTH <= 840.0);
    }

    #[test]
    fn long_word_scales_down_to_fit() {
        let height = 500.0;
        let width = 600.0;
        let word = "BORBOLETA";
        let list = renderer().render(&PracticeContent::word(word), width, height);
        let (_, _, size) = list.texts().next().unwrap();

        let base = WORD_SCALE * GuideMetrics::new(height).glyph_height;
        let available = width - 60.0;
        let estimated = word.len() as f32 * base * AVG_CHAR_WIDTH;
        assert!(estimated > available);
        assert!(approx(size, base * available / estimated));
        assert!(approx(word.len() as f32 * size * AVG_CHAR_WIDTH, available));
    }

    #[test]
    fn word_font_size_boundary() {
        // Exactly fitting estimate keeps the base size
        let glyph = 100.0;
        let base = glyph * WORD_SCALE;
        let available = 5.0 * base * AVG_CHAR_WIDTH;
        assert_eq!(word_font_size(5, glyph, available), base);
        assert!(word_font_size(6, glyph, available) < base);
        assert_eq!(word_font_size(3, glyph, -10.0), 0.0);
    }

    #[test]
    fn empty_word_draws_only_guides() {
        let list = renderer().render(&PracticeContent::word(""), 600.0, 500.0);
        assert_eq!(list.texts().count(), 0);
        assert_eq!(list.lines().count(), 3);
    }

    #[test]
    fn render_is_idempotent() {
        let r = renderer();
        for content in [
            PracticeContent::character('7', CaseMode::Uppercase),
            PracticeContent::character('q', CaseMode::Both),
            PracticeContent::word("CASA"),
        ] {
            let a = r.render(&content, 640.0, 500.0);
            let b = r.render(&content, 640.0, 500.0);
            assert_eq!(a, b);
            assert_eq!(a.to_json(), b.to_json());
        }
    }

    #[test]
    fn outline_style_from_config() {
        let content = PracticeContent::character('A', CaseMode::Uppercase);
        let list = renderer().render(&content, 400.0, 500.0);
        let style = list.commands().iter().find_map(|c| match c {
            DrawCommand::Text { style, .. } => Some(style.clone()),
            _ => None,
        }).unwrap();
        assert_eq!(style.dash, vec![8.0, 10.0]);
        assert_eq!(style.width, 3.0);
        assert_eq!(style.fill.a, 0.25);
    }
}
