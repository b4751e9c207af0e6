use glam::Vec2;

use crate::api::config::BoardConfig;
use crate::api::content::PracticeContent;
use crate::renderer::command::DisplayList;
use crate::renderer::ink::InkLayer;

/// Two layers sharing one coordinate system: guides below, ink above.
///
/// Both layers always have the surface's dimensions; resizing touches both.
pub struct Surface {
    width: f32,
    height: f32,
    pub guide: DisplayList,
    pub ink: InkLayer,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            guide: DisplayList::new(),
            ink: InkLayer::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Resize both layers. A resized raster loses its pixels, so ink is wiped
    /// and the guide list must be repainted by the caller.
    /// Returns false when the size did not change.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
        self.guide = DisplayList::new();
        self.ink.clear();
        true
    }
}

/// Backing size for a piece of content.
///
/// Words take the hosting container's width clamped to `word_max_width`, or
/// `word_fallback_width` when no usable measurement exists. Characters use one
/// of two fixed widths. Height never varies.
pub fn surface_size_for(
    content: &PracticeContent,
    container_width: Option<f32>,
    config: &BoardConfig,
) -> Vec2 {
    let width = match content {
        PracticeContent::Word { .. } => match container_width {
            Some(w) if w.is_finite() && w > 0.0 => w.min(config.word_max_width),
            _ => config.word_fallback_width,
        },
        _ if content.is_dual_case() => config.dual_width,
        _ => config.single_width,
    };
    // Backing rasters have whole-pixel dimensions.
    Vec2::new(width, config.surface_height).round()
}
