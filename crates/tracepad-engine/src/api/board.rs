use glam::Vec2;

use crate::api::config::BoardConfig;
use crate::api::content::PracticeContent;
use crate::components::color::Color;
use crate::core::surface::{surface_size_for, Surface};
use crate::error::TraceError;
use crate::input::gesture::{DisplayRect, GestureEvent};
use crate::systems::guide::GuideRenderer;
use crate::systems::stroke::{StrokeInput, StrokeResult};
#[cfg(feature = "vectors")]
use crate::systems::ink_mesh::InkMesh;

/// The practice surface: guide layer, ink layer and the stroke session.
///
/// The guide renderer only writes the guide layer and the stroke input only
/// writes the ink layer. Every call runs to completion synchronously.
pub struct PracticeBoard {
    config: BoardConfig,
    surface: Surface,
    guides: GuideRenderer,
    stroke: StrokeInput,
    content: Option<PracticeContent>,
    /// Last measured width of the hosting container, for word surfaces.
    container_width: Option<f32>,
}

impl PracticeBoard {
    pub fn new(config: BoardConfig) -> Self {
        let surface = Surface::new(config.single_width, config.surface_height);
        let guides = GuideRenderer::new(&config);
        let stroke = StrokeInput::new(config.stroke_width, config.default_stroke_color);
        log::info!(
            "practice board created ({}x{})",
            surface.width(),
            surface.height()
        );
        Self {
            config,
            surface,
            guides,
            stroke,
            content: None,
            container_width: None,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn content(&self) -> Option<&PracticeContent> {
        self.content.as_ref()
    }

    pub fn stroke(&self) -> &StrokeInput {
        &self.stroke
    }

    pub fn is_drawing(&self) -> bool {
        self.stroke.is_drawing()
    }

    /// Show new content: resize per the sizing policy, repaint the guides and wipe the ink.
    pub fn set_content(&mut self, content: PracticeContent) {
        let size = surface_size_for(&content, self.container_width, &self.config);
        self.surface.resize(size.x, size.y);
        self.content = Some(content);
        self.repaint_guides();
        self.request_clear();
    }

    /// Record the hosting container's width (e.g. after a viewport resize).
    /// Word content is re-measured and repainted; other content is unaffected.
    /// Returns true when the surface changed size.
    pub fn set_container_width(&mut self, width: Option<f32>) -> bool {
        self.container_width = width;
        let Some(content) = self.content.as_ref().filter(|c| c.is_word()) else {
            return false;
        };
        let size = surface_size_for(content, width, &self.config);
        if !self.surface.resize(size.x, size.y) {
            return false;
        }
        log::debug!("word surface re-measured to {}x{}", size.x, size.y);
        self.stroke.reset();
        self.repaint_guides();
        true
    }

    /// Force a surface size and relayout the guide layer. Sizes snap to whole
    /// pixels, the resolution of a backing raster; unusable sizes are ignored.
    /// Returns true when the surface changed size, which also wipes the ink.
    pub fn set_surface_size(&mut self, width: f32, height: f32) -> bool {
        let (width, height) = (width.round(), height.round());
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            log::warn!("ignoring surface size {width}x{height}");
            return false;
        }
        let resized = self.surface.resize(width, height);
        if resized {
            log::debug!("surface resized to {width}x{height}");
            self.stroke.reset();
        }
        self.repaint_guides();
        resized
    }

    /// Wipe the ink layer. Safe mid-stroke: the session returns to idle so a
    /// late move cannot paint from a point that no longer exists.
    pub fn request_clear(&mut self) {
        self.surface.ink.clear();
        self.stroke.reset();
        log::debug!("ink cleared (generation {})", self.surface.ink.generation());
    }

    /// Color for subsequent segments.
    pub fn set_stroke_color(&mut self, color: Color) {
        self.stroke.set_color(color);
    }

    /// Same as [`Self::set_stroke_color`], from a `#rrggbb` string.
    pub fn set_stroke_color_hex(&mut self, hex: &str) -> Result<(), TraceError> {
        self.set_stroke_color(Color::from_hex(hex)?);
        Ok(())
    }

    /// Feed one gesture event. `rect` is the ink surface's on-screen box.
    pub fn handle_gesture(&mut self, event: GestureEvent, rect: &DisplayRect) -> StrokeResult {
        let result = self.stroke.handle(event, rect, self.surface.size());
        if let StrokeResult::Painted(segment) = result {
            log::trace!("ink segment {:?} -> {:?}", segment.from(), segment.to());
            self.surface.ink.push(segment);
        }
        result
    }

    /// Rebuild the guide layer from the current content and size.
    pub fn repaint_guides(&mut self) {
        let Some(content) = &self.content else {
            return;
        };
        let Vec2 { x: width, y: height } = self.surface.size();
        self.surface.guide = self.guides.render(content, width, height);
        log::debug!("guides repainted ({} commands)", self.surface.guide.len());
    }

    /// Tessellate the current ink for GPU hosts.
    #[cfg(feature = "vectors")]
    pub fn build_ink_mesh(&self, mesh: &mut InkMesh) {
        mesh.rebuild(self.surface.ink.segments());
    }
}

impl Default for PracticeBoard {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::content::CaseMode;
    use crate::renderer::command::DrawCommand;

    fn unscaled(board: &PracticeBoard) -> DisplayRect {
        DisplayRect::unscaled(board.surface().size())
    }

    fn draw(board: &mut PracticeBoard, points: &[Vec2]) {
        let rect = unscaled(board);
        board.handle_gesture(GestureEvent::Start(Some(points[0])), &rect);
        for p in &points[1..] {
            board.handle_gesture(GestureEvent::Move(Some(*p)), &rect);
        }
        board.handle_gesture(GestureEvent::End, &rect);
    }

    #[test]
    fn end_to_end_single_character() {
        let mut board = PracticeBoard::default();
        board.set_content(PracticeContent::character('A', CaseMode::Uppercase));
        assert_eq!(board.surface().size(), Vec2::new(400.0, 500.0));

        let texts: Vec<_> = board.surface().guide.texts().collect();
        assert_eq!(texts.len(), 1);
        let (text, center, size) = texts[0];
        assert_eq!(text, "A");
        assert!((center.y - 250.0).abs() < 1e-3);
        assert!((size - 315.0).abs() < 1e-3);
    }

    #[test]
    fn set_content_is_idempotent() {
        let mut board = PracticeBoard::default();
        board.set_content(PracticeContent::character('q', CaseMode::Both));
        let first = board.surface().guide.clone();
        board.set_content(PracticeContent::character('q', CaseMode::Both));
        assert_eq!(board.surface().guide, first);
    }

    #[test]
    fn tap_leaves_no_ink() {
        let mut board = PracticeBoard::default();
        board.set_content(PracticeContent::character('A', CaseMode::Uppercase));
        draw(&mut board, &[Vec2::new(50.0, 50.0)]);
        assert!(board.surface().ink.is_empty());
        assert!(!board.is_drawing());
    }

    #[test]
    fn two_moves_paint_two_connected_segments() {
        let mut board = PracticeBoard::default();
        board.set_content(PracticeContent::character('A', CaseMode::Uppercase));
        // Displayed at half size, so every coordinate doubles
        let rect = DisplayRect::new(0.0, 0.0, 200.0, 250.0);
        board.handle_gesture(GestureEvent::Start(Some(Vec2::new(10.0, 10.0))), &rect);
        board.handle_gesture(GestureEvent::Move(Some(Vec2::new(20.0, 10.0))), &rect);
        board.handle_gesture(GestureEvent::Move(Some(Vec2::new(20.0, 30.0))), &rect);
        board.handle_gesture(GestureEvent::End, &rect);

        let segs = board.surface().ink.segments();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].from(), Vec2::new(20.0, 20.0));
        assert_eq!(segs[0].to(), Vec2::new(40.0, 20.0));
        assert_eq!(segs[1].from(), segs[0].to());
        assert_eq!(segs[1].to(), Vec2::new(40.0, 60.0));
        assert_eq!(segs[0].width, 18.0);
    }

    #[test]
    fn clear_mid_stroke_stops_painting() {
        let mut board = PracticeBoard::default();
        board.set_content(PracticeContent::character('A', CaseMode::Uppercase));
        let rect = unscaled(&board);
        board.handle_gesture(GestureEvent::Start(Some(Vec2::new(10.0, 10.0))), &rect);
        board.handle_gesture(GestureEvent::Move(Some(Vec2::new(30.0, 10.0))), &rect);
        assert_eq!(board.surface().ink.len(), 1);

        board.request_clear();
        assert!(board.surface().ink.is_empty());
        assert!(!board.is_drawing());
        assert_eq!(board.stroke().last_point(), None);

        // A move racing the clear must not paint
        let late = board.handle_gesture(GestureEvent::Move(Some(Vec2::new(60.0, 10.0))), &rect);
        assert_eq!(late, StrokeResult::Ignored);
        assert!(board.surface().ink.is_empty());
    }

    #[test]
    fn clear_while_idle_is_empty() {
        let mut board = PracticeBoard::default();
        board.request_clear();
        assert!(board.surface().ink.is_empty());
    }

    #[test]
    fn content_change_clears_ink_and_resizes() {
        let mut board = PracticeBoard::default();
        board.set_content(PracticeContent::character('A', CaseMode::Uppercase));
        draw(&mut board, &[Vec2::ZERO, Vec2::new(5.0, 5.0)]);
        assert_eq!(board.surface().ink.len(), 1);

        board.set_content(PracticeContent::character('A', CaseMode::Both));
        assert!(board.surface().ink.is_empty());
        assert_eq!(board.surface().size(), Vec2::new(700.0, 500.0));
        assert_eq!(
            board.surface().guide.commands()[0],
            DrawCommand::Clear { width: 700.0, height: 500.0 }
        );
    }

    #[test]
    fn stroke_color_applies_forward() {
        let mut board = PracticeBoard::default();
        board.set_content(PracticeContent::character('A', CaseMode::Uppercase));
        draw(&mut board, &[Vec2::ZERO, Vec2::new(5.0, 5.0)]);
        board.set_stroke_color_hex("#22c55e").unwrap();
        draw(&mut board, &[Vec2::new(9.0, 9.0), Vec2::new(10.0, 10.0)]);

        let segs = board.surface().ink.segments();
        assert_eq!(segs[0].color(), Color::PURPLE);
        assert_eq!(segs[1].color(), Color::GREEN);
        assert!(board.set_stroke_color_hex("green").is_err());
    }

    #[test]
    fn word_surface_follows_container() {
        let mut board = PracticeBoard::default();
        board.set_container_width(Some(820.0));
        board.set_content(PracticeContent::word("BORBOLETA"));
        assert_eq!(board.surface().width(), 820.0);

        assert!(board.set_container_width(Some(500.0)));
        assert_eq!(board.surface().width(), 500.0);
        assert_eq!(
            board.surface().guide.commands()[0],
            DrawCommand::Clear { width: 500.0, height: 500.0 }
        );
        assert!(!board.set_container_width(Some(500.0)));
    }

    #[test]
    fn container_width_ignored_for_characters() {
        let mut board = PracticeBoard::default();
        board.set_content(PracticeContent::character('7', CaseMode::Uppercase));
        assert!(!board.set_container_width(Some(300.0)));
        assert_eq!(board.surface().width(), 400.0);
    }

    #[test]
    fn same_size_keeps_ink_and_stroke() {
        let mut board = PracticeBoard::default();
        board.set_content(PracticeContent::character('A', CaseMode::Uppercase));
        let rect = unscaled(&board);
        board.handle_gesture(GestureEvent::Start(Some(Vec2::new(10.0, 10.0))), &rect);
        board.handle_gesture(GestureEvent::Move(Some(Vec2::new(30.0, 10.0))), &rect);

        assert!(!board.set_surface_size(400.0, 500.0));
        assert_eq!(board.surface().ink.len(), 1);
        assert!(board.is_drawing());

        assert!(board.set_surface_size(401.0, 500.0));
        assert!(board.surface().ink.is_empty());
        assert!(!board.is_drawing());
    }

    #[test]
    fn surface_size_snaps_to_whole_pixels() {
        let mut board = PracticeBoard::default();
        board.set_content(PracticeContent::character('A', CaseMode::Uppercase));
        assert!(board.set_surface_size(200.4, 300.6));
        assert_eq!(board.surface().size(), Vec2::new(200.0, 301.0));

        assert!(!board.set_surface_size(0.2, 300.0));
        assert!(!board.set_surface_size(f32::NAN, 300.0));
        assert_eq!(board.surface().size(), Vec2::new(200.0, 301.0));
    }

    #[test]
    fn explicit_surface_size_relayouts() {
        let mut board = PracticeBoard::default();
        board.set_content(PracticeContent::character('A', CaseMode::Uppercase));
        assert!(board.set_surface_size(200.0, 300.0));
        let ys: Vec<f32> = board.surface().guide.lines().map(|(from, _, _)| from.y).collect();
        assert_eq!(ys, vec![300.0 * 0.15, 300.0 * 0.5, 300.0 * 0.85]);
        assert_eq!(board.surface().ink.len(), 0);
    }

    #[cfg(feature = "vectors")]
    #[test]
    fn ink_mesh_from_board() {
        let mut board = PracticeBoard::default();
        board.set_content(PracticeContent::character('A', CaseMode::Uppercase));
        draw(&mut board, &[Vec2::new(10.0, 10.0), Vec2::new(100.0, 10.0), Vec2::new(100.0, 100.0)]);
        let mut mesh = InkMesh::new();
        board.build_ink_mesh(&mut mesh);
        assert!(mesh.vertex_count() > 0);
    }
}
