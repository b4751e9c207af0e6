use tracepad_engine::practice::validate_tracing;
use tracepad_engine::{
    BoardConfig, CaseMode, Category, DisplayRect, GestureEvent, PracticeBoard, PracticeContent,
    PracticeSession, Route, ValidationResult,
};
#[cfg(feature = "vectors")]
use tracepad_engine::InkMesh;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement};

use crate::painter;

/// Owns the board, the practice session and the two canvases they paint.
///
/// The bridge keeps one runner in a `thread_local!` and forwards every
/// exported call to it.
pub struct BoardRunner {
    board: PracticeBoard,
    session: Option<PracticeSession>,
    guide_canvas: HtmlCanvasElement,
    ink_canvas: HtmlCanvasElement,
    guide_ctx: CanvasRenderingContext2d,
    ink_ctx: CanvasRenderingContext2d,
    /// Element whose width bounds word surfaces.
    container: Option<Element>,
    /// Ink segments already on the ink canvas.
    painted: usize,
    /// Ink generation the canvas shows; any other value means the ink was wiped.
    painted_generation: u32,
    #[cfg(feature = "vectors")]
    mesh: InkMesh,
}

impl BoardRunner {
    pub fn new(
        config: BoardConfig,
        document: &Document,
        guide_canvas_id: &str,
        ink_canvas_id: &str,
        container_id: Option<&str>,
    ) -> Result<Self, JsValue> {
        let guide_canvas = canvas_by_id(document, guide_canvas_id)?;
        let ink_canvas = canvas_by_id(document, ink_canvas_id)?;
        let guide_ctx = context_2d(&guide_canvas)?;
        let ink_ctx = context_2d(&ink_canvas)?;
        let container = container_id.and_then(|id| document.get_element_by_id(id));
        if container_id.is_some() && container.is_none() {
            log::warn!("container not found; word surfaces use the fallback width");
        }

        let board = PracticeBoard::new(config);
        let painted_generation = board.surface().ink.generation();
        Ok(Self {
            board,
            session: None,
            guide_canvas,
            ink_canvas,
            guide_ctx,
            ink_ctx,
            container,
            painted: 0,
            painted_generation,
            #[cfg(feature = "vectors")]
            mesh: InkMesh::new(),
        })
    }

    pub fn board(&self) -> &PracticeBoard {
        &self.board
    }

    pub fn session(&self) -> Option<&PracticeSession> {
        self.session.as_ref()
    }

    /// Show content chosen by the host. Any running session ends.
    pub fn set_content(&mut self, content: PracticeContent) -> Result<(), JsValue> {
        self.session = None;
        self.show(content)
    }

    /// Open the session a route describes. Returns false for selection screens.
    pub fn open_route(&mut self, route: &Route, seed: u64) -> Result<bool, JsValue> {
        let Some(session) = PracticeSession::from_route(route, seed) else {
            return Ok(false);
        };
        let content = session.content();
        self.session = Some(session);
        self.show(content)?;
        Ok(true)
    }

    /// Advance the session to its next character. Word sessions only wipe the ink.
    pub fn next(&mut self) -> Result<(), JsValue> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        session.next();
        let content = session.content();
        self.show(content)
    }

    /// Cycle the session's case. Returns the new case for letter sessions.
    pub fn toggle_case(&mut self) -> Result<Option<CaseMode>, JsValue> {
        let Some(session) = self.session.as_mut() else {
            return Ok(None);
        };
        if session.category() != Category::Letters {
            return Ok(None);
        }
        session.toggle_case();
        let (case, content) = (session.case(), session.content());
        self.show(content)?;
        Ok(Some(case))
    }

    /// Re-measure the container after a viewport resize.
    pub fn viewport_resized(&mut self) -> Result<(), JsValue> {
        if self.board.set_container_width(self.measure_container()) {
            self.sync_canvases()?;
        }
        Ok(())
    }

    pub fn set_surface_size(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        if self.board.set_surface_size(width, height) {
            self.sync_canvases()?;
        }
        Ok(())
    }

    pub fn request_clear(&mut self) {
        self.board.request_clear();
        if let Some(session) = self.session.as_mut() {
            session.clear();
        }
        self.flush_ink();
    }

    pub fn set_stroke_color(&mut self, hex: &str) -> Result<(), JsValue> {
        self.board
            .set_stroke_color_hex(hex)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Feed a gesture in client coordinates; paints any new segment right away.
    /// Returns whether the host should call `preventDefault()` on the event.
    pub fn gesture(&mut self, event: GestureEvent) -> bool {
        let bounds = self.ink_canvas.get_bounding_client_rect();
        let rect = DisplayRect::new(
            bounds.left() as f32,
            bounds.top() as f32,
            bounds.width() as f32,
            bounds.height() as f32,
        );

        let result = self.board.handle_gesture(event, &rect);
        self.flush_ink();
        result.suppresses_default()
    }

    pub fn validate(&self) -> ValidationResult {
        self.board
            .content()
            .map(|content| validate_tracing(content, &self.board.surface().ink))
            .unwrap_or_default()
    }

    /// Flat copy of the ink layer, `InkSegment::FLOATS` per segment.
    pub fn ink_floats(&self) -> Vec<f32> {
        self.board.surface().ink.as_floats().to_vec()
    }

    /// Triangle list of the current ink, `InkVertex::FLOATS` per vertex.
    #[cfg(feature = "vectors")]
    pub fn ink_mesh(&mut self) -> Vec<f32> {
        self.board.build_ink_mesh(&mut self.mesh);
        self.mesh.buffer().to_vec()
    }

    pub fn guide_json(&self) -> String {
        self.board.surface().guide.to_json()
    }

    fn show(&mut self, content: PracticeContent) -> Result<(), JsValue> {
        self.board.set_container_width(self.measure_container());
        self.board.set_content(content);
        self.sync_canvases()
    }

    /// Bring the ink canvas up to date with the ink layer: wipe after a
    /// clear, then paint only the segments not yet on screen.
    fn flush_ink(&mut self) {
        let surface = self.board.surface();
        if surface.ink.generation() != self.painted_generation {
            painter::wipe(&self.ink_ctx, surface.width(), surface.height());
            self.painted = 0;
            self.painted_generation = surface.ink.generation();
        }
        for segment in surface.ink.segments_since(self.painted) {
            painter::paint_segment(&self.ink_ctx, segment);
        }
        self.painted = surface.ink.len();
    }

    fn measure_container(&self) -> Option<f32> {
        self.container
            .as_ref()
            .map(|el| el.client_width() as f32)
            .filter(|w| *w > 0.0)
    }

    /// Match both canvases to the surface, repaint the guides and replay the ink.
    fn sync_canvases(&mut self) -> Result<(), JsValue> {
        let surface = self.board.surface();
        let (width, height) = (surface.width() as u32, surface.height() as u32);
        for canvas in [&self.guide_canvas, &self.ink_canvas] {
            if canvas.width() != width || canvas.height() != height {
                canvas.set_width(width);
                canvas.set_height(height);
            }
        }
        painter::paint_list(&self.guide_ctx, &surface.guide)?;

        painter::wipe(&self.ink_ctx, surface.width(), surface.height());
        self.painted = 0;
        self.painted_generation = surface.ink.generation();
        self.flush_ink();
        Ok(())
    }
}

fn canvas_by_id(document: &Document, id: &str) -> Result<HtmlCanvasElement, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id {id:?}")))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str(&format!("element {id:?} is not a canvas")))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("unexpected 2d context type"))
}
