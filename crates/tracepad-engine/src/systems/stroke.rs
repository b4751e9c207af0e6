use glam::Vec2;

use crate::components::color::Color;
use crate::input::gesture::{DisplayRect, GestureEvent};
use crate::renderer::ink::InkSegment;

/// Stroke session state. Owned by one [`StrokeInput`], never shared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeState {
    /// No stroke in progress.
    Idle,
    /// A stroke is in progress; `last` is the most recent canvas-space sample.
    Drawing { last: Vec2 },
}

/// Result of feeding one gesture event to the stroke machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeResult {
    /// Idle → drawing; the first sample was recorded.
    Started,
    /// A segment from the previous sample to the new one.
    Painted(InkSegment),
    /// Drawing → idle. Painted ink stays.
    Ended,
    /// Nothing happened (move while idle, unusable point, end while idle).
    Ignored,
}

impl StrokeResult {
    /// Whether the host must suppress default platform handling (scroll,
    /// pinch-zoom) for the event. True for every transition of an active stroke.
    pub fn suppresses_default(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Turns a gesture stream into connected ink segments.
///
/// ```text
/// Idle    --Start(p)-->           Drawing{p}
/// Drawing --Move(q)-->            Drawing{q}   paints p→q
/// Drawing --End|Cancel|Leave-->   Idle
/// ```
pub struct StrokeInput {
    state: StrokeState,
    color: Color,
    width: f32,
}

impl StrokeInput {
    pub fn new(width: f32, color: Color) -> Self {
        Self {
            state: StrokeState::Idle,
            color,
            width,
        }
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, StrokeState::Drawing { .. })
    }

    pub fn last_point(&self) -> Option<Vec2> {
        match self.state {
            StrokeState::Drawing { last } => Some(last),
            StrokeState::Idle => None,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Color for subsequent segments. Already painted segments keep theirs.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Map `event` from client space through `rect` onto a `backing`-sized raster and apply it.
    pub fn handle(
        &mut self,
        event: GestureEvent,
        rect: &DisplayRect,
        backing: Vec2,
    ) -> StrokeResult {
        let to_canvas = |p: Option<Vec2>| p.and_then(|p| rect.to_canvas(p, backing));
        match event {
            GestureEvent::Start(p) => self.on_start(to_canvas(p)),
            GestureEvent::Move(p) => {
                // Skip the transform entirely while idle.
                if !self.is_drawing() {
                    return StrokeResult::Ignored;
                }
                self.on_move(to_canvas(p))
            }
            GestureEvent::End | GestureEvent::Cancel | GestureEvent::Leave => self.on_end(),
        }
    }

    /// Gesture start at a canvas-space point. A start while drawing begins a new stroke.
    pub fn on_start(&mut self, point: Option<Vec2>) -> StrokeResult {
        match point {
            Some(p) => {
                self.state = StrokeState::Drawing { last: p };
                StrokeResult::Started
            }
            None => StrokeResult::Ignored,
        }
    }

    /// Gesture move to a canvas-space point.
    pub fn on_move(&mut self, point: Option<Vec2>) -> StrokeResult {
        let (StrokeState::Drawing { last }, Some(p)) = (self.state, point) else {
            return StrokeResult::Ignored;
        };
        self.state = StrokeState::Drawing { last: p };
        StrokeResult::Painted(InkSegment::new(last, p, self.width, self.color))
    }

    /// Gesture end, cancel or leave.
    pub fn on_end(&mut self) -> StrokeResult {
        match self.state {
            StrokeState::Drawing { .. } => {
                self.state = StrokeState::Idle;
                StrokeResult::Ended
            }
            StrokeState::Idle => StrokeResult::Ignored,
        }
    }

    /// Drop any stroke in progress without painting.
    pub fn reset(&mut self) {
        self.state = StrokeState::Idle;
    }
}
