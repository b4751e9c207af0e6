use glam::Vec2;

/// Gesture events the stroke machine understands.
/// The same stream comes from mouse, touch or stylus.
/// Points are client coordinates (CSS pixels, same space as [`DisplayRect`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Pointer-down or first touch contact. `None` when the platform event
    /// carried no usable point (e.g. a touch event with an empty touch list).
    Start(Option<Vec2>),
    /// Pointer or first touch moved.
    Move(Option<Vec2>),
    /// Pointer-up or touch-end.
    End,
    /// The platform took the gesture away (e.g. a system swipe).
    Cancel,
    /// The pointer left the surface.
    Leave,
}

impl GestureEvent {
    /// Touch-start from the current touch list. Only the first contact is tracked.
    pub fn touch_start(touches: &[Vec2]) -> Self {
        Self::Start(touches.first().copied())
    }

    /// Touch-move from the current touch list. Only the first contact is tracked.
    pub fn touch_move(touches: &[Vec2]) -> Self {
        Self::Move(touches.first().copied())
    }
}

/// The ink surface's on-screen bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl DisplayRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// A rect displaying the backing raster 1:1 at the origin.
    pub fn unscaled(backing: Vec2) -> Self {
        Self::new(0.0, 0.0, backing.x, backing.y)
    }

    /// Per-axis factors from displayed size to backing size.
    /// `None` while the surface is collapsed (zero or non-finite display size).
    pub fn scale_to(&self, backing: Vec2) -> Option<Vec2> {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        if !usable(self.width) || !usable(self.height) {
            return None;
        }
        Some(Vec2::new(backing.x / self.width, backing.y / self.height))
    }

    /// Map a client point into backing-raster coordinates. The axes scale
    /// independently, so stretched layouts and high-density displays map correctly.
    pub fn to_canvas(&self, client: Vec2, backing: Vec2) -> Option<Vec2> {
        let scale = self.scale_to(backing)?;
        Some((client - Vec2::new(self.left, self.top)) * scale)
    }
}
