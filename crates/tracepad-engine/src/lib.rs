pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod practice;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::board::PracticeBoard;
pub use api::config::BoardConfig;
pub use api::content::{CaseMode, PracticeContent};
pub use components::color::{Color, PALETTE};
pub use core::surface::{surface_size_for, Surface};
pub use error::TraceError;
pub use input::gesture::{DisplayRect, GestureEvent};
pub use renderer::command::{DisplayList, DrawCommand, LineStyle, OutlineStyle};
pub use renderer::ink::{InkLayer, InkSegment};
pub use systems::guide::{GuideMetrics, GuideRenderer};
pub use systems::stroke::{StrokeInput, StrokeResult, StrokeState};
pub use practice::{Category, Mode, PracticeSession, Route, ValidationResult};

#[cfg(feature = "vectors")]
pub use systems::ink_mesh::{InkMesh, InkVertex};
