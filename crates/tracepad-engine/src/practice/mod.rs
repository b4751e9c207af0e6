// practice/mod.rs
//
// Host-side practice content: what to show next, shareable routes, grading stub.
// None of this touches the surface; hosts feed the results into PracticeBoard.

pub mod rng;
pub mod route;
pub mod sequence;
pub mod session;
pub mod validation;

pub use route::Route;
pub use sequence::{Category, Mode};
pub use session::{normalize_word, PracticeSession};
pub use validation::{validate_tracing, ValidationResult};
