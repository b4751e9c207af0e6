use serde::Serialize;

use crate::api::content::PracticeContent;
use crate::renderer::ink::InkLayer;

/// How well the ink covers the template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    pub coverage: f32,
    pub accuracy: f32,
    pub is_success: bool,
}

/// Practice is never graded: always returns zeroed metrics.
pub fn validate_tracing(_content: &PracticeContent, _ink: &InkLayer) -> ValidationResult {
    ValidationResult::default()
}
