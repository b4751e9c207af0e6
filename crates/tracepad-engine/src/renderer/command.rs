//! Retained draw commands for the guide layer.
//!
//! The engine never touches a raster itself. The guide layer is described as
//! an ordered list of commands that a host replays onto its own canvas; two
//! equal lists always produce the same pixels.

use glam::Vec2;
use serde::Serialize;

use crate::components::color::Color;

/// Stroke style for a guide line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub width: f32,
    pub color: Color,
    /// On/off dash lengths. Empty means solid.
    pub dash: Vec<f32>,
}

/// Style of a template glyph: dashed outline plus a faint fill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineStyle {
    pub width: f32,
    pub dash: Vec<f32>,
    pub stroke: Color,
    pub fill: Color,
    /// CSS font family; the weight is always bold.
    pub font_family: String,
}

impl OutlineStyle {
    /// CSS font shorthand for the given pixel size, e.g. `bold 315px Arial, sans-serif`.
    pub fn css_font(&self, font_size: f32) -> String {
        format!("bold {}px {}", font_size, self.font_family)
    }
}

/// One drawing operation on the guide layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Wipe the whole layer to transparent.
    Clear { width: f32, height: f32 },
    /// Straight horizontal or arbitrary line.
    Line { from: Vec2, to: Vec2, style: LineStyle },
    /// Text centered on `center` (center alignment, middle baseline).
    Text {
        text: String,
        center: Vec2,
        font_size: f32,
        style: OutlineStyle,
    },
}

/// Ordered list of draw commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over text commands only.
    pub fn texts(&self) -> impl Iterator<Item = (&str, Vec2, f32)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text {
                text,
                center,
                font_size,
                ..
            } => Some((text.as_str(), *center, *font_size)),
            _ => None,
        })
    }

    /// Iterate over line commands only.
    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, &LineStyle)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, style } => Some((*from, *to, style)),
            _ => None,
        })
    }

    /// Serialize for hosts that replay the list outside of Rust.
    pub fn to_json(&self) -> String {
        // Only plain floats, strings and vectors: serialization cannot fail.
        serde_json::to_string(&self.commands).unwrap_or_else(|_| "[]".to_string())
    }
}
