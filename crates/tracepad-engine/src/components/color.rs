//! RGBA color used by guide outlines and ink strokes.

use serde::{Deserialize, Serialize};

use crate::error::TraceError;

/// RGBA color with components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a color from RGBA components (0.0 - 1.0).
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGB u8 values (0-255) with full opacity.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Create a color with the given alpha value.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Parse `#rrggbb` or `#rgb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Result<Self, TraceError> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || TraceError::InvalidColor(hex.to_string());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            6 => Ok(Self::rgb8(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                // #abc expands to #aabbcc
                let short = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
                Ok(Self::rgb8(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(invalid()),
        }
    }

    /// RGB components as bytes.
    pub fn to_rgb8(self) -> [u8; 3] {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [byte(self.r), byte(self.g), byte(self.b)]
    }

    /// CSS color string, e.g. `rgba(155, 135, 245, 1)`.
    pub fn to_css(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("rgba({r}, {g}, {b}, {})", self.a.clamp(0.0, 1.0))
    }

    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const PURPLE: Self = Self::rgb8(0x9b, 0x87, 0xf5);
    pub const PINK: Self = Self::rgb8(0xec, 0x48, 0x99);
    pub const RED: Self = Self::rgb8(0xef, 0x44, 0x44);
    pub const ORANGE: Self = Self::rgb8(0xf9, 0x73, 0x16);
    pub const YELLOW: Self = Self::rgb8(0xea, 0xb3, 0x08);
    pub const GREEN: Self = Self::rgb8(0x22, 0xc5, 0x5e);
    pub const BLUE: Self = Self::rgb8(0x3b, 0x82, 0xf6);
    pub const CYAN: Self = Self::rgb8(0x06, 0xb6, 0xd4);
}

impl Default for Color {
    fn default() -> Self {
        Self::PURPLE
    }
}

/// Ink swatches offered to the learner, in display order.
pub const PALETTE: [(&str, Color); 8] = [
    ("purple", Color::PURPLE),
    ("pink", Color::PINK),
    ("red", Color::RED),
    ("orange", Color::ORANGE),
    ("yellow", Color::YELLOW),
    ("green", Color::GREEN),
    ("blue", Color::BLUE),
    ("cyan", Color::CYAN),
];
