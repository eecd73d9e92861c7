//! Background/fill color resolution.
//!
//! Accepts the textual formats style attributes commonly carry: `#rgb` and
//! `#rrggbb` hex, `rgb(r, g, b)` with 0-255 components, and a small set of
//! named colors. Resolution failure is a style error handled by the caller;
//! this module only reports `None`.

use serde::{Deserialize, Serialize};

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Create a color from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb`, with or without the leading `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
                Some(Self::new(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::new(r, g, b))
            }
            _ => None,
        }
    }

    /// The packed `0xRRGGBB` value a material's color channel carries.
    pub fn rgb_number(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Channels as normalized floats for renderers that want them.
    pub fn to_f32_array(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

/// Resolve a textual color value.
pub fn parse(value: &str) -> Option<Color> {
    let value = value.trim();

    if value.starts_with('#') {
        return Color::from_hex(value);
    }

    if let Some(inner) = value
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let mut channels = inner.split(',').map(|c| c.trim().parse::<u8>());
        let r = channels.next()?.ok()?;
        let g = channels.next()?.ok()?;
        let b = channels.next()?.ok()?;
        if channels.next().is_some() {
            return None;
        }
        return Some(Color::new(r, g, b));
    }

    // Named colors (basic set)
    match value.to_ascii_lowercase().as_str() {
        "white" => Some(Color::WHITE),
        "black" => Some(Color::BLACK),
        "red" => Some(Color::new(255, 0, 0)),
        "green" => Some(Color::new(0, 128, 0)),
        "lime" => Some(Color::new(0, 255, 0)),
        "blue" => Some(Color::new(0, 0, 255)),
        "yellow" => Some(Color::new(255, 255, 0)),
        "cyan" => Some(Color::new(0, 255, 255)),
        "magenta" => Some(Color::new(255, 0, 255)),
        "gray" | "grey" => Some(Color::new(128, 128, 128)),
        "orange" => Some(Color::new(255, 165, 0)),
        _ => None,
    }
}
