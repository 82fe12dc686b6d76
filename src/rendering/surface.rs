//! # Draw Surface
//!
//! The boundary between the simulation and whatever puts pixels on screen.
//!
//! Everything in the game draws through [`Surface`]. Sprites are addressed by sheet name
//! and source rectangle, so the simulation never holds a texture handle. A call cannot
//! fail or return anything the simulation could observe.

use crate::game::{Bounds, Camera};
use macroquad::color::Color;
use macroquad::math::Vec2;

/// A single sprite blit in the current coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw<'a> {
    /// Name of the sprite sheet, e.g. `"player/down_idle"`
    pub sheet: &'a str,
    /// Region of the sheet to copy, or the whole sheet
    pub source: Option<Bounds>,
    /// Top-left corner of the destination
    pub position: Vec2,
    /// Color multiplier
    pub tint: Color,
    /// Mirror horizontally
    pub flip_x: bool,
}

/// Render contract implemented by display backends.
pub trait Surface {
    /// Switches to world space, as seen through `camera`.
    fn begin_world(&mut self, camera: &Camera);

    /// Switches to unscaled screen space for HUD and overlays.
    fn begin_screen(&mut self);

    fn draw_sprite(&mut self, sprite: SpriteDraw<'_>);

    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, color: Color);

    /// Covers the whole screen with `color`, alpha included.
    fn fill_screen(&mut self, color: Color);
}

/// One recorded call on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BeginWorld { target: Vec2 },
    BeginScreen,
    Sprite {
        sheet: String,
        source: Option<Bounds>,
        position: Vec2,
        tint: Color,
        flip_x: bool,
    },
    Text { text: String, position: Vec2 },
    Fill { color: Color },
}

/// Surface that stores draw calls instead of rendering them.
///
/// Used by tests and headless runs to check what a frame would show.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sheet names of all recorded sprites, in draw order.
    pub fn sprite_sheets(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite { sheet, .. } => Some(sheet.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Returns true if any recorded text contains `needle`.
    pub fn has_text(&self, needle: &str) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Text { text, .. } if text.contains(needle)))
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn begin_world(&mut self, camera: &Camera) {
        self.commands.push(DrawCommand::BeginWorld {
            target: camera.target(),
        });
    }

    fn begin_screen(&mut self) {
        self.commands.push(DrawCommand::BeginScreen);
    }

    fn draw_sprite(&mut self, sprite: SpriteDraw<'_>) {
        self.commands.push(DrawCommand::Sprite {
            sheet: sprite.sheet.to_string(),
            source: sprite.source,
            position: sprite.position,
            tint: sprite.tint,
            flip_x: sprite.flip_x,
        });
    }

    fn draw_text(&mut self, text: &str, position: Vec2, _size: f32, _color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
        });
    }

    fn fill_screen(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fill { color });
    }
}
