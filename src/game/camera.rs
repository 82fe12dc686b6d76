//! # Camera
//!
//! Follow camera that keeps the player centered on screen at a fixed zoom.

use crate::config::DEFAULT_CAMERA_ZOOM;
use macroquad::math::{Rect, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    target: Vec2,
    zoom: f32,
    viewport: Vec2,
}

impl Camera {
    /// Creates a camera for a viewport of the given pixel size.
    ///
    /// A non-positive zoom falls back to the default.
    pub fn new(viewport: Vec2, zoom: f32) -> Self {
        Self {
            target: Vec2::ZERO,
            zoom: if zoom > 0.0 { zoom } else { DEFAULT_CAMERA_ZOOM },
            viewport,
        }
    }

    /// Centers the view on `target`.
    pub fn follow(&mut self, target: Vec2) {
        self.target = target;
    }

    /// Tracks a resized window.
    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Translate to the target, scale, then offset by half the viewport.
    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        (point - self.target) * self.zoom + self.viewport / 2.0
    }

    pub fn screen_to_world(&self, point: Vec2) -> Vec2 {
        (point - self.viewport / 2.0) / self.zoom + self.target
    }

    /// The world-space rectangle currently on screen.
    pub fn visible_rect(&self) -> Rect {
        let size = self.viewport / self.zoom;
        let top_left = self.target - size / 2.0;
        Rect::new(top_left.x, top_left.y, size.x, size.y)
    }
}
