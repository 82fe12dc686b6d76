//! # Display Management
//!
//! The macroquad-backed [`Surface`]: sprite sheets loaded from the assets directory,
//! drawn through a 2D camera.

use crate::game::Camera;
use crate::rendering::{SpriteDraw, Surface};
use log::{debug, warn};
use macroquad::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Tint for sheets that failed to load, so they stand out.
const PLACEHOLDER_TINT: Color = MAGENTA;

/// Size drawn for a placeholder without a source rectangle.
const PLACEHOLDER_SIZE: f32 = 16.0;

/// Macroquad display for the game.
///
/// Sheets are looked up by name; `"player/down"` loads `<assets>/player/down.png`.
pub struct MacroquadDisplay {
    assets_dir: PathBuf,
    textures: HashMap<String, Texture2D>,
    placeholder: Texture2D,
}

impl MacroquadDisplay {
    /// Creates a display and loads every sheet in `sheets`.
    ///
    /// A sheet that cannot be loaded is logged and drawn as a tinted box instead.
    pub async fn load(assets_dir: impl AsRef<Path>, sheets: &[String]) -> Self {
        let mut display = Self {
            assets_dir: assets_dir.as_ref().to_path_buf(),
            textures: HashMap::new(),
            placeholder: Texture2D::from_rgba8(1, 1, &[255, 255, 255, 255]),
        };
        for sheet in sheets {
            display.load_sheet(sheet).await;
        }
        debug!(
            "Loaded {} of {} sprite sheets",
            display.textures.len(),
            sheets.len()
        );
        display
    }

    async fn load_sheet(&mut self, sheet: &str) {
        let path = self.assets_dir.join(format!("{}.png", sheet));
        match load_texture(&path.to_string_lossy()).await {
            Ok(texture) => {
                texture.set_filter(FilterMode::Nearest);
                self.textures.insert(sheet.to_string(), texture);
            }
            Err(e) => warn!("Missing texture {} ({}), using placeholder", path.display(), e),
        }
    }

    pub fn has_sheet(&self, sheet: &str) -> bool {
        self.textures.contains_key(sheet)
    }
}

impl Surface for MacroquadDisplay {
    fn begin_world(&mut self, camera: &Camera) {
        let view = camera.visible_rect();
        // Negative height keeps y pointing down.
        set_camera(&Camera2D::from_display_rect(Rect::new(
            view.x,
            view.y + view.h,
            view.w,
            -view.h,
        )));
    }

    fn begin_screen(&mut self) {
        set_default_camera();
    }

    fn draw_sprite(&mut self, sprite: SpriteDraw<'_>) {
        let source = sprite
            .source
            .map(|b| Rect::new(b.x as f32, b.y as f32, b.width as f32, b.height as f32));

        match self.textures.get(sprite.sheet) {
            Some(texture) => draw_texture_ex(
                texture,
                sprite.position.x,
                sprite.position.y,
                sprite.tint,
                DrawTextureParams {
                    source,
                    flip_x: sprite.flip_x,
                    ..Default::default()
                },
            ),
            None => {
                let size = source
                    .map(|r| vec2(r.w, r.h))
                    .unwrap_or(vec2(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE));
                draw_texture_ex(
                    &self.placeholder,
                    sprite.position.x,
                    sprite.position.y,
                    PLACEHOLDER_TINT,
                    DrawTextureParams {
                        dest_size: Some(size),
                        ..Default::default()
                    },
                );
            }
        }
    }

    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, color: Color) {
        draw_text(text, position.x, position.y, size, color);
    }

    fn fill_screen(&mut self, color: Color) {
        draw_rectangle(0.0, 0.0, screen_width(), screen_height(), color);
    }
}
