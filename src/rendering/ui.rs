//! # User Interface
//!
//! Screen-space overlays: the HUD, the menu and end screens, and the fade.

use crate::game::{Player, RoomId};
use crate::rendering::Surface;
use macroquad::color::{Color, BLACK, GOLD, GRAY, RED, WHITE};
use macroquad::math::Vec2;

const HUD_TEXT_SIZE: f32 = 20.0;
const TITLE_TEXT_SIZE: f32 = 32.0;
const BODY_TEXT_SIZE: f32 = 24.0;

/// Health, score and room in the top-left corner, plus the status line.
pub fn draw_hud(surface: &mut dyn Surface, player: &Player, room: RoomId, status: Option<&str>) {
    surface.draw_text(
        &format!("HP: {}", player.health()),
        Vec2::new(10.0, 20.0),
        HUD_TEXT_SIZE,
        RED,
    );
    surface.draw_text(
        &format!("Score: {}", player.score()),
        Vec2::new(10.0, 40.0),
        HUD_TEXT_SIZE,
        GOLD,
    );
    surface.draw_text(
        &format!("Room: {}", room),
        Vec2::new(10.0, 60.0),
        HUD_TEXT_SIZE,
        WHITE,
    );
    if player.god_mode {
        surface.draw_text("GOD MODE", Vec2::new(10.0, 80.0), HUD_TEXT_SIZE, GOLD);
    }
    if let Some(status) = status {
        surface.draw_text(status, Vec2::new(10.0, 100.0), HUD_TEXT_SIZE, WHITE);
    }
}

pub fn draw_main_menu(surface: &mut dyn Surface) {
    surface.draw_text("TILECRAWL", Vec2::new(200.0, 150.0), TITLE_TEXT_SIZE, GOLD);
    surface.draw_text("Press ENTER to Start", Vec2::new(220.0, 200.0), BODY_TEXT_SIZE, WHITE);
    surface.draw_text(
        "WASD to Move | F5 Save | F9 Load",
        Vec2::new(180.0, 250.0),
        BODY_TEXT_SIZE,
        GRAY,
    );
}

pub fn draw_paused(surface: &mut dyn Surface) {
    surface.draw_text("PAUSED", Vec2::new(300.0, 180.0), TITLE_TEXT_SIZE, WHITE);
    surface.draw_text("Press P to Resume", Vec2::new(250.0, 220.0), BODY_TEXT_SIZE, GRAY);
}

pub fn draw_game_over(surface: &mut dyn Surface, score: u32) {
    surface.draw_text("GAME OVER", Vec2::new(280.0, 180.0), TITLE_TEXT_SIZE, RED);
    surface.draw_text(
        &format!("Final Score: {}", score),
        Vec2::new(260.0, 220.0),
        BODY_TEXT_SIZE,
        WHITE,
    );
    surface.draw_text("Press R to Restart", Vec2::new(250.0, 260.0), BODY_TEXT_SIZE, GRAY);
}

pub fn draw_victory(surface: &mut dyn Surface, score: u32) {
    surface.draw_text("VICTORY!", Vec2::new(300.0, 150.0), TITLE_TEXT_SIZE, GOLD);
    surface.draw_text(
        "You found the Treasure!",
        Vec2::new(200.0, 200.0),
        BODY_TEXT_SIZE,
        WHITE,
    );
    surface.draw_text(
        &format!("Final Score: {}", score),
        Vec2::new(260.0, 250.0),
        BODY_TEXT_SIZE,
        WHITE,
    );
    surface.draw_text("Press R to Restart", Vec2::new(260.0, 300.0), BODY_TEXT_SIZE, GRAY);
}

/// Black overlay at `progress` opacity.
pub fn draw_fade(surface: &mut dyn Surface, progress: f32) {
    if progress <= 0.0 {
        return;
    }
    surface.fill_screen(Color::new(BLACK.r, BLACK.g, BLACK.b, progress.min(1.0)));
}
