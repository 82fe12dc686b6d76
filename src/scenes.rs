//! # Scene Management System
//!
//! The window loop: poll input, step the session, draw, wait for the next frame.

use crate::{GameSession, InputAction, InputHandler, MacroquadDisplay, TilecrawlResult};
use log::info;
use macroquad::prelude::*;

/// Background behind the world, visible past the map edges.
const BACKGROUND: Color = Color::new(0.39, 0.58, 0.93, 1.0);

/// Drives a [`GameSession`] from the macroquad frame loop.
pub struct SceneManager {
    session: GameSession,
    display: MacroquadDisplay,
    input_handler: InputHandler,
}

impl SceneManager {
    pub fn new(session: GameSession, display: MacroquadDisplay, input_handler: InputHandler) -> Self {
        Self {
            session,
            display,
            input_handler,
        }
    }

    /// Runs until the player quits.
    pub async fn run(&mut self) -> TilecrawlResult<()> {
        loop {
            let input = self.input_handler.poll();
            if input.was_pressed(InputAction::Quit) {
                info!("Player quit the game");
                break;
            }

            self.session
                .camera_mut()
                .set_viewport(vec2(screen_width(), screen_height()));
            self.session.update(&input, get_frame_time());

            clear_background(BACKGROUND);
            self.session.draw(&mut self.display);

            next_frame().await;
        }
        Ok(())
    }
}
