//! # Game Session
//!
//! The outer state machine and the per-frame update that ties the simulation together.
//!
//! A [`GameSession`] owns the dungeon, the player, the fade transition and the camera.
//! The window loop feeds it one [`FrameInput`] per frame and asks it to draw.

use crate::config::STATUS_MESSAGE_SECONDS;
use crate::game::{
    detect_exit, AnimationLibrary, Camera, DungeonGraph, Entity, GameSettings, Player, RoomId,
    RoomTransition, SaveData, SaveStore,
};
use crate::input::{FrameInput, InputAction};
use crate::rendering::{
    draw_fade, draw_game_over, draw_hud, draw_main_menu, draw_paused, draw_victory, Surface,
};
use crate::{TilecrawlError, TilecrawlResult};
use log::{info, warn};
use macroquad::math::Vec2;

/// Top-level screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    MainMenu,
    Playing,
    Paused,
    GameOver,
    Victory,
}

/// A line of feedback shown on the HUD for a few seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    text: String,
    remaining: f32,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            remaining: STATUS_MESSAGE_SECONDS,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Counts down; returns false once the message has expired.
    fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining > 0.0
    }
}

/// One play-through of a dungeon.
pub struct GameSession {
    state: GameState,
    dungeon: DungeonGraph,
    /// Room the session starts and restarts in
    start_room: RoomId,
    player: Player,
    transition: RoomTransition,
    camera: Camera,
    settings: GameSettings,
    animations: AnimationLibrary,
    store: Box<dyn SaveStore>,
    status: Option<StatusMessage>,
}

impl GameSession {
    /// Builds a session on the main menu, in the configured start room.
    ///
    /// Without a configured room the dungeon's own start room is used. Fails if the
    /// start room is not part of `dungeon`.
    pub fn new(
        mut dungeon: DungeonGraph,
        settings: GameSettings,
        animations: AnimationLibrary,
        store: Box<dyn SaveStore>,
    ) -> TilecrawlResult<Self> {
        let start_room = settings.start_room.unwrap_or_else(|| dungeon.start_id());
        if !dungeon.change_room(start_room) {
            return Err(TilecrawlError::InvalidState(format!(
                "start room {} is not in the dungeon",
                start_room
            )));
        }

        let player = Self::spawn_player(&settings);
        let mut camera = Camera::new(settings.viewport_size(), settings.camera_zoom);
        camera.follow(player.position());

        Ok(Self {
            state: GameState::MainMenu,
            dungeon,
            start_room,
            player,
            transition: RoomTransition::new(settings.fade_rate),
            camera,
            settings,
            animations,
            store,
            status: None,
        })
    }

    fn spawn_player(settings: &GameSettings) -> Player {
        Player::new(settings.player_spawn())
            .with_speed(settings.player_speed)
            .with_invincibility_duration(settings.invincibility)
            .with_god_mode(settings.god_mode)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn dungeon(&self) -> &DungeonGraph {
        &self.dungeon
    }

    pub fn dungeon_mut(&mut self) -> &mut DungeonGraph {
        &mut self.dungeon
    }

    pub fn transition(&self) -> &RoomTransition {
        &self.transition
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Current status line, if one is showing.
    pub fn status(&self) -> Option<&str> {
        self.status.as_ref().map(StatusMessage::text)
    }

    fn set_state(&mut self, state: GameState) {
        if state != self.state {
            info!("Game state {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    fn show_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::new(text));
    }

    /// Advances the session by one frame.
    pub fn update(&mut self, input: &FrameInput, dt: f32) {
        if let Some(status) = self.status.as_mut() {
            if !status.tick(dt) {
                self.status = None;
            }
        }

        match self.state {
            GameState::MainMenu => {
                if input.was_pressed(InputAction::Confirm) {
                    self.set_state(GameState::Playing);
                }
            }
            GameState::Paused => {
                if input.was_pressed(InputAction::Pause) {
                    self.set_state(GameState::Playing);
                }
            }
            GameState::GameOver | GameState::Victory => {
                if input.was_pressed(InputAction::Restart) {
                    self.restart();
                }
            }
            GameState::Playing => {
                if input.was_pressed(InputAction::Pause) {
                    self.set_state(GameState::Paused);
                    return;
                }
                self.update_playing(input, dt);
            }
        }
    }

    fn update_playing(&mut self, input: &FrameInput, dt: f32) {
        if self.transition.is_fading() {
            if let Some((target, spawn)) = self.transition.advance(dt) {
                if self.dungeon.change_room(target) {
                    self.player.set_position(spawn);
                }
            }
            self.camera.follow(self.player.position());
            return;
        }

        if input.was_pressed(InputAction::ToggleGodMode) {
            self.player.god_mode = !self.player.god_mode;
            let label = if self.player.god_mode { "on" } else { "off" };
            info!("God mode {}", label);
            self.show_status(format!("God mode {}", label));
        }
        if input.was_pressed(InputAction::Save) {
            self.save_game();
        }
        if input.was_pressed(InputAction::Load) {
            self.load_game();
            // A load moves the player; let the next frame start from there.
            self.camera.follow(self.player.position());
            return;
        }

        let previous = self.player.position();
        self.player
            .update(input.movement, dt, self.dungeon.current_room().tilemap());
        if self
            .dungeon
            .current_room()
            .is_colliding_with_decor(self.player.bounds())
        {
            self.player.set_position(previous);
        }

        let mut found_treasure = false;
        self.dungeon
            .current_room_mut()
            .update(dt, &mut self.player, |item| {
                if item.is_victory_item() {
                    found_treasure = true;
                }
            });

        if found_treasure {
            info!("Treasure found with score {}", self.player.score());
            self.set_state(GameState::Victory);
        } else if !self.player.is_alive() {
            info!("Player died with score {}", self.player.score());
            self.set_state(GameState::GameOver);
        } else if let Some(exit) = detect_exit(
            &self.dungeon,
            self.player.bounds(),
            self.player.position(),
            self.settings.edge_margin,
            self.settings.spawn_inset,
        ) {
            info!("Leaving room {} {:?}", self.dungeon.current_id(), exit.direction);
            self.transition.begin(exit.target, exit.spawn);
        }

        self.camera.follow(self.player.position());
    }

    /// Puts a fresh player at the spawn in the start room and cancels any fade.
    pub fn restart(&mut self) {
        info!("Restarting");
        self.player = Self::spawn_player(&self.settings);
        self.dungeon.change_room(self.start_room);
        self.transition.reset();
        self.camera.follow(self.player.position());
        self.set_state(GameState::Playing);
    }

    /// Writes the current room, position and score to the save slot.
    pub fn save_game(&mut self) {
        let position = self.player.position();
        let data = SaveData {
            room_id: self.dungeon.current_id(),
            x: position.x,
            y: position.y,
            score: self.player.score(),
        };
        match self.store.save(&data) {
            Ok(()) => {
                info!("Saved in room {} at {:?}", data.room_id, position);
                self.show_status("Game Saved!");
            }
            Err(e) => {
                warn!("Save failed: {}", e);
                self.show_status(format!("Save failed: {}", e));
            }
        }
    }

    /// Restores the save slot. Missing or unusable saves leave the game untouched.
    pub fn load_game(&mut self) {
        match self.store.load() {
            Ok(Some(data)) => {
                if self.dungeon.change_room(data.room_id) {
                    self.player
                        .restore(Vec2::new(data.x, data.y), data.score);
                    self.transition.reset();
                    info!("Loaded save in room {}", data.room_id);
                    self.show_status("Game Loaded!");
                } else {
                    warn!("Save refers to unknown room {}", data.room_id);
                    self.show_status(format!("Save refers to unknown room {}", data.room_id));
                }
            }
            Ok(None) => self.show_status("No saved game"),
            Err(e) => {
                warn!("Load failed: {}", e);
                self.show_status(format!("Load failed: {}", e));
            }
        }
    }

    /// Draws the world, then the screen-space overlays.
    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.begin_world(&self.camera);
        self.dungeon
            .current_room()
            .draw(surface, &self.animations);
        self.player.draw(surface, &self.animations.player);

        surface.begin_screen();
        match self.state {
            GameState::MainMenu => draw_main_menu(surface),
            GameState::GameOver => draw_game_over(surface, self.player.score()),
            GameState::Victory => draw_victory(surface, self.player.score()),
            GameState::Playing | GameState::Paused => {
                draw_hud(surface, &self.player, self.dungeon.current_id(), self.status());
                if self.state == GameState::Paused {
                    draw_paused(surface);
                }
            }
        }
        draw_fade(surface, self.transition.progress());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{
        Bounds, DecorObject, Direction, Enemy, EnemyBehavior, EnemyKind, Item, ItemKind,
        MemorySaveStore, Room, TileGrid, Tilemap,
    };
    use crate::rendering::{DrawCommand, RecordingSurface};

    fn open_room(id: u32) -> Room {
        let grid = TileGrid::from_rows(vec![vec![-1; 20]; 15]).unwrap();
        Room::new(id, Tilemap::new(grid, 16, 16))
    }

    fn two_rooms() -> DungeonGraph {
        let mut a = open_room(1);
        a.connect(Direction::East, 2);
        let mut b = open_room(2);
        b.connect(Direction::West, 1);
        let mut dungeon = DungeonGraph::new(a);
        dungeon.add_room(b);
        dungeon
    }

    fn session_with(dungeon: DungeonGraph, store: Box<dyn SaveStore>) -> GameSession {
        GameSession::new(
            dungeon,
            GameSettings::for_testing(),
            AnimationLibrary::standard().unwrap(),
            store,
        )
        .unwrap()
    }

    fn playing(dungeon: DungeonGraph) -> GameSession {
        let mut session = session_with(dungeon, Box::new(MemorySaveStore::new()));
        session.update(&FrameInput::pressed(InputAction::Confirm), 0.016);
        assert_eq!(session.state(), GameState::Playing);
        session
    }

    struct BrokenStore;

    impl SaveStore for BrokenStore {
        fn save(&mut self, _data: &SaveData) -> TilecrawlResult<()> {
            Err(TilecrawlError::Persistence("disk full".to_string()))
        }

        fn load(&self) -> TilecrawlResult<Option<SaveData>> {
            Err(TilecrawlError::Persistence("disk on fire".to_string()))
        }
    }

    #[test]
    fn test_unknown_start_room_is_rejected() {
        let settings = GameSettings {
            start_room: Some(9),
            ..GameSettings::for_testing()
        };
        let result = GameSession::new(
            two_rooms(),
            settings,
            AnimationLibrary::standard().unwrap(),
            Box::new(MemorySaveStore::new()),
        );
        assert!(matches!(result, Err(TilecrawlError::InvalidState(_))));
    }

    #[test]
    fn test_menu_waits_for_confirm() {
        let mut session = session_with(two_rooms(), Box::new(MemorySaveStore::new()));
        session.update(&FrameInput::moving(Vec2::X), 0.5);
        assert_eq!(session.state(), GameState::MainMenu);
        assert_eq!(session.player().position(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut session = playing(two_rooms());
        session.update(&FrameInput::pressed(InputAction::Pause), 0.016);
        assert_eq!(session.state(), GameState::Paused);

        session.update(&FrameInput::moving(Vec2::X), 0.5);
        assert_eq!(session.player().position(), Vec2::new(100.0, 100.0));

        session.update(&FrameInput::pressed(InputAction::Pause), 0.016);
        assert_eq!(session.state(), GameState::Playing);
    }

    #[test]
    fn test_chest_pickup_is_victory() {
        let mut dungeon = two_rooms();
        dungeon.current_room_mut().add_item(Item::new(
            1,
            "Treasure Chest",
            ItemKind::Chest,
            10,
            Vec2::new(108.0, 116.0),
        ));
        let mut session = playing(dungeon);
        session.update(&FrameInput::idle(), 0.016);
        assert_eq!(session.state(), GameState::Victory);
        assert_eq!(session.player().score(), 10);
    }

    #[test]
    fn test_death_then_restart() {
        let mut dungeon = two_rooms();
        dungeon.current_room_mut().add_enemy(
            Enemy::new(0, EnemyKind::Ghost, Vec2::new(108.0, 116.0), EnemyBehavior::chase())
                .with_damage(200),
        );
        let mut session = playing(dungeon);
        session.update(&FrameInput::idle(), 0.016);
        assert_eq!(session.state(), GameState::GameOver);
        assert_eq!(session.player().health(), 0);

        // Stays dead until restarted
        session.update(&FrameInput::pressed(InputAction::Confirm), 0.016);
        assert_eq!(session.state(), GameState::GameOver);

        session.update(&FrameInput::pressed(InputAction::Restart), 0.016);
        assert_eq!(session.state(), GameState::Playing);
        assert_eq!(session.player().health(), 100);
        assert_eq!(session.player().position(), Vec2::new(100.0, 100.0));
        assert_eq!(session.dungeon().current_id(), 1);
    }

    #[test]
    fn test_restart_returns_to_start_room() {
        let mut session = playing(two_rooms());
        session.dungeon_mut().change_room(2);
        session.restart();
        assert_eq!(session.dungeon().current_id(), 1);
        assert!(!session.transition().is_fading());
    }

    #[test]
    fn test_configured_start_room_is_used_for_restart() {
        let settings = GameSettings {
            start_room: Some(2),
            ..GameSettings::for_testing()
        };
        let mut session = GameSession::new(
            two_rooms(),
            settings,
            AnimationLibrary::standard().unwrap(),
            Box::new(MemorySaveStore::new()),
        )
        .unwrap();
        assert_eq!(session.dungeon().current_id(), 2);

        session.dungeon_mut().change_room(1);
        session.restart();
        assert_eq!(session.dungeon().current_id(), 2);
    }

    #[test]
    fn test_unset_start_room_uses_dungeon_start() {
        let mut dungeon = DungeonGraph::new(open_room(2));
        dungeon.add_room(open_room(1));
        let mut session = session_with(dungeon, Box::new(MemorySaveStore::new()));
        assert_eq!(session.dungeon().current_id(), 2);

        session.dungeon_mut().change_room(1);
        session.restart();
        assert_eq!(session.dungeon().current_id(), 2);
    }

    /// Barrel 16x16 whose left edge sits 6 px right of the player's feet box.
    fn room_with_barrel() -> DungeonGraph {
        let mut dungeon = two_rooms();
        dungeon.current_room_mut().add_decor(DecorObject::new(
            Vec2::new(130.0, 116.0),
            "decor/barrel",
            Bounds::new(0, 0, 16, 16),
        ));
        dungeon
    }

    #[test]
    fn test_decor_blocks_movement() {
        let mut session = playing(room_with_barrel());
        session.update(&FrameInput::moving(Vec2::X), 0.1);
        assert_eq!(session.player().position(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_decor_allows_walking_away() {
        let mut session = playing(room_with_barrel());
        session.update(&FrameInput::moving(-Vec2::X), 0.1);
        assert_eq!(session.player().position(), Vec2::new(90.0, 100.0));
    }

    #[test]
    fn test_exit_fades_then_switches_room() {
        let mut session = playing(two_rooms());
        session.player_mut().set_position(Vec2::new(296.0, 100.0));

        session.update(&FrameInput::idle(), 0.125);
        assert!(session.transition().is_fading_out());
        assert_eq!(session.dungeon().current_id(), 1);

        // Movement is ignored while fading
        session.update(&FrameInput::moving(Vec2::Y), 0.125);
        assert_eq!(session.player().position(), Vec2::new(296.0, 100.0));

        // 4.0 * 0.125 = 0.5 per frame: the second fading frame hits full black
        session.update(&FrameInput::idle(), 0.125);
        assert_eq!(session.dungeon().current_id(), 2);
        assert_eq!(session.player().position(), Vec2::new(32.0, 100.0));

        session.update(&FrameInput::idle(), 0.125);
        session.update(&FrameInput::idle(), 0.125);
        assert!(!session.transition().is_fading());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let mut session = playing(two_rooms());
        session.player_mut().add_score(40);
        session.player_mut().set_position(Vec2::new(60.0, 70.0));
        session.update(&FrameInput::pressed(InputAction::Save), 0.016);
        assert_eq!(session.status(), Some("Game Saved!"));

        session.dungeon_mut().change_room(2);
        session.player_mut().set_position(Vec2::new(150.0, 150.0));
        session.update(&FrameInput::pressed(InputAction::Load), 0.016);

        assert_eq!(session.dungeon().current_id(), 1);
        assert_eq!(session.player().position(), Vec2::new(60.0, 70.0));
        assert_eq!(session.player().score(), 40);
        assert_eq!(session.status(), Some("Game Loaded!"));
    }

    #[test]
    fn test_load_of_unknown_room_is_ignored() {
        let store = MemorySaveStore::with_data(SaveData {
            room_id: 77,
            x: 1.0,
            y: 2.0,
            score: 5,
        });
        let mut session = session_with(two_rooms(), Box::new(store));
        session.update(&FrameInput::pressed(InputAction::Confirm), 0.016);
        session.update(&FrameInput::pressed(InputAction::Load), 0.016);

        assert_eq!(session.dungeon().current_id(), 1);
        assert_eq!(session.player().score(), 0);
        assert!(session.status().unwrap().contains("unknown room 77"));
    }

    #[test]
    fn test_store_failures_become_status_messages() {
        let mut session = session_with(two_rooms(), Box::new(BrokenStore));
        session.update(&FrameInput::pressed(InputAction::Confirm), 0.016);

        session.update(&FrameInput::pressed(InputAction::Save), 0.016);
        assert!(session.status().unwrap().starts_with("Save failed"));
        session.update(&FrameInput::pressed(InputAction::Load), 0.016);
        assert!(session.status().unwrap().starts_with("Load failed"));
        assert_eq!(session.state(), GameState::Playing);
    }

    #[test]
    fn test_status_message_expires() {
        let mut session = playing(two_rooms());
        session.update(&FrameInput::pressed(InputAction::Save), 0.016);
        session.update(&FrameInput::idle(), 2.0);
        assert!(session.status().is_some());
        session.update(&FrameInput::idle(), 1.5);
        assert!(session.status().is_none());
    }

    #[test]
    fn test_god_mode_toggle() {
        let mut session = playing(two_rooms());
        session.update(&FrameInput::pressed(InputAction::ToggleGodMode), 0.016);
        assert!(session.player().god_mode);
        session.update(&FrameInput::pressed(InputAction::ToggleGodMode), 0.016);
        assert!(!session.player().god_mode);
    }

    #[test]
    fn test_draw_order() {
        let session = playing(two_rooms());
        let mut surface = RecordingSurface::new();
        session.draw(&mut surface);

        assert!(matches!(surface.commands[0], DrawCommand::BeginWorld { .. }));
        let screen = surface
            .commands
            .iter()
            .position(|c| *c == DrawCommand::BeginScreen)
            .unwrap();
        let player_sprite = surface
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Sprite { sheet, .. } if sheet.starts_with("player/")))
            .unwrap();
        assert!(player_sprite < screen);
        assert!(surface.has_text("HP: 100"));
    }

    #[test]
    fn test_menu_draws_title() {
        let session = session_with(two_rooms(), Box::new(MemorySaveStore::new()));
        let mut surface = RecordingSurface::new();
        session.draw(&mut surface);
        assert!(surface.has_text("Press ENTER to Start"));
        assert!(!surface.has_text("HP:"));
    }
}
