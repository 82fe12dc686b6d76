//! Integration tests that build the shipped dungeon and play through it headless.

use macroquad::math::Vec2;
use std::path::PathBuf;
use tilecrawl::{
    AnimationLibrary, Direction, DungeonManifest, Entity, FrameInput, GameSession, GameSettings,
    GameState, InputAction, ItemKind, MemorySaveStore, RecordingSurface, TilecrawlResult,
};

fn maps_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets").join("maps")
}

fn classic_session() -> TilecrawlResult<GameSession> {
    let settings = GameSettings::default();
    let dungeon = DungeonManifest::classic().build(maps_dir(), &settings)?;
    GameSession::new(
        dungeon,
        settings,
        AnimationLibrary::standard()?,
        Box::new(MemorySaveStore::new()),
    )
}

#[test]
fn test_classic_dungeon_builds_from_shipped_maps() -> TilecrawlResult<()> {
    let dungeon = DungeonManifest::classic().build(maps_dir(), &GameSettings::default())?;

    assert_eq!(dungeon.room_ids(), vec![1, 2]);
    assert_eq!(dungeon.current_id(), 1);

    let first = dungeon.current_room();
    assert_eq!(first.neighbor(Direction::East), Some(2));
    assert_eq!(first.items.len(), 3);
    assert!(first.items.iter().all(|item| item.kind() == ItemKind::Coin));
    assert_eq!(first.enemies.len(), 1);

    let second = dungeon.room(2).expect("room 2 is built");
    assert_eq!(second.neighbor(Direction::West), Some(1));
    assert!(second.items.iter().any(|item| item.is_victory_item()));

    // The player spawn is on open floor.
    assert!(!first
        .tilemap()
        .is_colliding(tilecrawl::Player::bounds_at(Vec2::new(100.0, 100.0))));
    Ok(())
}

#[test]
fn test_walk_east_into_second_room() -> TilecrawlResult<()> {
    let mut session = classic_session()?;
    assert_eq!(session.state(), GameState::MainMenu);
    session.update(&FrameInput::pressed(InputAction::Confirm), 1.0 / 60.0);

    let mut frames = 0;
    while session.dungeon().current_id() == 1 && frames < 600 {
        session.update(&FrameInput::moving(Vec2::X), 1.0 / 60.0);
        frames += 1;
    }

    assert_eq!(session.dungeon().current_id(), 2);
    assert_eq!(session.player().position(), Vec2::new(32.0, 100.0));
    assert_eq!(session.state(), GameState::Playing);

    // Let the fade finish, then make sure the frame draws the new room.
    while session.transition().is_fading() {
        session.update(&FrameInput::idle(), 1.0 / 60.0);
    }
    let mut surface = RecordingSurface::new();
    session.draw(&mut surface);
    assert!(surface.has_text("Room: 2"));
    assert!(surface
        .sprite_sheets()
        .iter()
        .any(|sheet| sheet.starts_with("enemies/ghost/")));
    Ok(())
}

#[test]
fn test_reaching_the_chest_wins() -> TilecrawlResult<()> {
    let mut session = classic_session()?;
    session.update(&FrameInput::pressed(InputAction::Confirm), 1.0 / 60.0);
    session.dungeon_mut().change_room(2);

    // Feet box at (150, 106) overlaps the chest at (150, 100).
    session.player_mut().set_position(Vec2::new(142.0, 90.0));
    session.update(&FrameInput::idle(), 1.0 / 60.0);

    assert_eq!(session.state(), GameState::Victory);
    assert_eq!(session.player().score(), 10);

    let mut surface = RecordingSurface::new();
    session.draw(&mut surface);
    assert!(surface.has_text("VICTORY!"));
    assert!(surface.has_text("Final Score: 10"));
    Ok(())
}
