//! # Room Transitions
//!
//! Exit detection at the map edges and the fade state machine that swaps rooms.
//!
//! A transition fades to black, swaps the current room exactly once at full black and
//! fades back in. Gameplay is suspended for the whole fade.

use crate::config::DEFAULT_FADE_RATE;
use crate::game::{Bounds, Direction, DungeonGraph, RoomId, Tilemap};
use log::debug;
use macroquad::math::Vec2;

/// Rounding error allowed per accumulated fade step before progress snaps to 0 or 1.
pub const FADE_STEP_TOLERANCE: f32 = 2.0 * f32::EPSILON;

/// Distance from a map edge, in pixels, the player must cross to leave.
pub const DEFAULT_EDGE_MARGIN: i32 = 16;

/// Distance from the entry edge at which the player appears in the new room.
pub const DEFAULT_SPAWN_INSET: f32 = 32.0;

/// Player sprite footprint subtracted when spawning against the far edge.
const SPAWN_FOOTPRINT: f32 = 16.0;

/// Phase of the fade machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    #[default]
    Idle,
    FadingOut,
    FadingIn,
}

/// Where an exit leads and where the player lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomExit {
    pub direction: Direction,
    pub target: RoomId,
    pub spawn: Vec2,
}

/// Fade-out, switch, fade-in.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomTransition {
    phase: TransitionPhase,
    progress: f32,
    /// Steps taken in the current phase
    steps: u32,
    fade_rate: f32,
    target: RoomId,
    spawn: Vec2,
}

impl Default for RoomTransition {
    fn default() -> Self {
        Self::new(DEFAULT_FADE_RATE)
    }
}

impl RoomTransition {
    /// Creates an idle machine. Non-positive rates fall back to the default.
    pub fn new(fade_rate: f32) -> Self {
        let fade_rate = if fade_rate > 0.0 {
            fade_rate
        } else {
            DEFAULT_FADE_RATE
        };
        Self {
            phase: TransitionPhase::Idle,
            progress: 0.0,
            steps: 0,
            fade_rate,
            target: 0,
            spawn: Vec2::ZERO,
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Opacity of the fade overlay, from 0 to 1.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn fade_rate(&self) -> f32 {
        self.fade_rate
    }

    pub fn is_fading(&self) -> bool {
        self.phase != TransitionPhase::Idle
    }

    pub fn is_fading_out(&self) -> bool {
        self.phase == TransitionPhase::FadingOut
    }

    /// Starts fading toward `target`. Ignored unless idle.
    ///
    /// Returns true if the fade started.
    pub fn begin(&mut self, target: RoomId, spawn: Vec2) -> bool {
        if self.phase != TransitionPhase::Idle {
            return false;
        }
        debug!("Fading out toward room {}", target);
        self.phase = TransitionPhase::FadingOut;
        self.progress = 0.0;
        self.steps = 0;
        self.target = target;
        self.spawn = spawn;
        true
    }

    /// Advances the fade by one frame.
    ///
    /// Returns the room switch on the single frame the fade-out reaches full black.
    ///
    /// # Examples
    ///
    /// ```
    /// use macroquad::math::Vec2;
    /// use tilecrawl::RoomTransition;
    ///
    /// let mut fade = RoomTransition::new(2.0);
    /// fade.begin(2, Vec2::new(32.0, 80.0));
    /// assert_eq!(fade.advance(0.25), None);
    /// assert_eq!(fade.advance(0.25), Some((2, Vec2::new(32.0, 80.0))));
    /// assert!(fade.is_fading());
    /// ```
    pub fn advance(&mut self, dt: f32) -> Option<(RoomId, Vec2)> {
        if self.phase == TransitionPhase::Idle {
            return None;
        }
        let step = self.fade_rate * dt;
        self.steps += 1;
        // Only float drift from summing the steps is forgiven.
        let tolerance = self.steps as f32 * FADE_STEP_TOLERANCE;
        match self.phase {
            TransitionPhase::Idle => None,
            TransitionPhase::FadingOut => {
                self.progress += step;
                if self.progress >= 1.0 - tolerance {
                    self.progress = 1.0;
                    self.steps = 0;
                    self.phase = TransitionPhase::FadingIn;
                    Some((self.target, self.spawn))
                } else {
                    None
                }
            }
            TransitionPhase::FadingIn => {
                self.progress -= step;
                if self.progress <= tolerance {
                    self.progress = 0.0;
                    self.steps = 0;
                    self.phase = TransitionPhase::Idle;
                }
                None
            }
        }
    }

    /// Drops any fade in progress.
    pub fn reset(&mut self) {
        self.phase = TransitionPhase::Idle;
        self.progress = 0.0;
        self.steps = 0;
    }
}

/// Returns true if `bounds` lies past `margin` pixels from the edge of `tilemap` in
/// `direction`.
pub fn is_past_edge(bounds: Bounds, tilemap: &Tilemap, direction: Direction, margin: i32) -> bool {
    match direction {
        Direction::East => bounds.right() > tilemap.pixel_width() - margin,
        Direction::West => bounds.left() < margin,
        Direction::North => bounds.top() < margin,
        Direction::South => bounds.bottom() > tilemap.pixel_height() - margin,
    }
}

/// Where a player at `position` appears after leaving through `direction` into a room
/// laid out as `target`.
///
/// The player lands `inset` pixels inside the edge opposite the exit and keeps the
/// coordinate along that edge.
pub fn spawn_point(direction: Direction, position: Vec2, target: &Tilemap, inset: f32) -> Vec2 {
    let far_x = target.pixel_width() as f32 - inset - SPAWN_FOOTPRINT;
    let far_y = target.pixel_height() as f32 - inset - SPAWN_FOOTPRINT;
    match direction {
        Direction::East => Vec2::new(inset, position.y),
        Direction::West => Vec2::new(far_x, position.y),
        Direction::North => Vec2::new(position.x, far_y),
        Direction::South => Vec2::new(position.x, inset),
    }
}

/// Finds the first exit the player is standing in, checking East, West, North, South.
///
/// An exit needs the player past the edge margin, a door under the center of their
/// bounds and a registered neighbor in that direction.
pub fn detect_exit(
    dungeon: &DungeonGraph,
    bounds: Bounds,
    position: Vec2,
    edge_margin: i32,
    spawn_inset: f32,
) -> Option<RoomExit> {
    let room = dungeon.current_room();
    let tilemap = room.tilemap();
    let center = bounds.center();

    Direction::EXIT_ORDER.into_iter().find_map(|direction| {
        if !is_past_edge(bounds, tilemap, direction, edge_margin)
            || !tilemap.is_exit_at(center.x, center.y, direction)
        {
            return None;
        }
        let target = room.neighbor(direction)?;
        let next = dungeon.room(target)?;
        Some(RoomExit {
            direction,
            target,
            spawn: spawn_point(direction, position, next.tilemap(), spawn_inset),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{DoorPolicy, Player, Room, TileGrid, DOOR_EAST};

    fn open_map(columns: usize, rows: usize) -> Tilemap {
        Tilemap::new(TileGrid::from_rows(vec![vec![-1; columns]; rows]).unwrap(), 16, 16)
    }

    fn linked_dungeon() -> DungeonGraph {
        let mut a = Room::new(1, open_map(20, 15));
        a.connect(Direction::East, 2);
        let mut b = Room::new(2, open_map(10, 8));
        b.connect(Direction::West, 1);
        let mut dungeon = DungeonGraph::new(a);
        dungeon.add_room(b);
        dungeon
    }

    #[test]
    fn test_frames_spent_fading() {
        let mut fade = RoomTransition::new(2.0);
        assert!(fade.begin(2, Vec2::ZERO));

        let mut frames = 0;
        let mut switches = Vec::new();
        while fade.is_fading() {
            frames += 1;
            if fade.advance(0.125).is_some() {
                switches.push(frames);
            }
        }
        assert_eq!(frames, 8);
        assert_eq!(switches, vec![4]);
        assert_eq!(fade.progress(), 0.0);
    }

    #[test]
    fn test_frame_count_with_uneven_step() {
        // 0.3 per frame: 4 frames up, 4 frames down
        let mut fade = RoomTransition::new(3.0);
        fade.begin(2, Vec2::ZERO);
        let mut frames = 0;
        while fade.is_fading() {
            fade.advance(0.1);
            frames += 1;
        }
        assert_eq!(frames, 8);
    }

    #[test]
    fn test_sixty_fps_snaps_to_full_black() {
        let mut fade = RoomTransition::new(2.0);
        fade.begin(2, Vec2::ZERO);
        let mut frames = 0;
        let mut switched = 0;
        while fade.is_fading() {
            if fade.advance(1.0 / 60.0).is_some() {
                switched += 1;
            }
            frames += 1;
        }
        assert_eq!(switched, 1);
        assert_eq!(frames, 60);
    }

    #[test]
    fn test_step_just_short_of_full_takes_an_extra_frame() {
        // 0.99995 per frame never reaches 1.0 in one step
        let mut fade = RoomTransition::new(1.0);
        fade.begin(2, Vec2::ZERO);
        assert_eq!(fade.advance(0.99995), None);
        assert!(fade.is_fading_out());
        assert_eq!(fade.advance(0.99995), Some((2, Vec2::ZERO)));

        assert_eq!(fade.advance(0.99995), None);
        assert!(fade.is_fading());
        fade.advance(0.99995);
        assert!(!fade.is_fading());
    }

    #[test]
    fn test_begin_ignored_while_fading() {
        let mut fade = RoomTransition::default();
        fade.begin(2, Vec2::ZERO);
        assert!(!fade.begin(3, Vec2::ONE));
        fade.advance(0.1);
        assert!(fade.is_fading_out());
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut fade = RoomTransition::default();
        fade.begin(2, Vec2::ZERO);
        fade.advance(0.1);
        fade.reset();
        assert_eq!(fade.phase(), TransitionPhase::Idle);
        assert_eq!(fade.progress(), 0.0);
        assert_eq!(fade.advance(0.1), None);
    }

    #[test]
    fn test_spawn_points_mirror_exit() {
        let target = open_map(20, 15); // 320 x 240
        let pos = Vec2::new(100.0, 90.0);
        assert_eq!(spawn_point(Direction::East, pos, &target, 32.0), Vec2::new(32.0, 90.0));
        assert_eq!(spawn_point(Direction::West, pos, &target, 32.0), Vec2::new(272.0, 90.0));
        assert_eq!(spawn_point(Direction::North, pos, &target, 32.0), Vec2::new(100.0, 192.0));
        assert_eq!(spawn_point(Direction::South, pos, &target, 32.0), Vec2::new(100.0, 32.0));
    }

    #[test]
    fn test_detect_east_exit() {
        let dungeon = linked_dungeon();
        // Bounds right edge sits on the map edge at x = 320
        let position = Vec2::new(320.0 - 24.0, 100.0);
        let bounds = Player::bounds_at(position);
        let exit = detect_exit(&dungeon, bounds, position, 16, 32.0).unwrap();
        assert_eq!(exit.direction, Direction::East);
        assert_eq!(exit.target, 2);
        assert_eq!(exit.spawn, Vec2::new(32.0, 100.0));
    }

    #[test]
    fn test_margin_is_strict() {
        let dungeon = linked_dungeon();
        // right == 320 - 16 is not past the margin
        let position = Vec2::new(320.0 - 16.0 - 24.0, 100.0);
        let bounds = Player::bounds_at(position);
        assert_eq!(bounds.right(), 304);
        assert!(detect_exit(&dungeon, bounds, position, 16, 32.0).is_none());
    }

    #[test]
    fn test_west_edge_without_neighbor_registered_is_ignored() {
        let dungeon = linked_dungeon();
        let position = Vec2::new(-4.0, 100.0);
        let bounds = Player::bounds_at(position);
        assert!(bounds.left() < 16);
        assert!(detect_exit(&dungeon, bounds, position, 16, 32.0).is_none());
    }

    #[test]
    fn test_neighbor_missing_from_registry_is_ignored() {
        let mut a = Room::new(1, open_map(20, 15));
        a.connect(Direction::East, 9);
        let dungeon = DungeonGraph::new(a);
        let position = Vec2::new(296.0, 100.0);
        assert!(detect_exit(&dungeon, Player::bounds_at(position), position, 16, 32.0).is_none());
    }

    #[test]
    fn test_reserved_door_tiles() {
        let mut rows = vec![vec![12; 20]; 15];
        for row in rows.iter_mut() {
            row[19] = DOOR_EAST;
        }
        let map = Tilemap::new(TileGrid::from_rows(rows).unwrap(), 16, 16)
            .with_door_policy(DoorPolicy::ReservedTiles);
        let mut a = Room::new(1, map);
        a.connect(Direction::East, 2);
        let mut dungeon = DungeonGraph::new(a);
        dungeon.add_room(Room::new(2, open_map(20, 15)));

        let position = Vec2::new(296.0, 100.0);
        let exit = detect_exit(&dungeon, Player::bounds_at(position), position, 16, 32.0);
        assert_eq!(exit.map(|e| e.target), Some(2));
    }
}
