//! # Animation
//!
//! Frame-strip animations keyed by facing and motion.
//!
//! An [`AnimationSet`] maps every `(Facing, Motion)` pair to a clip. It is checked
//! complete when built, so drawing never has to fall back on a missing key.
//! [`AnimationState`] is the per-actor frame counter.

use crate::game::{Bounds, Facing};
use crate::{TilecrawlError, TilecrawlResult};
use std::collections::HashMap;

/// Seconds each animation frame stays on screen.
pub const FRAME_TIME: f32 = 0.15;

/// Frames in an idle cycle.
pub const IDLE_FRAME_COUNT: usize = 4;

/// Frames in a walking cycle.
pub const MOVE_FRAME_COUNT: usize = 6;

/// Whether an actor is walking or standing still.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Motion {
    #[default]
    Idle,
    Moving,
}

impl Motion {
    pub const ALL: [Motion; 2] = [Motion::Idle, Motion::Moving];

    pub fn from_moving(moving: bool) -> Self {
        if moving {
            Motion::Moving
        } else {
            Motion::Idle
        }
    }
}

/// One horizontal strip of frames on a sprite sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub sheet: String,
    pub frames: Vec<Bounds>,
    pub flip_x: bool,
}

impl AnimationClip {
    /// Builds `count` frames of `width`x`height`, laid left to right from the origin.
    pub fn strip(sheet: impl Into<String>, width: i32, height: i32, count: usize) -> Self {
        let frames = (0..count as i32)
            .map(|i| Bounds::new(i * width, 0, width, height))
            .collect();
        Self {
            sheet: sheet.into(),
            frames,
            flip_x: false,
        }
    }

    pub fn flipped(mut self) -> Self {
        self.flip_x = true;
        self
    }

    /// Frame for a counter value, wrapping around the strip.
    pub fn frame(&self, index: usize) -> Bounds {
        self.frames[index % self.frames.len()]
    }
}

/// Complete set of clips for one kind of actor.
#[derive(Debug, Clone)]
pub struct AnimationSet {
    clips: HashMap<(Facing, Motion), AnimationClip>,
}

impl AnimationSet {
    /// Validates that every facing and motion has a clip with at least one frame.
    pub fn new(clips: HashMap<(Facing, Motion), AnimationClip>) -> TilecrawlResult<Self> {
        for facing in Facing::ALL {
            for motion in Motion::ALL {
                match clips.get(&(facing, motion)) {
                    None => {
                        return Err(TilecrawlError::InvalidContent(format!(
                            "missing animation clip for {:?}/{:?}",
                            facing, motion
                        )))
                    }
                    Some(clip) if clip.frames.is_empty() => {
                        return Err(TilecrawlError::InvalidContent(format!(
                            "animation clip {} for {:?}/{:?} has no frames",
                            clip.sheet, facing, motion
                        )))
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(Self { clips })
    }

    /// Standard four-way layout: `down`, `up` and `side` sheets, each with an `_idle`
    /// variant, under `prefix`.
    ///
    /// The side strips face left; facing right mirrors them.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilecrawl::{AnimationSet, Facing, Motion};
    ///
    /// let set = AnimationSet::directional("player", 32, 32, 4, 6).unwrap();
    /// let clip = set.clip(Facing::Right, Motion::Moving);
    /// assert_eq!(clip.sheet, "player/side");
    /// assert!(clip.flip_x);
    /// assert_eq!(clip.frames.len(), 6);
    /// ```
    pub fn directional(
        prefix: &str,
        frame_width: i32,
        frame_height: i32,
        idle_frames: usize,
        move_frames: usize,
    ) -> TilecrawlResult<Self> {
        let mut clips = HashMap::new();
        for facing in Facing::ALL {
            let strip = match facing {
                Facing::Down => "down",
                Facing::Up => "up",
                Facing::Left | Facing::Right => "side",
            };
            for motion in Motion::ALL {
                let (sheet, count) = match motion {
                    Motion::Idle => (format!("{}/{}_idle", prefix, strip), idle_frames),
                    Motion::Moving => (format!("{}/{}", prefix, strip), move_frames),
                };
                let mut clip = AnimationClip::strip(sheet, frame_width, frame_height, count);
                if facing == Facing::Right {
                    clip = clip.flipped();
                }
                clips.insert((facing, motion), clip);
            }
        }
        Self::new(clips)
    }

    pub fn clip(&self, facing: Facing, motion: Motion) -> &AnimationClip {
        // Completeness is checked in `new`.
        &self.clips[&(facing, motion)]
    }

    /// Every sheet name the set refers to, for preloading.
    pub fn sheets(&self) -> Vec<&str> {
        let mut sheets: Vec<&str> = self.clips.values().map(|c| c.sheet.as_str()).collect();
        sheets.sort_unstable();
        sheets.dedup();
        sheets
    }
}

/// Per-actor animation cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    pub facing: Facing,
    pub motion: Motion,
    pub frame: usize,
    timer: f32,
    idle_frames: usize,
    move_frames: usize,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new(IDLE_FRAME_COUNT, MOVE_FRAME_COUNT)
    }
}

impl AnimationState {
    pub fn new(idle_frames: usize, move_frames: usize) -> Self {
        Self {
            facing: Facing::Down,
            motion: Motion::Idle,
            frame: 0,
            timer: 0.0,
            idle_frames: idle_frames.max(1),
            move_frames: move_frames.max(1),
        }
    }

    /// Advances the cycle by `dt` seconds.
    ///
    /// A change between idle and moving restarts the cycle at frame 0. A `None` facing
    /// keeps the current one.
    pub fn advance(&mut self, dt: f32, moving: bool, facing: Option<Facing>) {
        if let Some(facing) = facing {
            self.facing = facing;
        }

        let motion = Motion::from_moving(moving);
        if motion != self.motion {
            self.motion = motion;
            self.frame = 0;
            self.timer = 0.0;
        }

        let frame_count = match self.motion {
            Motion::Idle => self.idle_frames,
            Motion::Moving => self.move_frames,
        };
        self.timer += dt;
        if self.timer >= FRAME_TIME {
            self.timer = 0.0;
            self.frame = (self.frame + 1) % frame_count;
        }
    }

    pub fn is_moving(&self) -> bool {
        self.motion == Motion::Moving
    }
}

/// Animation sets for every actor in the game, built once at startup.
#[derive(Debug, Clone)]
pub struct AnimationLibrary {
    pub player: AnimationSet,
    enemies: HashMap<crate::game::EnemyKind, AnimationSet>,
}

impl AnimationLibrary {
    pub fn new(
        player: AnimationSet,
        enemies: HashMap<crate::game::EnemyKind, AnimationSet>,
    ) -> TilecrawlResult<Self> {
        for kind in crate::game::EnemyKind::ALL {
            if !enemies.contains_key(&kind) {
                return Err(TilecrawlError::InvalidContent(format!(
                    "no animations for enemy kind {:?}",
                    kind
                )));
            }
        }
        Ok(Self { player, enemies })
    }

    /// Shipped layout: 32px player frames, 16px enemy frames.
    pub fn standard() -> TilecrawlResult<Self> {
        let player =
            AnimationSet::directional("player", 32, 32, IDLE_FRAME_COUNT, MOVE_FRAME_COUNT)?;
        let mut enemies = HashMap::new();
        for kind in crate::game::EnemyKind::ALL {
            let prefix = format!("enemies/{}", kind.asset_name());
            enemies.insert(
                kind,
                AnimationSet::directional(&prefix, 16, 16, IDLE_FRAME_COUNT, MOVE_FRAME_COUNT)?,
            );
        }
        Self::new(player, enemies)
    }

    pub fn enemy(&self, kind: crate::game::EnemyKind) -> &AnimationSet {
        &self.enemies[&kind]
    }

    /// Every sheet name in the library.
    pub fn sheets(&self) -> Vec<&str> {
        let mut sheets = self.player.sheets();
        for set in self.enemies.values() {
            sheets.extend(set.sheets());
        }
        sheets.sort_unstable();
        sheets.dedup();
        sheets
    }
}
