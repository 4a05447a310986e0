//! Game state and run lifecycle
//!
//! `GameState` is the single simulation context: it owns the RNG, the player,
//! the world and both spawn counters. Nothing lives in globals.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::CollisionCause;
use super::player::Player;
use super::spawn::SpawnScheduler;
use super::world::{Obstacle, Pipe, World};
use crate::error::{GameError, TuningError};
use crate::tuning::Tuning;

/// Run state machine: Start -> Playing -> (Paused <-> Playing) -> GameOver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start action
    Start,
    Playing,
    Paused,
    /// Terminal until the next reset
    GameOver,
}

/// Things that happened during a tick or command, for audio and UI glue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Jumped,
    Dived,
    Scored { score: u32 },
    /// Score just reached the pause threshold
    PauseUnlocked,
    Paused,
    Resumed,
    Collided { cause: CollisionCause },
}

/// Read-only view handed to renderers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub can_pause: bool,
    pub player: Player,
    pub pipes: Vec<Pipe>,
    pub obstacles: Vec<Obstacle>,
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) tuning: Tuning,
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) player: Player,
    pub(crate) world: World,
    pub(crate) scheduler: SpawnScheduler,
    pub(crate) score: u32,
    pub(crate) phase: GamePhase,
    /// Set on resume so the first resumed tick adds no gravity
    pub(crate) skip_gravity: bool,
    assets_ready: bool,
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a game state with custom tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(&tuning),
            world: World::new(),
            scheduler: SpawnScheduler::new(),
            score: 0,
            phase: GamePhase::Start,
            skip_gravity: false,
            assets_ready: false,
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// The asset phase finished; runs may start from now on
    pub fn mark_assets_ready(&mut self) {
        if !self.assets_ready {
            log::info!("Assets ready");
        }
        self.assets_ready = true;
    }

    pub fn assets_ready(&self) -> bool {
        self.assets_ready
    }

    /// Restart the random stream (the next run uses the new seed)
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
    }

    /// Start a fresh run: player, world, both counters and score go back to
    /// their initial values and the phase becomes `Playing`.
    pub fn reset(&mut self) -> Result<(), GameError> {
        if !self.assets_ready {
            return Err(GameError::AssetsNotReady);
        }

        self.player.reset(&self.tuning);
        self.world.clear();
        self.scheduler.reset();
        self.score = 0;
        self.skip_gravity = false;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started);

        log::info!("Run started (seed {})", self.seed);
        Ok(())
    }

    /// Upward impulse; ignored unless playing
    pub fn jump(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.player.jump(self.tuning.jump_velocity);
        self.events.push(GameEvent::Jumped);
        true
    }

    /// Downward impulse; ignored unless playing
    pub fn dive(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.player.dive(self.tuning.dive_velocity);
        self.events.push(GameEvent::Dived);
        true
    }

    /// Whether a pause would be accepted right now
    pub fn can_pause(&self) -> bool {
        self.phase == GamePhase::Playing && self.score >= self.tuning.pause_score
    }

    /// Playing -> Paused (only past the score threshold) or Paused -> Playing.
    ///
    /// Returns whether the phase changed.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing if self.can_pause() => {
                self.phase = GamePhase::Paused;
                self.events.push(GameEvent::Paused);
                true
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                self.skip_gravity = true;
                self.events.push(GameEvent::Resumed);
                true
            }
            _ => false,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.world.pipes
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.world.obstacles
    }

    pub fn scheduler(&self) -> &SpawnScheduler {
        &self.scheduler
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            can_pause: self.can_pause(),
            player: self.player.clone(),
            pipes: self.world.pipes.clone(),
            obstacles: self.world.obstacles.clone(),
        }
    }
}
