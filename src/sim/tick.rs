//! Simulation tick
//!
//! One call advances the run by one frame: kinematics, spawning, scrolling
//! and scoring, then collision.

use serde::Serialize;

use super::autopilot;
use super::collision::{self, CollisionResult};
use super::spawn::obstacle_origin;
use super::state::{GameEvent, GamePhase, GameState};
use super::world::{Obstacle, Pipe};

/// Input commands collected between two ticks
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start a new run (only from Start or GameOver)
    pub start: bool,
    /// Pause toggle
    pub pause: bool,
    pub dive: bool,
    pub jump: bool,
    /// Demo mode - the autopilot decides when to jump
    pub autopilot: bool,
}

/// What the outer loop needs after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickOutcome {
    pub score: u32,
    pub phase: GamePhase,
    /// A collision ended the run on this tick
    pub game_over: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    if input.start && matches!(state.phase, GamePhase::Start | GamePhase::GameOver) {
        if let Err(e) = state.reset() {
            log::warn!("Start ignored: {e}");
        }
    }

    if input.pause {
        state.toggle_pause();
    }

    // Don't tick unless playing
    if state.phase != GamePhase::Playing {
        return outcome(state, false);
    }

    let mut input = input.clone();
    if input.autopilot {
        input.jump |= autopilot::decide(state).jump;
    }
    if input.dive {
        state.dive();
    }
    if input.jump {
        state.jump();
    }

    let gravity = state.tuning.gravity;
    state.player.advance(gravity, &mut state.skip_gravity);

    if state.scheduler.on_frame(state.tuning.spawn_interval) {
        spawn(state);
    }

    let passed = state.world.advance(state.tuning.pipe_speed, state.player.pos.x);
    for _ in passed {
        state.score += 1;
        state.events.push(GameEvent::Scored { score: state.score });
        if state.score == state.tuning.pause_score {
            state.events.push(GameEvent::PauseUnlocked);
        }
    }

    let result = collision::check(
        &state.player.rect(),
        &state.world.pipes,
        &state.world.obstacles,
        state.tuning.screen_height,
    );
    if let CollisionResult::Collided(cause) = result {
        state.player.clamp_to_screen(state.tuning.screen_height);
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::Collided { cause });
        log::info!("Game over: {cause:?}, score {}", state.score);
        return outcome(state, true);
    }

    outcome(state, false)
}

/// Append the next pipe (and obstacle, when eligible) at the right edge
fn spawn(state: &mut GameState) {
    let spawn = state.scheduler.spawn(&mut state.rng, &state.tuning);

    let id = state.next_entity_id();
    state.world.pipes.push(Pipe::new(
        id,
        state.tuning.screen_width,
        state.tuning.pipe_width,
        spawn.pipe,
    ));

    if let Some((kind, y)) = spawn.obstacle {
        let id = state.next_entity_id();
        state.world.obstacles.push(Obstacle {
            id,
            kind,
            pos: obstacle_origin(y, &state.tuning),
            size: state.tuning.obstacle_size(kind),
            speed: state.tuning.pipe_speed,
        });
    }
}

fn outcome(state: &GameState, game_over: bool) -> TickOutcome {
    TickOutcome {
        score: state.score,
        phase: state.phase,
        game_over,
    }
}
