//! Demo-mode pilot
//!
//! Aims for the centre of the primary gap of the nearest pipe ahead and flaps
//! whenever the cat has sunk below it near the top of its arc. A full jump arc
//! plus the cat is taller than the secondary gap, so that one is never used.

use super::state::GameState;
use super::tick::TickInput;

/// How far below the target the cat may sink before flapping
const SLACK: f32 = 24.0;
/// Flap again once the climb has slowed to this velocity
const REFLAP_VELOCITY: f32 = -2.0;

/// Decide this tick's input for the current state
pub fn decide(state: &GameState) -> TickInput {
    let player = state.player();
    let tuning = state.tuning();
    let center = player.center_y();

    let target = state
        .pipes()
        .iter()
        .find(|p| p.right() >= player.pos.x)
        .map(|p| p.shape.primary_gap_center())
        .unwrap_or(tuning.screen_height / 2.0);

    TickInput {
        jump: center > target + SLACK && player.velocity_y >= REFLAP_VELOCITY,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, Pipe, PipeShape, tick};

    fn playing_state() -> GameState {
        let mut state = GameState::new(7);
        state.mark_assets_ready();
        state.reset().unwrap();
        state
    }

    #[test]
    fn test_flaps_when_sinking_below_target() {
        let mut state = playing_state();
        state.player.pos.y = 400.0;
        state.player.velocity_y = 1.0;
        assert!(decide(&state).jump);

        // Already rising
        state.player.velocity_y = -3.0;
        assert!(!decide(&state).jump);

        // Above the target
        state.player.pos.y = 100.0;
        state.player.velocity_y = 1.0;
        assert!(!decide(&state).jump);
    }

    #[test]
    fn test_targets_nearest_pipe_ahead() {
        let mut state = playing_state();
        let id = state.next_entity_id();
        state.world.pipes.push(Pipe::new(
            id,
            200.0,
            70.0,
            PipeShape::Single {
                top_height: 380.0,
                gap: 140.0,
            },
        ));
        // Centre 270 is above the gap centre 450
        state.player.velocity_y = 1.0;
        assert!(!decide(&state).jump);

        state.player.pos.y = 460.0;
        assert!(decide(&state).jump);
    }

    #[test]
    fn test_autopilot_scores_points() {
        let mut state = playing_state();
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..1_500 {
            tick(&mut state, &input);
            if state.phase() != GamePhase::Playing {
                break;
            }
        }
        assert!(state.score() >= 1, "score {}", state.score());
    }
}
