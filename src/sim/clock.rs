//! Fixed timestep driver
//!
//! Turns variable display-frame deltas into whole simulation ticks.

use super::state::GameState;
use super::tick::{TickInput, tick};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Accumulates frame time and spends it in `SIM_DT` ticks
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    /// Unspent time carried to the next frame
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Feed one display frame of `dt` seconds and run the ticks it pays for.
    ///
    /// `dt` is capped at `MAX_FRAME_DT` and a frame runs at most `MAX_SUBSTEPS`
    /// ticks. Stops early (dropping leftover time) once the run ends.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, state: &mut GameState, input: &TickInput, dt: f32) -> u32 {
        if !state.is_playing() {
            self.accumulator = 0.0;
            return 0;
        }

        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(state, input);
            self.accumulator -= SIM_DT;
            substeps += 1;
            if !state.is_playing() {
                self.accumulator = 0.0;
                break;
            }
        }
        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::spawn_obstacle;
    use crate::sim::{GamePhase, activate};

    fn playing_state() -> GameState {
        let mut state = GameState::new(9);
        activate(&mut state, 9);
        state.drain_events();
        state
    }

    #[test]
    fn test_one_tick_per_sim_dt() {
        let mut state = playing_state();
        let mut clock = FixedStep::default();
        let idle = TickInput::default();

        assert_eq!(clock.advance(&mut state, &idle, SIM_DT * 0.5), 0);
        assert_eq!(clock.advance(&mut state, &idle, SIM_DT * 0.5), 1);
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut state = playing_state();
        let mut clock = FixedStep::default();

        // A tab coming back after seconds in the background
        let ticks = clock.advance(&mut state, &TickInput::default(), 5.0);
        let max_ticks = (MAX_FRAME_DT / SIM_DT).ceil() as u32;
        assert!(ticks <= max_ticks, "{ticks} ticks from one frame");
        assert!(ticks <= MAX_SUBSTEPS);
        assert_eq!(state.frame, ticks as u64);
        assert!(clock.accumulator() < SIM_DT);
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut state = playing_state();
        let mut clock = FixedStep::default();
        assert_eq!(clock.advance(&mut state, &TickInput::default(), -1.0), 0);
        assert_eq!(clock.accumulator(), 0.0);
    }

    #[test]
    fn test_crash_stops_substeps() {
        let mut state = playing_state();
        spawn_obstacle(&mut state);
        state.obstacles[0].pos = state.player.pos;

        let mut clock = FixedStep::default();
        let ticks = clock.advance(&mut state, &TickInput::default(), MAX_FRAME_DT);
        assert_eq!(ticks, 1);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.frame, 1);
        assert_eq!(clock.accumulator(), 0.0);

        // Frozen afterwards
        assert_eq!(clock.advance(&mut state, &TickInput::default(), MAX_FRAME_DT), 0);
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_idle_on_start_screen() {
        let mut state = GameState::new(9);
        let mut clock = FixedStep::default();
        assert_eq!(clock.advance(&mut state, &TickInput::default(), MAX_FRAME_DT), 0);
        assert_eq!(state.frame, 0);
    }
}
