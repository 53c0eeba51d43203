//! HUD and overlay view model
//!
//! Computes what the DOM should show; `main.rs` only copies it into elements.

use crate::consts::HUD_POST_COUNT;
use crate::sim::{GamePhase, GameState};

/// Which modal overlay is visible
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// Title screen
    Start,
    /// Run summary with every remembered post
    GameOver {
        final_score: String,
        history: Vec<String>,
    },
}

/// Everything the HUD renders for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudView {
    pub score: String,
    /// Newest posts first, at most `HUD_POST_COUNT`
    pub feed: Vec<String>,
    pub overlay: Option<Overlay>,
}

impl HudView {
    pub fn from_state(state: &GameState) -> Self {
        let overlay = match state.phase {
            GamePhase::Start => Some(Overlay::Start),
            GamePhase::Playing => None,
            GamePhase::GameOver => Some(Overlay::GameOver {
                final_score: format_score(state.score),
                history: state.history.entries().to_vec(),
            }),
        };
        Self {
            score: format_score(state.score),
            feed: state.history.latest(HUD_POST_COUNT).to_vec(),
            overlay,
        }
    }
}

/// Score with thousands separators ("12,000")
pub fn format_score(score: u64) -> String {
    let digits = score.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
