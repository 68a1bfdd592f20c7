//! Set completion after a score change.

use crate::rules::MatchRules;
use log::info;
use shared::{GameState, Side};

/// Result of a closed set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetWin {
    pub winner: Side,
    pub set: u32,
    pub match_over: bool,
}

/// Returns true once either team has taken enough sets to win the match.
pub fn is_match_over(state: &GameState, rules: &MatchRules) -> bool {
    state.team_a_sets >= rules.sets_to_win || state.team_b_sets >= rules.sets_to_win
}

/// Closes the current set if the leader reached the target with the required margin.
///
/// On a set win the winner's set count goes up, both scores return to zero and,
/// depending on the rules, the timeout and substitution counters too. The set
/// number advances unless the match has just been decided. A finished match is
/// never re-evaluated.
pub fn check_set_win(state: &mut GameState, rules: &MatchRules) -> Option<SetWin> {
    if is_match_over(state, rules) {
        return None;
    }

    let a = state.team_a_score;
    let b = state.team_b_score;
    let target = rules.target_for_set(state.current_set);

    if a.max(b) < target || a.abs_diff(b) < rules.win_margin {
        return None;
    }

    let winner = if a > b { Side::A } else { Side::B };
    let set = state.current_set;

    *state.sets_mut(winner) += 1;
    state.clear_scores();
    if rules.reset_allowances_on_set_win {
        state.clear_allowances();
    }

    let match_over = is_match_over(state, rules);
    if !match_over {
        state.current_set = state.team_a_sets + state.team_b_sets + 1;
    }

    info!(
        "Set {} won by {} ({}-{}), sets {}-{}",
        set, state.name(winner), a, b, state.team_a_sets, state.team_b_sets
    );
    if match_over {
        info!("Match won by {}", state.name(winner));
    }

    Some(SetWin {
        winner,
        set,
        match_over,
    })
}
