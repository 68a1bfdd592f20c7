use crate::rules::MatchRules;
use crate::set_win::{check_set_win, SetWin};
use log::debug;
use shared::{clamp_add, Action, ConfigUpdate, GameState};

/// What applying an action did to a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// State changed in place. Carries the closed set, if the action ended one.
    Mutated(Option<SetWin>),
    /// Action not recognized, state untouched.
    Ignored,
    /// The caller must store this state in place of the current one.
    Replace(GameState),
}

/// Interprets update actions against a match.
#[derive(Debug, Clone, Default)]
pub struct UpdateProcessor {
    rules: MatchRules,
}

impl UpdateProcessor {
    pub fn new(rules: MatchRules) -> Self {
        Self { rules }
    }

    pub fn apply(&self, state: &mut GameState, action: &Action) -> Applied {
        match action {
            Action::SetConfig(config) => {
                apply_config(state, config);
                Applied::Mutated(None)
            }
            Action::Score { team, delta } => {
                let score = state.score_mut(*team);
                *score = clamp_add(*score, *delta, self.rules.score_max);
                Applied::Mutated(check_set_win(state, &self.rules))
            }
            Action::Timeout { team, delta } => {
                let max = state.max_timeouts;
                let used = state.timeouts_mut(*team);
                *used = clamp_add(*used, *delta, max);
                Applied::Mutated(None)
            }
            Action::Sub { team, delta } => {
                let max = state.max_subs;
                let used = state.subs_mut(*team);
                *used = clamp_add(*used, *delta, max);
                Applied::Mutated(None)
            }
            Action::ResetSet => {
                state.clear_scores();
                state.clear_allowances();
                Applied::Mutated(None)
            }
            Action::ResetMatch { keep_names } => {
                let fresh = if *keep_names {
                    GameState::with_names(&state.team_a_name, &state.team_b_name)
                } else {
                    GameState::new()
                };
                Applied::Replace(fresh)
            }
            Action::Unknown(name) => {
                debug!("Ignoring unknown action {:?}", name);
                Applied::Ignored
            }
        }
    }
}

fn apply_config(state: &mut GameState, config: &ConfigUpdate) {
    if let Some(name) = &config.team_a_name {
        state.team_a_name = name.clone();
    }
    if let Some(name) = &config.team_b_name {
        state.team_b_name = name.clone();
    }
    if let Some(color) = &config.bg_color {
        state.bg_color = color.clone();
    }
    if let Some(side) = config.side_left {
        state.side_left = side;
    }
    if let Some(logo) = &config.logo_a {
        state.logo_a = logo.clone();
    }
    if let Some(logo) = &config.logo_b {
        state.logo_b = logo.clone();
    }
    if let Some(image) = &config.bg_image {
        state.bg_image = image.clone();
    }

    // Lowered allowances re-clamp what has already been used
    if let Some(max) = config.max_timeouts {
        state.max_timeouts = max;
        state.team_a_timeouts = state.team_a_timeouts.min(max);
        state.team_b_timeouts = state.team_b_timeouts.min(max);
    }
    if let Some(max) = config.max_subs {
        state.max_subs = max;
        state.team_a_subs = state.team_a_subs.min(max);
        state.team_b_subs = state.team_b_subs.min(max);
    }
}
