//! Scoring policy shared by every match on the server.

use crate::error::RulesError;

/// Most sets a team can hold once the match is decided
pub const MAX_SETS_TO_WIN: u32 = 3;

/// Tunable scoring rules.
///
/// The defaults describe best-of-5 volleyball: sets to 25, a deciding fifth set
/// to 15, a two-point margin, scores bounded to 0..=99 and per-set timeout and
/// substitution allowances that reset whenever a set is won.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRules {
    /// Upper bound for a team's live score
    pub score_max: u32,
    /// Points needed to win a regular set
    pub set_target: u32,
    /// Points needed to win the deciding set
    pub deciding_set_target: u32,
    /// Set number from which `deciding_set_target` applies
    pub deciding_set: u32,
    /// Minimum lead required to close a set
    pub win_margin: u32,
    /// Sets a team needs to take the match
    pub sets_to_win: u32,
    /// Zero timeouts and substitutions used when a set is won
    pub reset_allowances_on_set_win: bool,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            score_max: 99,
            set_target: 25,
            deciding_set_target: 15,
            deciding_set: 5,
            win_margin: 2,
            sets_to_win: 3,
            reset_allowances_on_set_win: true,
        }
    }
}

impl MatchRules {
    /// Points needed to close the given set.
    pub fn target_for_set(&self, set: u32) -> u32 {
        if set < self.deciding_set {
            self.set_target
        } else {
            self.deciding_set_target
        }
    }

    /// Checks that every set can be closed and the sets-won bound holds.
    pub fn validate(&self) -> Result<(), RulesError> {
        if !(1..=MAX_SETS_TO_WIN).contains(&self.sets_to_win) {
            return Err(RulesError::SetsToWin {
                got: self.sets_to_win,
                max: MAX_SETS_TO_WIN,
            });
        }
        if self.deciding_set == 0 {
            return Err(RulesError::DecidingSet);
        }
        if self.win_margin == 0 {
            return Err(RulesError::WinMargin);
        }

        let target = self.set_target.max(self.deciding_set_target);
        if self.score_max < target {
            return Err(RulesError::ScoreBelowTarget {
                score_max: self.score_max,
                target,
            });
        }
        Ok(())
    }
}
