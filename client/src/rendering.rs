use shared::{GameState, Side};

/// Renders a snapshot as terminal text, with the `side_left` team on the left.
///
/// ```text
/// Set 2
/// Lions         1  |  12 - 9   |  0        Tigers
/// T 1/2  S 3/6                  T 0/2  S 0/6
/// ```
pub fn render_scoreboard(state: &GameState) -> String {
    let left = state.side_left;
    let right = left.opposite();

    let header = format!("Set {}", state.current_set);
    let scores = format!(
        "{:<12} {:>2}  | {:>3} - {:<3} |  {:<2} {:>12}",
        state.name(left),
        state.sets(left),
        state.score(left),
        state.score(right),
        state.sets(right),
        state.name(right),
    );
    let allowances = format!(
        "{:<29} {}",
        allowance_line(state, left),
        allowance_line(state, right)
    );

    format!("{}\n{}\n{}", header, scores, allowances.trim_end())
}

fn allowance_line(state: &GameState, team: Side) -> String {
    format!(
        "T {}/{}  S {}/{}",
        state.timeouts(team),
        state.max_timeouts,
        state.subs(team),
        state.max_subs
    )
}
