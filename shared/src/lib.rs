use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const DEFAULT_TEAM_A_NAME: &str = "Squadra A";
pub const DEFAULT_TEAM_B_NAME: &str = "Squadra B";
pub const DEFAULT_BG_COLOR: &str = "#000000";
pub const DEFAULT_MAX_TIMEOUTS: u32 = 2;
pub const DEFAULT_MAX_SUBS: u32 = 6;

/// Identifier used when a request names no match.
pub const DEFAULT_MATCH: &str = "Volley";
/// Identifiers seeded at server startup.
pub const KNOWN_MATCHES: [&str; 2] = ["Volley", "Basket"];

/// Team selector. Also records which team is drawn on the left of the display.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    #[default]
    A,
    B,
}

impl Side {
    /// Parses an exact "A"/"B" selector.
    pub fn parse(value: &str) -> Option<Side> {
        match value {
            "A" => Some(Side::A),
            "B" => Some(Side::B),
            _ => None,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::A => "A",
            Side::B => "B",
        }
    }
}

/// Live record of one match, serialized flat with the keys display pages expect.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GameState {
    #[serde(rename = "teamA_name")]
    pub team_a_name: String,
    #[serde(rename = "teamB_name")]
    pub team_b_name: String,
    #[serde(rename = "teamA_score")]
    pub team_a_score: u32,
    #[serde(rename = "teamB_score")]
    pub team_b_score: u32,
    #[serde(rename = "teamA_sets")]
    pub team_a_sets: u32,
    #[serde(rename = "teamB_sets")]
    pub team_b_sets: u32,
    pub current_set: u32,
    #[serde(rename = "teamA_timeouts")]
    pub team_a_timeouts: u32,
    #[serde(rename = "teamB_timeouts")]
    pub team_b_timeouts: u32,
    #[serde(rename = "teamA_subs")]
    pub team_a_subs: u32,
    #[serde(rename = "teamB_subs")]
    pub team_b_subs: u32,
    pub max_timeouts: u32,
    pub max_subs: u32,
    #[serde(rename = "logoA")]
    pub logo_a: Option<String>,
    #[serde(rename = "logoB")]
    pub logo_b: Option<String>,
    #[serde(rename = "bgColor")]
    pub bg_color: String,
    #[serde(rename = "bgImage")]
    pub bg_image: Option<String>,
    #[serde(rename = "sideLeft")]
    pub side_left: Side,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            team_a_name: DEFAULT_TEAM_A_NAME.to_string(),
            team_b_name: DEFAULT_TEAM_B_NAME.to_string(),
            team_a_score: 0,
            team_b_score: 0,
            team_a_sets: 0,
            team_b_sets: 0,
            current_set: 1,
            team_a_timeouts: 0,
            team_b_timeouts: 0,
            team_a_subs: 0,
            team_b_subs: 0,
            max_timeouts: DEFAULT_MAX_TIMEOUTS,
            max_subs: DEFAULT_MAX_SUBS,
            logo_a: None,
            logo_b: None,
            bg_color: DEFAULT_BG_COLOR.to_string(),
            bg_image: None,
            side_left: Side::A,
        }
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh state that keeps the given team names.
    pub fn with_names(team_a_name: &str, team_b_name: &str) -> Self {
        Self {
            team_a_name: team_a_name.to_string(),
            team_b_name: team_b_name.to_string(),
            ..Self::default()
        }
    }

    pub fn name(&self, team: Side) -> &str {
        match team {
            Side::A => &self.team_a_name,
            Side::B => &self.team_b_name,
        }
    }

    pub fn score(&self, team: Side) -> u32 {
        match team {
            Side::A => self.team_a_score,
            Side::B => self.team_b_score,
        }
    }

    pub fn sets(&self, team: Side) -> u32 {
        match team {
            Side::A => self.team_a_sets,
            Side::B => self.team_b_sets,
        }
    }

    pub fn timeouts(&self, team: Side) -> u32 {
        match team {
            Side::A => self.team_a_timeouts,
            Side::B => self.team_b_timeouts,
        }
    }

    pub fn subs(&self, team: Side) -> u32 {
        match team {
            Side::A => self.team_a_subs,
            Side::B => self.team_b_subs,
        }
    }

    pub fn score_mut(&mut self, team: Side) -> &mut u32 {
        match team {
            Side::A => &mut self.team_a_score,
            Side::B => &mut self.team_b_score,
        }
    }

    pub fn sets_mut(&mut self, team: Side) -> &mut u32 {
        match team {
            Side::A => &mut self.team_a_sets,
            Side::B => &mut self.team_b_sets,
        }
    }

    pub fn timeouts_mut(&mut self, team: Side) -> &mut u32 {
        match team {
            Side::A => &mut self.team_a_timeouts,
            Side::B => &mut self.team_b_timeouts,
        }
    }

    pub fn subs_mut(&mut self, team: Side) -> &mut u32 {
        match team {
            Side::A => &mut self.team_a_subs,
            Side::B => &mut self.team_b_subs,
        }
    }

    pub fn clear_scores(&mut self) {
        self.team_a_score = 0;
        self.team_b_score = 0;
    }

    /// Zeroes the per-set timeout and substitution counters of both teams.
    pub fn clear_allowances(&mut self) {
        self.team_a_timeouts = 0;
        self.team_b_timeouts = 0;
        self.team_a_subs = 0;
        self.team_b_subs = 0;
    }
}

/// Adds a signed delta to a counter and clamps the result into `[0, max]`.
pub fn clamp_add(value: u32, delta: i64, max: u32) -> u32 {
    i64::from(value)
        .saturating_add(delta)
        .clamp(0, i64::from(max)) as u32
}

/// Fields a `set_config` action may overwrite. `None` leaves the field untouched;
/// for optional references `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub team_a_name: Option<String>,
    pub team_b_name: Option<String>,
    pub bg_color: Option<String>,
    pub side_left: Option<Side>,
    pub logo_a: Option<Option<String>>,
    pub logo_b: Option<Option<String>>,
    pub bg_image: Option<Option<String>>,
    pub max_timeouts: Option<u32>,
    pub max_subs: Option<u32>,
}

/// Typed form of an update payload.
///
/// Parsing never fails: missing or malformed parameters fall back to defaults
/// (team "A", delta 0, config fields unchanged) and unrecognized actions become
/// [`Action::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetConfig(ConfigUpdate),
    Score { team: Side, delta: i64 },
    Timeout { team: Side, delta: i64 },
    Sub { team: Side, delta: i64 },
    ResetSet,
    ResetMatch { keep_names: bool },
    Unknown(String),
}

impl Action {
    /// Parses a raw request body. Anything that is not a JSON object counts as `{}`.
    pub fn from_body(body: &[u8]) -> Action {
        let payload = serde_json::from_slice::<Value>(body).unwrap_or(Value::Null);
        Action::from_payload(&payload)
    }

    pub fn from_payload(payload: &Value) -> Action {
        let empty = Map::new();
        let fields = payload.as_object().unwrap_or(&empty);

        let action = string_field(fields, "action").unwrap_or_default();
        let team = || {
            string_field(fields, "team")
                .as_deref()
                .and_then(Side::parse)
                .unwrap_or(Side::A)
        };
        let delta = || int_field(fields, "delta").unwrap_or(0);

        match action.as_str() {
            "set_config" => Action::SetConfig(ConfigUpdate {
                team_a_name: string_field(fields, "teamA_name"),
                team_b_name: string_field(fields, "teamB_name"),
                bg_color: string_field(fields, "bgColor"),
                side_left: string_field(fields, "sideLeft")
                    .as_deref()
                    .and_then(Side::parse),
                logo_a: reference_field(fields, "logoA"),
                logo_b: reference_field(fields, "logoB"),
                bg_image: reference_field(fields, "bgImage"),
                max_timeouts: positive_field(fields, "max_timeouts"),
                max_subs: positive_field(fields, "max_subs"),
            }),
            "score" => Action::Score {
                team: team(),
                delta: delta(),
            },
            "timeout" => Action::Timeout {
                team: team(),
                delta: delta(),
            },
            "sub" => Action::Sub {
                team: team(),
                delta: delta(),
            },
            "reset_set" => Action::ResetSet,
            "reset_match" => Action::ResetMatch {
                keep_names: !matches!(
                    fields.get("keepNames"),
                    Some(Value::Bool(false))
                ) && string_field(fields, "keepNames").as_deref() != Some("false"),
            },
            _ => Action::Unknown(action.clone()),
        }
    }

    /// Wire name of the action.
    pub fn name(&self) -> &str {
        match self {
            Action::SetConfig(_) => "set_config",
            Action::Score { .. } => "score",
            Action::Timeout { .. } => "timeout",
            Action::Sub { .. } => "sub",
            Action::ResetSet => "reset_set",
            Action::ResetMatch { .. } => "reset_match",
            Action::Unknown(name) => name,
        }
    }

    /// Renders the action back into a payload the server accepts.
    pub fn to_payload(&self) -> Value {
        match self {
            Action::Score { team, delta }
            | Action::Timeout { team, delta }
            | Action::Sub { team, delta } => json!({
                "action": self.name(),
                "team": team.as_str(),
                "delta": delta,
            }),
            Action::ResetMatch { keep_names } => json!({
                "action": self.name(),
                "keepNames": keep_names,
            }),
            Action::SetConfig(config) => {
                let mut fields = Map::new();
                fields.insert("action".into(), json!(self.name()));
                let mut put = |key: &str, value: Option<Value>| {
                    if let Some(value) = value {
                        fields.insert(key.into(), value);
                    }
                };
                put("teamA_name", config.team_a_name.clone().map(Value::from));
                put("teamB_name", config.team_b_name.clone().map(Value::from));
                put("bgColor", config.bg_color.clone().map(Value::from));
                put("sideLeft", config.side_left.map(|s| Value::from(s.as_str())));
                put("logoA", config.logo_a.clone().map(Value::from));
                put("logoB", config.logo_b.clone().map(Value::from));
                put("bgImage", config.bg_image.clone().map(Value::from));
                put("max_timeouts", config.max_timeouts.map(Value::from));
                put("max_subs", config.max_subs.map(Value::from));
                Value::Object(fields)
            }
            Action::ResetSet | Action::Unknown(_) => json!({ "action": self.name() }),
        }
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_string)
}

// Floats truncate toward zero; anything outside i64 counts as absent.
fn int_field(fields: &Map<String, Value>, key: &str) -> Option<i64> {
    let Value::Number(number) = fields.get(key)? else {
        return None;
    };
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
            .map(|f| f.trunc() as i64)
    })
}

fn positive_field(fields: &Map<String, Value>, key: &str) -> Option<u32> {
    int_field(fields, key)
        .filter(|value| *value > 0)
        .and_then(|value| u32::try_from(value).ok())
}

fn reference_field(fields: &Map<String, Value>, key: &str) -> Option<Option<String>> {
    match fields.get(key)? {
        Value::Null => Some(None),
        Value::String(value) if value == "null" => Some(None),
        Value::String(value) => Some(Some(value.clone())),
        _ => None,
    }
}

/// Acknowledgment returned for every accepted update.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    pub ok: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = GameState::new();
        assert_eq!(state.team_a_name, "Squadra A");
        assert_eq!(state.team_b_name, "Squadra B");
        assert_eq!(state.current_set, 1);
        assert_eq!(state.max_timeouts, 2);
        assert_eq!(state.max_subs, 6);
        assert_eq!(state.bg_color, "#000000");
        assert_eq!(state.side_left, Side::A);
        assert!(state.logo_a.is_none());
        assert!(state.bg_image.is_none());
    }

    #[test]
    fn test_snapshot_is_flat_with_explicit_nulls() {
        let value = serde_json::to_value(GameState::new()).unwrap();
        let fields = value.as_object().unwrap();

        assert_eq!(fields.len(), 18);
        assert_eq!(fields["teamA_name"], "Squadra A");
        assert_eq!(fields["current_set"], 1);
        assert_eq!(fields["sideLeft"], "A");
        assert_eq!(fields["logoA"], Value::Null);
        assert_eq!(fields["logoB"], Value::Null);
        assert_eq!(fields["bgImage"], Value::Null);
        assert!(fields.values().all(|v| !v.is_object() && !v.is_array()));
    }

    #[test]
    fn test_clamp_add() {
        assert_eq!(clamp_add(5, 3, 99), 8);
        assert_eq!(clamp_add(5, -10, 99), 0);
        assert_eq!(clamp_add(98, 5, 99), 99);
        assert_eq!(clamp_add(1, i64::MAX, 6), 6);
        assert_eq!(clamp_add(1, i64::MIN, 6), 0);
    }

    #[test]
    fn test_side_selectors() {
        assert_eq!(Side::parse("A"), Some(Side::A));
        assert_eq!(Side::parse("B"), Some(Side::B));
        assert_eq!(Side::parse("b"), None);
        assert_eq!(Side::A.opposite(), Side::B);
    }

    #[test]
    fn test_parse_score_defaults() {
        let action = Action::from_payload(&json!({ "action": "score" }));
        assert_eq!(action, Action::Score { team: Side::A, delta: 0 });

        let action = Action::from_payload(&json!({ "action": "score", "team": "C", "delta": "4" }));
        assert_eq!(action, Action::Score { team: Side::A, delta: 0 });

        let action = Action::from_payload(&json!({ "action": "timeout", "team": "B", "delta": -1 }));
        assert_eq!(action, Action::Timeout { team: Side::B, delta: -1 });
    }

    #[test]
    fn test_parse_delta_float_truncates() {
        let action = Action::from_payload(&json!({ "action": "sub", "team": "B", "delta": 2.7 }));
        assert_eq!(action, Action::Sub { team: Side::B, delta: 2 });

        let action = Action::from_payload(&json!({ "action": "sub", "delta": 1e300 }));
        assert_eq!(action, Action::Sub { team: Side::A, delta: 0 });
    }

    #[test]
    fn test_parse_malformed_body() {
        assert_eq!(Action::from_body(b"not json"), Action::Unknown(String::new()));
        assert_eq!(Action::from_body(b"[1,2]"), Action::Unknown(String::new()));
        assert_eq!(
            Action::from_body(br#"{"action":"reset_set"}"#),
            Action::ResetSet
        );
        assert_eq!(
            Action::from_body(br#"{"action":"fireworks"}"#),
            Action::Unknown("fireworks".to_string())
        );
    }

    #[test]
    fn test_parse_keep_names() {
        let keep = |payload: Value| match Action::from_payload(&payload) {
            Action::ResetMatch { keep_names } => keep_names,
            other => panic!("Unexpected action: {:?}", other),
        };

        assert!(keep(json!({ "action": "reset_match" })));
        assert!(keep(json!({ "action": "reset_match", "keepNames": true })));
        assert!(keep(json!({ "action": "reset_match", "keepNames": "yes" })));
        assert!(!keep(json!({ "action": "reset_match", "keepNames": false })));
        assert!(!keep(json!({ "action": "reset_match", "keepNames": "false" })));
    }

    #[test]
    fn test_parse_set_config() {
        let action = Action::from_payload(&json!({
            "action": "set_config",
            "teamA_name": "Lions",
            "sideLeft": "left",
            "logoA": "lions.png",
            "logoB": null,
            "bgImage": "null",
            "bgColor": 42,
            "max_timeouts": 3,
            "max_subs": 0,
        }));

        let Action::SetConfig(config) = action else {
            panic!("Expected set_config");
        };
        assert_eq!(config.team_a_name.as_deref(), Some("Lions"));
        assert_eq!(config.team_b_name, None);
        assert_eq!(config.side_left, None);
        assert_eq!(config.logo_a, Some(Some("lions.png".to_string())));
        assert_eq!(config.logo_b, Some(None));
        assert_eq!(config.bg_image, Some(None));
        assert_eq!(config.bg_color, None);
        assert_eq!(config.max_timeouts, Some(3));
        assert_eq!(config.max_subs, None);
    }

    #[test]
    fn test_payload_round_trip_for_config() {
        let action = Action::SetConfig(ConfigUpdate {
            team_b_name: Some("Tigers".to_string()),
            side_left: Some(Side::B),
            logo_b: Some(None),
            ..ConfigUpdate::default()
        });

        let payload = action.to_payload();
        assert_eq!(payload["action"], "set_config");
        assert_eq!(payload["logoB"], Value::Null);
        assert!(payload.get("teamA_name").is_none());
        assert_eq!(Action::from_payload(&payload), action);
    }

    #[test]
    fn test_ack_serialization() {
        assert_eq!(serde_json::to_string(&Ack::ok()).unwrap(), r#"{"ok":true}"#);
    }
}
