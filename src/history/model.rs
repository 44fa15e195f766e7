use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::wire::{
    de_null_default, de_opt_bool_from_any, de_opt_f64_from_any, de_opt_i64_from_any,
    de_opt_string_from_any,
};

/// Scores for unplayed games are reported as `-1`.
const UNPLAYED: i64 = -1;

/// A participant as embedded in a match team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPlayer {
    #[serde(default, deserialize_with = "de_opt_string_from_any")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string_from_any")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string_from_any")]
    pub dupr_id: Option<String>,
    #[serde(default)]
    pub post_match_rating: Option<PostMatchRating>,
}

/// Ratings of one player after the match was processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMatchRating {
    #[serde(default, deserialize_with = "de_opt_f64_from_any")]
    pub singles: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64_from_any")]
    pub doubles: Option<f64>,
}

/// Snapshot of the team's ratings before the match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreMatchRating {
    #[serde(default, deserialize_with = "de_opt_f64_from_any")]
    pub pre_match_single_rating_player1: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64_from_any")]
    pub pre_match_double_rating_player1: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64_from_any")]
    pub pre_match_double_rating_player2: Option<f64>,
}

/// One side of a match: one player in singles, two in doubles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(default, deserialize_with = "de_opt_string_from_any")]
    pub id: Option<String>,
    #[serde(default)]
    pub player1: Option<MatchPlayer>,
    #[serde(default)]
    pub player2: Option<MatchPlayer>,
    #[serde(default, deserialize_with = "de_opt_bool_from_any")]
    pub winner: Option<bool>,
    #[serde(default, deserialize_with = "de_opt_i64_from_any")]
    pub game1: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_i64_from_any")]
    pub game2: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_i64_from_any")]
    pub game3: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_i64_from_any")]
    pub game4: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_i64_from_any")]
    pub game5: Option<i64>,
    #[serde(default)]
    pub pre_match_rating_and_impact: Option<PreMatchRating>,
}

impl Team {
    /// Whether `player_id` plays on this team.
    pub fn has_player(&self, player_id: &str) -> bool {
        [&self.player1, &self.player2]
            .into_iter()
            .flatten()
            .any(|p| p.id.as_deref() == Some(player_id))
    }

    /// Per-game scores in order, `None` for games without a score.
    pub fn games(&self) -> [Option<i64>; 5] {
        [self.game1, self.game2, self.game3, self.game4, self.game5]
    }

    /// First player's rating before the match, doubles or singles by format.
    pub fn rating_before(&self, doubles: bool) -> Option<f64> {
        let pre = self.pre_match_rating_and_impact.as_ref()?;
        if doubles {
            pre.pre_match_double_rating_player1
        } else {
            pre.pre_match_single_rating_player1
        }
    }

    /// First player's rating after the match, doubles or singles by format.
    pub fn rating_after(&self, doubles: bool) -> Option<f64> {
        let post = self.player1.as_ref()?.post_match_rating.as_ref()?;
        if doubles { post.doubles } else { post.singles }
    }
}

/// Win/loss from the perspective of one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchOutcome {
    Win,
    Loss,
}

/// One completed match from a player's history.
///
/// Fields not modelled here are kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    #[serde(default, deserialize_with = "de_opt_string_from_any")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string_from_any")]
    pub event_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string_from_any")]
    pub event_date: Option<String>,
    /// `"SINGLES"` or `"DOUBLES"`.
    #[serde(default, deserialize_with = "de_opt_string_from_any")]
    pub event_format: Option<String>,
    #[serde(default)]
    pub league: Option<Value>,
    #[serde(default)]
    pub tournament: Option<Value>,
    #[serde(default)]
    pub score_format: Option<Value>,
    #[serde(default, deserialize_with = "de_opt_bool_from_any")]
    pub confirmed: Option<bool>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub teams: Vec<Team>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MatchRecord {
    pub fn is_doubles(&self) -> bool {
        self.event_format.as_deref() == Some("DOUBLES")
    }

    /// Event date parsed from its leading `YYYY-MM-DD` part.
    pub fn match_date(&self) -> Option<chrono::NaiveDate> {
        let raw = self.event_date.as_deref()?;
        chrono::NaiveDate::parse_from_str(raw.get(..10).unwrap_or(raw), "%Y-%m-%d").ok()
    }

    /// The score format name, whether sent as `{"format": ...}` or as a bare string.
    pub fn score_format(&self) -> Option<String> {
        match self.score_format.as_ref()? {
            Value::Object(map) => map.get("format").and_then(Value::as_str).map(str::to_owned),
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Split the teams into `(player's team, opponent team)`.
    pub fn teams_for(&self, player_id: &str) -> (Option<&Team>, Option<&Team>) {
        let mut own = None;
        let mut opponent = None;
        for team in &self.teams {
            if team.has_player(player_id) {
                own = Some(team);
            } else {
                opponent = Some(team);
            }
        }
        (own, opponent)
    }

    /// Whether `player_id`'s team won. `None` unless both teams are known.
    pub fn outcome_for(&self, player_id: &str) -> Option<MatchOutcome> {
        match self.teams_for(player_id) {
            (Some(own), Some(_)) => Some(if own.winner == Some(true) {
                MatchOutcome::Win
            } else {
                MatchOutcome::Loss
            }),
            _ => None,
        }
    }

    /// Game scores from `player_id`'s side, e.g. `"11-7, 9-11, 11-4"`.
    pub fn score_summary_for(&self, player_id: &str) -> Option<String> {
        let (Some(own), Some(opp)) = self.teams_for(player_id) else {
            return None;
        };
        let games: Vec<String> = own
            .games()
            .into_iter()
            .zip(opp.games())
            .filter_map(|(a, b)| match (a, b) {
                (Some(a), Some(b)) if a != UNPLAYED => Some(format!("{a}-{b}")),
                _ => None,
            })
            .collect();
        (!games.is_empty()).then(|| games.join(", "))
    }
}
