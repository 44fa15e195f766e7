use serde::Serialize;
use serde_json::Value;

use crate::history::model::{MatchOutcome, MatchRecord, Team};

/// One match flattened from the point of view of the player whose history it came from.
///
/// This is the shape the report exporter writes, one row per (player, match).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRow {
    pub player_id: String,
    pub match_id: Option<String>,
    pub event_name: Option<String>,
    pub event_date: Option<String>,
    pub event_format: Option<String>,
    pub league: Option<String>,
    pub tournament: Option<String>,
    pub score_format: Option<String>,
    pub confirmed: Option<bool>,
    pub result: Option<MatchOutcome>,
    pub score_summary: Option<String>,
    pub player_team: Option<TeamSide>,
    pub opponent_team: Option<TeamSide>,
}

/// One team's half of a [`MatchRow`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSide {
    pub team_id: Option<String>,
    pub player1_id: Option<String>,
    pub player1_name: Option<String>,
    pub player1_dupr: Option<String>,
    pub player2_id: Option<String>,
    pub player2_name: Option<String>,
    pub player2_dupr: Option<String>,
    pub winner: Option<bool>,
    pub games: [Option<i64>; 5],
    pub rating_before: Option<f64>,
    pub rating_after: Option<f64>,
}

impl TeamSide {
    fn new(team: &Team, doubles: bool) -> Self {
        let p1 = team.player1.as_ref();
        let p2 = team.player2.as_ref();
        Self {
            team_id: team.id.clone(),
            player1_id: p1.and_then(|p| p.id.clone()),
            player1_name: p1.and_then(|p| p.full_name.clone()),
            player1_dupr: p1.and_then(|p| p.dupr_id.clone()),
            player2_id: p2.and_then(|p| p.id.clone()),
            player2_name: p2.and_then(|p| p.full_name.clone()),
            player2_dupr: p2.and_then(|p| p.dupr_id.clone()),
            winner: team.winner,
            games: team.games(),
            rating_before: team.rating_before(doubles),
            rating_after: team.rating_after(doubles),
        }
    }
}

/// League/tournament as a cell: the value itself, or the `name` of an object.
fn label_of(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("name").and_then(Value::as_str).map(str::to_owned),
        _ => None,
    }
}

impl MatchRow {
    pub fn new(player_id: &str, record: &MatchRecord) -> Self {
        let doubles = record.is_doubles();
        let (own, opp) = record.teams_for(player_id);
        Self {
            player_id: player_id.to_string(),
            match_id: record.id.clone(),
            event_name: record.event_name.clone(),
            event_date: record.event_date.clone(),
            event_format: record.event_format.clone(),
            league: label_of(record.league.as_ref()),
            tournament: label_of(record.tournament.as_ref()),
            score_format: record.score_format(),
            confirmed: record.confirmed,
            result: record.outcome_for(player_id),
            score_summary: record.score_summary_for(player_id),
            player_team: own.map(|t| TeamSide::new(t, doubles)),
            opponent_team: opp.map(|t| TeamSide::new(t, doubles)),
        }
    }
}
