//! Per-player match-history crawl.

mod api;
mod model;
mod outcome;
mod row;

pub use api::{HistoryRequest, fetch_histories, fetch_player_history};
pub use model::{MatchOutcome, MatchPlayer, MatchRecord, PostMatchRating, PreMatchRating, Team};
pub use outcome::{HistoryStop, PageOutcome, PlayerHistory};
pub use row::{MatchRow, TeamSide};
