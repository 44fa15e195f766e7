use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::DuprError;
use crate::history::{MatchRecord, MatchRow};
use crate::members::Member;
use crate::profile::Profile;

/// Header facts about a crawl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClubInfo {
    pub id: String,
    /// Taken from the first member's club name; empty when the roster is empty.
    pub name: String,
    pub total_members: usize,
    pub players_with_history: usize,
    pub scraped_matches: usize,
    pub generated_at: DateTime<Utc>,
}

/// Everything a crawl collected. Built once at the end of a crawl and read-only after.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrawlResult {
    club_info: ClubInfo,
    members: Vec<Member>,
    #[serde(rename = "player_profiles")]
    profiles: Vec<Profile>,
    match_history: BTreeMap<String, Vec<MatchRecord>>,
}

impl CrawlResult {
    pub(crate) fn assemble(
        club_id: &str,
        members: Vec<Member>,
        profiles: Vec<Profile>,
        match_history: BTreeMap<String, Vec<MatchRecord>>,
    ) -> Self {
        let club_info = ClubInfo {
            id: club_id.to_string(),
            name: members
                .first()
                .and_then(|m| m.club_name.clone())
                .unwrap_or_default(),
            total_members: members.len(),
            players_with_history: match_history.len(),
            scraped_matches: match_history.values().map(Vec::len).sum(),
            generated_at: Utc::now(),
        };
        Self {
            club_info,
            members,
            profiles,
            match_history,
        }
    }

    pub const fn club_info(&self) -> &ClubInfo {
        &self.club_info
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub const fn match_history(&self) -> &BTreeMap<String, Vec<MatchRecord>> {
        &self.match_history
    }

    /// Matches for one player, if any were gathered.
    pub fn matches_for(&self, player_id: &str) -> Option<&[MatchRecord]> {
        self.match_history.get(player_id).map(Vec::as_slice)
    }

    /// Every gathered match as a flat row, players in roster order.
    pub fn match_rows(&self) -> Vec<MatchRow> {
        self.members
            .iter()
            .filter_map(|m| Some((m.id.as_str(), self.matches_for(&m.id)?)))
            .flat_map(|(pid, matches)| matches.iter().map(move |r| MatchRow::new(pid, r)))
            .collect()
    }

    /// Serialize the whole result for the report exporter.
    ///
    /// # Errors
    ///
    /// Returns [`DuprError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, DuprError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
