use crate::core::DuprError;
use crate::history::model::MatchRecord;

/// Classified result of a single match-history page request.
#[derive(Debug)]
pub enum PageOutcome {
    /// HTTP 200 with at least one hit. Hits that failed to decode are already dropped.
    Success {
        hits: Vec<MatchRecord>,
        next_offset: Option<u64>,
    },
    /// HTTP 200 with no matches: the listing is exhausted.
    EndOfPages,
    /// HTTP 403: the bearer token is no longer accepted.
    AuthExpired,
    /// Any other non-200 status. Not retried.
    Rejected { status: u16 },
    /// The request failed in transport or the body could not be decoded.
    TransportError(DuprError),
}

/// Why a player's history crawl stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryStop {
    /// The paging cursor ran out after a non-empty page.
    Exhausted,
    /// A page came back empty.
    EndOfPages,
    /// The cancellation token was observed.
    Canceled,
    /// The server answered with a non-retryable status.
    Rejected(u16),
    /// The shared auth/transport retry budget ran out.
    RetriesExhausted,
}

/// Everything gathered for one player, plus how the crawl went.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerHistory {
    pub player_id: String,
    pub matches: Vec<MatchRecord>,
    pub stop: HistoryStop,
    /// Page requests issued, including failed ones.
    pub attempts: u32,
    /// Reauthentications triggered by HTTP 403.
    pub reauths: u32,
}

impl PlayerHistory {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
