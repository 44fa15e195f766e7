//! The club crawl: roster, then profiles, then match histories.

mod result;

pub use result::{ClubInfo, CrawlResult};

use tokio_util::sync::CancellationToken;

use crate::core::{CrawlLog, DuprClient, DuprError, Pacing, RetryConfig};
use crate::history::{self, HistoryRequest};
use crate::{members, profile};

/// A builder that runs the whole acquisition pipeline for one club.
///
/// Stages run one after another on the calling task, and every request is
/// followed by the configured pacing delay. The crawl can be stopped through
/// its [`CancellationToken`]; whatever was collected up to that point is still
/// returned.
///
/// # Example
///
/// ```no_run
/// # use dupr_rs::{ClubCrawl, DuprClient, TracingLog};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = DuprClient::builder()
///     .credentials("me@example.com", "secret")
///     .build()?;
/// client.login().await?;
///
/// let result = ClubCrawl::new(&client, "5986040853")
///     .max_members(20)
///     .max_matches(5)
///     .run(&mut TracingLog)
///     .await?;
/// println!("{} matches", result.club_info().scraped_matches);
/// # Ok(())
/// # }
/// ```
pub struct ClubCrawl {
    client: DuprClient,
    club_id: String,
    max_members: i64,
    max_matches: i64,
    history: HistoryRequest,
    cancel: CancellationToken,
}

impl ClubCrawl {
    /// Creates a crawl for `club_id` with default limits (20 members, 5 histories, 10 matches per page).
    pub fn new(client: &DuprClient, club_id: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            club_id: club_id.into(),
            max_members: 20,
            max_matches: 5,
            history: HistoryRequest::default(),
            cancel: CancellationToken::new(),
        }
    }

    /// Keep at most this many roster members. Zero or below keeps none.
    #[must_use]
    pub const fn max_members(mut self, n: i64) -> Self {
        self.max_members = n;
        self
    }

    /// Fetch match history for the first `n` members only.
    #[must_use]
    pub const fn max_matches(mut self, n: i64) -> Self {
        self.max_matches = n;
        self
    }

    /// Page size for each match-history request.
    #[must_use]
    pub const fn matches_per_player(mut self, n: u32) -> Self {
        self.history.matches_per_player = n;
        self
    }

    /// Overrides the per-player retry policy.
    #[must_use]
    pub fn retry_policy(mut self, cfg: RetryConfig) -> Self {
        self.history.retry = cfg;
        self
    }

    /// Overrides the delay inserted after each request.
    #[must_use]
    pub const fn pacing(mut self, pacing: Pacing) -> Self {
        self.history.pacing = pacing;
        self
    }

    /// Use an externally owned token, so a UI can stop the crawl.
    #[must_use]
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// A handle to this crawl's cancellation token.
    pub fn token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Runs the crawl.
    ///
    /// # Errors
    ///
    /// Only [`DuprError::MembersUnavailable`]: every other failure is logged and
    /// shows up as a smaller result.
    #[tracing::instrument(skip(self, log), err, fields(club_id = %self.club_id))]
    pub async fn run(&self, log: &mut dyn CrawlLog) -> Result<CrawlResult, DuprError> {
        log.log(&format!("Starting crawl for club ID: {}", self.club_id));

        let members = members::enumerate(
            &self.client,
            &self.club_id,
            self.max_members,
            log,
            &self.history.pacing,
        )
        .await?;

        let profiles = profile::enrich(
            &self.client,
            &members,
            &self.cancel,
            log,
            &self.history.pacing,
        )
        .await;

        let history_cap = usize::try_from(self.max_matches).unwrap_or(0);
        let player_ids = members.iter().take(history_cap).map(|m| m.id.as_str());
        let match_history =
            history::fetch_histories(&self.client, player_ids, &self.history, &self.cancel, log)
                .await;

        let result = CrawlResult::assemble(&self.club_id, members, profiles, match_history);
        let info = result.club_info();
        tracing::info!(
            members = info.total_members,
            profiles = result.profiles().len(),
            players_with_history = info.players_with_history,
            matches = info.scraped_matches,
            cancelled = self.cancel.is_cancelled(),
            "crawl finished"
        );
        log.log(&format!(
            "Done: {} members, {} profiles, {} matches for {} players",
            info.total_members,
            result.profiles().len(),
            info.scraped_matches,
            info.players_with_history
        ));
        Ok(result)
    }
}
