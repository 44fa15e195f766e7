use std::collections::BTreeMap;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::core::{
    CrawlLog, DuprClient, DuprError, HistorySource, Pacing, RetryConfig, ServiceFuture, net,
    paging::decode_page,
};
use crate::history::model::MatchRecord;
use crate::history::outcome::{HistoryStop, PageOutcome, PlayerHistory};

#[derive(Serialize)]
struct NoFilters {}

#[derive(Serialize)]
struct SortSpec {
    order: &'static str,
    parameter: &'static str,
}

#[derive(Serialize)]
struct HistoryQuery {
    filters: NoFilters,
    sort: SortSpec,
    limit: u32,
    offset: u64,
}

impl HistoryQuery {
    /// Newest matches first.
    const fn newest_first(limit: u32, offset: u64) -> Self {
        Self {
            filters: NoFilters {},
            sort: SortSpec {
                order: "DESC",
                parameter: "MATCH_DATE",
            },
            limit,
            offset,
        }
    }
}

/// Parameters of a match-history crawl.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRequest {
    /// Matches requested per page.
    pub matches_per_player: u32,
    /// Shared auth/transport retry budget and backoff.
    pub retry: RetryConfig,
    /// Delay after every successful page.
    pub pacing: Pacing,
}

impl Default for HistoryRequest {
    fn default() -> Self {
        Self {
            matches_per_player: 10,
            retry: RetryConfig::default(),
            pacing: Pacing::default(),
        }
    }
}

impl DuprClient {
    async fn post_history_page(&self, player_id: &str, limit: u32, offset: u64) -> PageOutcome {
        let path = format!("player/v1.0/{player_id}/history");
        let resp = match self
            .post_json(&path, &HistoryQuery::newest_first(limit, offset))
            .await
        {
            Ok(r) => r,
            Err(e) => return PageOutcome::TransportError(e),
        };

        match resp.status().as_u16() {
            200 => {}
            403 => return PageOutcome::AuthExpired,
            status => return PageOutcome::Rejected { status },
        }

        let body = match net::get_text(resp, "match_history", player_id).await {
            Ok(b) => b,
            Err(e) => return PageOutcome::TransportError(e.into()),
        };

        match decode_page::<MatchRecord>(&body) {
            Ok(page) if page.is_empty() => PageOutcome::EndOfPages,
            Ok(page) => {
                if page.skipped > 0 {
                    tracing::warn!(
                        player_id,
                        offset,
                        skipped = page.skipped,
                        "history page had undecodable matches"
                    );
                }
                PageOutcome::Success {
                    hits: page.hits,
                    next_offset: page.next_offset,
                }
            }
            Err(e) => PageOutcome::TransportError(e),
        }
    }
}

impl HistorySource for DuprClient {
    fn history_page<'a>(
        &'a self,
        player_id: &'a str,
        limit: u32,
        offset: u64,
    ) -> ServiceFuture<'a, PageOutcome> {
        Box::pin(self.post_history_page(player_id, limit, offset))
    }

    fn reauthenticate(&self) -> ServiceFuture<'_, Result<(), DuprError>> {
        Box::pin(DuprClient::reauthenticate(self))
    }
}

/// Crawl one player's match history, newest first, page by page.
///
/// The loop runs while fewer than `retry.max_retries` failures have been seen.
/// HTTP 403 triggers a reauthentication and a retry of the same offset; a
/// transport or decoding failure backs off and retries the same offset. Both
/// draw on the same budget. Any other non-200 status ends the crawl for this
/// player without retrying. The token is polled before every page; matches
/// gathered before a stop are always kept.
#[tracing::instrument(skip(source, req, cancel, log), fields(limit = req.matches_per_player))]
pub async fn fetch_player_history<S>(
    source: &S,
    player_id: &str,
    req: &HistoryRequest,
    cancel: &CancellationToken,
    log: &mut dyn CrawlLog,
) -> PlayerHistory
where
    S: HistorySource + ?Sized,
{
    let max_retries = req.retry.max_retries;
    let mut matches = Vec::new();
    let mut offset = 0u64;
    let mut retries = 0u32;
    let mut attempts = 0u32;
    let mut reauths = 0u32;

    let stop = loop {
        if retries >= max_retries {
            break HistoryStop::RetriesExhausted;
        }
        if cancel.is_cancelled() {
            log.log("Stopped mid-way through match history.");
            break HistoryStop::Canceled;
        }

        attempts += 1;
        match source
            .history_page(player_id, req.matches_per_player, offset)
            .await
        {
            PageOutcome::Success { hits, next_offset } => {
                tracing::debug!(offset, hits = hits.len(), ?next_offset, "history page");
                log.log(&format!("Fetched {} matches", hits.len()));
                matches.extend(hits);
                req.pacing.pause().await;
                match next_offset {
                    Some(next) => offset = next,
                    None => break HistoryStop::Exhausted,
                }
            }
            PageOutcome::EndOfPages => {
                log.log("No more matches");
                break HistoryStop::EndOfPages;
            }
            PageOutcome::AuthExpired => {
                tracing::warn!(offset, "history request forbidden; reauthenticating");
                log.log("Match history refused (status: 403), refreshing token...");
                reauths += 1;
                retries += 1;
                if let Err(e) = source.reauthenticate().await {
                    tracing::warn!(error = %e, "reauthentication failed");
                    log.log(&format!("Token refresh failed: {e}"));
                    backoff(req, retries).await;
                }
            }
            PageOutcome::Rejected { status } => {
                tracing::warn!(offset, status, "history request rejected");
                log.log(&format!("Match history refused (status: {status})"));
                break HistoryStop::Rejected(status);
            }
            PageOutcome::TransportError(e) => {
                tracing::warn!(offset, error = %e, retries, "history page failed");
                log.log(&format!("Error while fetching match history: {e}"));
                retries += 1;
                backoff(req, retries).await;
            }
        }
    };

    tracing::debug!(?stop, matches = matches.len(), attempts, reauths, "player history done");
    PlayerHistory {
        player_id: player_id.to_string(),
        matches,
        stop,
        attempts,
        reauths,
    }
}

/// Sleep after the `failures`-th failure, unless the budget is already spent.
async fn backoff(req: &HistoryRequest, failures: u32) {
    if failures >= req.retry.max_retries {
        return;
    }
    let delay = req.retry.backoff.delay(failures.saturating_sub(1));
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Crawl match histories for `player_ids`, one player after another.
///
/// Players whose crawl gathered nothing are logged and left out of the map;
/// that is never an error. The token is also polled between players.
pub async fn fetch_histories<S, I>(
    source: &S,
    player_ids: I,
    req: &HistoryRequest,
    cancel: &CancellationToken,
    log: &mut dyn CrawlLog,
) -> BTreeMap<String, Vec<MatchRecord>>
where
    S: HistorySource + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    log.log("Fetching match history...");
    let ids: Vec<I::Item> = player_ids.into_iter().collect();
    let total = ids.len();
    let mut out = BTreeMap::new();

    for (idx, pid) in ids.iter().enumerate() {
        let pid = pid.as_ref();
        if cancel.is_cancelled() {
            tracing::info!(done = idx, total, "match history cancelled");
            log.log("Stopped fetching match history on request.");
            break;
        }
        log.log(&format!(
            "Fetching match history for player {}/{total}: {pid}",
            idx + 1
        ));

        let history = fetch_player_history(source, pid, req, cancel, log).await;
        if history.is_empty() {
            tracing::warn!(player_id = pid, stop = ?history.stop, "no match history gathered");
            log.log(&format!("Could not fetch match history for player {pid}"));
        } else {
            out.insert(history.player_id, history.matches);
        }
    }

    out
}
