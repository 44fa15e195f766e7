use serde::Serialize;

use crate::core::{CrawlLog, DuprClient, DuprError, Pacing, net, paging::decode_page};
use crate::members::model::Member;

#[derive(Serialize)]
struct SortSpec {
    order: &'static str,
    parameter: &'static str,
}

#[derive(Serialize)]
struct RosterQuery<'a> {
    exclude: &'a [String],
    limit: u32,
    offset: u64,
    query: &'static str,
    sort: SortSpec,
}

impl DuprClient {
    /// Fetch the complete roster of a club, walking every page of the listing.
    ///
    /// # Errors
    ///
    /// Returns [`DuprError::Status`] if any page is answered with a non-2xx status,
    /// or a transport/decoding error if a page cannot be read.
    pub async fn fetch_roster(&self, club_id: &str) -> Result<Vec<Member>, DuprError> {
        self.fetch_roster_upto(club_id, usize::MAX, &Pacing::none()).await
    }

    /// Walk a club's roster until at least `want` members are in hand or the
    /// listing ends, sleeping `pacing.request_delay` between pages.
    ///
    /// The first page is always requested, so an inaccessible roster is reported
    /// even when `want` is zero. The result may hold more than `want` members.
    ///
    /// # Errors
    ///
    /// Same as [`DuprClient::fetch_roster`].
    #[tracing::instrument(skip(self, pacing), err)]
    pub async fn fetch_roster_upto(
        &self,
        club_id: &str,
        want: usize,
        pacing: &Pacing,
    ) -> Result<Vec<Member>, DuprError> {
        let path = format!("club/{club_id}/members/v1.0/all");
        let mut members = Vec::new();
        let mut at = 0u64;

        loop {
            let query = RosterQuery {
                exclude: &[],
                limit: self.roster_page_size(),
                offset: at,
                query: "*",
                sort: SortSpec {
                    order: "ASC",
                    parameter: "fullNameSort",
                },
            };
            let resp = net::ensure_success(self.post_json(&path, &query).await?)?;
            let body = net::get_text(resp, "club_members", club_id).await?;
            let page = decode_page::<Member>(&body)?;

            tracing::debug!(
                offset = at,
                hits = page.hits.len(),
                skipped = page.skipped,
                "roster page"
            );
            let next = if page.is_empty() {
                None
            } else {
                page.next_offset
            };
            members.extend(page.hits);

            match next {
                Some(n) if members.len() < want => {
                    pacing.pause().await;
                    at = n;
                }
                _ => break,
            }
        }

        Ok(members)
    }
}

/// Keep the first `max_members` entries, in source order. A cap of zero or
/// below yields an empty roster.
pub fn truncate(mut members: Vec<Member>, max_members: i64) -> Vec<Member> {
    let cap = usize::try_from(max_members).unwrap_or(0);
    members.truncate(cap);
    members
}

/// Fetch a club's roster and cap it at `max_members`.
///
/// Roster pages stop once the cap is covered, with `pacing` applied between
/// them. A roster that cannot be fetched is fatal to a crawl and is not retried.
///
/// # Errors
///
/// Returns [`DuprError::MembersUnavailable`] wrapping whatever failure the roster fetch hit.
pub async fn enumerate(
    client: &DuprClient,
    club_id: &str,
    max_members: i64,
    log: &mut dyn CrawlLog,
    pacing: &Pacing,
) -> Result<Vec<Member>, DuprError> {
    log.log("Fetching club members...");
    let want = usize::try_from(max_members).unwrap_or(0);
    let roster = client
        .fetch_roster_upto(club_id, want, pacing)
        .await
        .map_err(|e| {
            tracing::error!(club_id, error = %e, "roster fetch failed");
            DuprError::MembersUnavailable {
                club_id: club_id.to_string(),
                reason: e.to_string(),
            }
        })?;

    let fetched = roster.len();
    let members = truncate(roster, max_members);
    tracing::info!(club_id, fetched, kept = members.len(), "roster enumerated");
    log.log(&format!(
        "Found {fetched} members, keeping {}",
        members.len()
    ));
    Ok(members)
}
