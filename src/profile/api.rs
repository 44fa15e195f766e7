use tokio_util::sync::CancellationToken;

use crate::core::{CrawlLog, DuprClient, DuprError, Pacing, net, wire::Envelope};
use crate::members::Member;
use crate::profile::model::{PlayerDetail, Profile};
use crate::profile::wire::{self, PlayerNode};

impl DuprClient {
    /// Fetch the detail record of one player and read its display ratings.
    ///
    /// # Errors
    ///
    /// Returns [`DuprError::Status`] on a non-2xx answer and [`DuprError::Data`]
    /// if the body carries no `result`.
    #[tracing::instrument(skip(self), err)]
    pub async fn fetch_player_detail(&self, player_id: &str) -> Result<PlayerDetail, DuprError> {
        let resp = net::ensure_success(self.get(&format!("player/v1.0/{player_id}")).await?)?;
        let body = net::get_text(resp, "player", player_id).await?;
        let env: Envelope<PlayerNode> = serde_json::from_str(&body)?;
        let node = env.result.ok_or_else(|| {
            DuprError::Data(format!(
                "player {player_id}: missing result{}",
                env.message.map(|m| format!(" ({m})")).unwrap_or_default()
            ))
        })?;

        Ok(PlayerDetail {
            singles_display: wire::display_of(node.singles.as_ref()),
            doubles_display: wire::display_of(node.doubles.as_ref()),
        })
    }
}

/// Build one [`Profile`] per member, in roster order.
///
/// The token is polled before every member; once cancelled, the profiles built
/// so far are returned. A member whose detail lookup fails is logged and left
/// out, and the batch moves on. `pacing.request_delay` is slept after every
/// lookup, successful or not.
pub async fn enrich(
    client: &DuprClient,
    members: &[Member],
    cancel: &CancellationToken,
    log: &mut dyn CrawlLog,
    pacing: &Pacing,
) -> Vec<Profile> {
    log.log("Fetching member profiles...");
    let total = members.len();
    let mut profiles = Vec::with_capacity(total);

    for (idx, member) in members.iter().enumerate() {
        if cancel.is_cancelled() {
            tracing::info!(done = profiles.len(), total, "profile enrichment cancelled");
            log.log("Stopped fetching profiles on request.");
            break;
        }
        log.log(&format!(
            "  Processing player {}/{total}: {}",
            idx + 1,
            member.id
        ));

        match client.fetch_player_detail(&member.id).await {
            Ok(detail) => profiles.push(Profile::from_member(member, detail)),
            Err(e) => {
                tracing::warn!(player_id = %member.id, error = %e, "profile skipped");
                log.log(&format!("Failed to fetch profile {}: {e}", member.id));
            }
        }

        pacing.pause().await;
    }

    profiles
}
