use crate::core::DuprError;
use crate::history::PageOutcome;

/// Boxed future returned by the service traits.
pub type ServiceFuture<'a, T> = std::pin::Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// The two capabilities the match-history crawl needs from a session.
///
/// This decouples the paging/retry loop from the HTTP client, making it easier
/// to test. It is implemented by [`DuprClient`](crate::DuprClient).
pub trait HistorySource: Send + Sync {
    /// Request one page of a player's match history and classify the answer.
    ///
    /// # Arguments
    /// * `player_id` - Internal DUPR id of the player.
    /// * `limit` - Page size.
    /// * `offset` - Paging cursor; `0` for the newest matches.
    fn history_page<'a>(
        &'a self,
        player_id: &'a str,
        limit: u32,
        offset: u64,
    ) -> ServiceFuture<'a, PageOutcome>;

    /// Refresh the session after the API rejected its credentials.
    fn reauthenticate(&self) -> ServiceFuture<'_, Result<(), DuprError>>;
}
