//! dupr-rs: DUPR club crawler.
//!
//! Fetches a club's roster, enriches each member with their detailed ratings and
//! pages through per-player match histories, under a shared retry budget,
//! token refresh and cooperative cancellation. The result is a single
//! [`CrawlResult`] handed to whatever builds the report.

pub mod core;
pub mod crawl;
pub mod history;
pub mod members;
pub mod profile;

pub use crate::core::{
    Backoff, CrawlLog, DuprClient, DuprClientBuilder, DuprError, NullLog, Pacing, RetryConfig,
    TracingLog,
};
pub use crawl::{ClubCrawl, ClubInfo, CrawlResult};
pub use history::{HistoryStop, MatchOutcome, MatchRecord, MatchRow, PlayerHistory};
pub use members::Member;
pub use profile::Profile;

/// Install a `tracing` subscriber honoring `RUST_LOG`. Dev-only convenience.
#[cfg(feature = "tracing-subscriber")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
