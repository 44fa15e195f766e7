//! Core components of the `dupr-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`DuprClient`] session and its builder.
//! - The primary [`DuprError`] type.
//! - The paging contract shared by every listing endpoint.
//! - Retry and pacing configuration for the crawl.

/// The main client (`DuprClient`), builder, and configuration.
pub mod client;
/// The primary error type (`DuprError`) for the crate.
pub mod error;
/// The `CrawlLog` progress sink.
pub mod log;
/// Offset-paged response decoding.
pub mod paging;
/// Service traits for abstracting the session behind the history crawl.
pub mod services;
pub(crate) mod wire;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::DuprClient`
pub use client::{Backoff, Credentials, DuprClient, DuprClientBuilder, Pacing, RetryConfig};
pub use error::DuprError;
pub use log::{CrawlLog, NullLog, TracingLog};
pub use paging::{Page, decode_page};
pub use services::{HistorySource, ServiceFuture};
