//! Per-member profile enrichment.

mod api;
mod model;
mod wire;

pub use api::enrich;
pub use model::{PlayerDetail, Profile, RATING_NOT_AVAILABLE};
