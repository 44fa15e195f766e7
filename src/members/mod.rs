//! Club roster enumeration.

mod api;
mod model;

pub use api::{enumerate, truncate};
pub use model::Member;
