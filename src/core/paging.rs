//! Decoding of DUPR's offset-paged listings.

use crate::core::DuprError;
use crate::core::wire::{Envelope, PageNode};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// One decoded page: its hits plus the cursor for the next request.
///
/// `next_offset == None` means the server has nothing after this page.
/// Hits that could not be decoded are dropped and counted in `skipped`.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub next_offset: Option<u64>,
    pub hits: Vec<T>,
    pub skipped: usize,
}

impl<T> Page<T> {
    /// Whether the server returned no hits at all, decodable or not.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty() && self.skipped == 0
    }

    /// Whether this page ends the listing, either by carrying no hits or no cursor.
    pub fn is_last(&self) -> bool {
        self.is_empty() || self.next_offset.is_none()
    }
}

/// Decode a paged response body of the form
/// `{"result": {"offset": 0, "limit": 10, "total": 35, "hits": [...]}}`.
///
/// The next cursor is `offset + limit` while that is still below `total`. Responses
/// without a `total` are assumed to continue as long as pages come back full. A
/// cursor that would overflow ends the listing.
///
/// Each hit is decoded on its own; one that does not fit `T` is logged and
/// skipped without losing the rest of the page.
///
/// # Errors
///
/// Returns [`DuprError::Json`] if the body is not valid JSON of that shape and
/// [`DuprError::Data`] if `result` is absent.
pub fn decode_page<T: DeserializeOwned>(body: &str) -> Result<Page<T>, DuprError> {
    let env: Envelope<PageNode<Value>> = serde_json::from_str(body)?;
    let node = env.result.ok_or_else(|| {
        DuprError::Data(format!(
            "paged response without result{}",
            env.message.map(|m| format!(": {m}")).unwrap_or_default()
        ))
    })?;

    let offset = node.offset.unwrap_or(0);
    let returned = node.hits.len() as u64;
    let limit = node.limit.unwrap_or(returned);

    let next_offset = match node.total {
        Some(total) => offset
            .checked_add(limit)
            .filter(|next| limit > 0 && *next < total),
        None if limit > 0 && returned >= limit => offset.checked_add(returned),
        None => None,
    };

    let mut skipped = 0;
    let hits = node
        .hits
        .into_iter()
        .enumerate()
        .filter_map(|(idx, raw)| match serde_json::from_value(raw) {
            Ok(hit) => Some(hit),
            Err(e) => {
                tracing::warn!(offset, idx, error = %e, "skipping undecodable hit");
                skipped += 1;
                None
            }
        })
        .collect();

    Ok(Page {
        next_offset,
        hits,
        skipped,
    })
}
