use serde::Serialize;

use crate::members::Member;

/// Placeholder used when the detail endpoint carries no display rating.
pub const RATING_NOT_AVAILABLE: &str = "N/A";

/// Display ratings read from a player's detail record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerDetail {
    pub singles_display: Option<String>,
    pub doubles_display: Option<String>,
}

/// A roster member enriched with the display ratings from the player endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub dupr_id: Option<String>,
    pub full_name: Option<String>,
    pub gender: Option<String>,
    pub age: Option<u32>,
    pub short_address: Option<String>,
    pub singles: Option<String>,
    pub doubles: Option<String>,
    pub singles_verified: Option<String>,
    pub doubles_verified: Option<String>,
    pub singles_reliability: Option<f64>,
    pub doubles_reliability: Option<f64>,
    /// Detailed singles rating, or `"N/A"`.
    #[serde(rename = "singles_rating")]
    pub singles_rating: String,
    /// Detailed doubles rating, or `"N/A"`.
    #[serde(rename = "doubles_rating")]
    pub doubles_rating: String,
}

impl Profile {
    /// Copy the roster fields a profile carries and merge in the detail ratings.
    pub fn from_member(member: &Member, detail: PlayerDetail) -> Self {
        Self {
            id: member.id.clone(),
            dupr_id: member.dupr_id.clone(),
            full_name: member.full_name.clone(),
            gender: member.gender.clone(),
            age: member.age,
            short_address: member.short_address.clone(),
            singles: member.singles.clone(),
            doubles: member.doubles.clone(),
            singles_verified: member.singles_verified.clone(),
            doubles_verified: member.doubles_verified.clone(),
            singles_reliability: member.singles_reliability,
            doubles_reliability: member.doubles_reliability,
            singles_rating: detail
                .singles_display
                .unwrap_or_else(|| RATING_NOT_AVAILABLE.to_string()),
            doubles_rating: detail
                .doubles_display
                .unwrap_or_else(|| RATING_NOT_AVAILABLE.to_string()),
        }
    }
}
