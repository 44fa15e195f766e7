use serde::{Deserialize, Serialize};

use crate::core::wire::{
    de_opt_f64_from_any, de_opt_string_from_any, de_opt_u32_from_any, de_string_from_any,
};

/// One entry of a club roster, as returned by the members endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Internal DUPR player id; used to address the player endpoints.
    #[serde(deserialize_with = "de_string_from_any")]
    pub id: String,
    /// The public, human-facing DUPR id (e.g. `"ABC123"`).
    #[serde(default, deserialize_with = "de_opt_string_from_any")]
    pub dupr_id: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "de_opt_u32_from_any")]
    pub age: Option<u32>,
    #[serde(default)]
    pub short_address: Option<String>,
    /// Singles rating as displayed by DUPR (`"3.512"`, `"NR"`, ...).
    #[serde(default, deserialize_with = "de_opt_string_from_any")]
    pub singles: Option<String>,
    /// Doubles rating as displayed by DUPR.
    #[serde(default, deserialize_with = "de_opt_string_from_any")]
    pub doubles: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string_from_any")]
    pub singles_verified: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string_from_any")]
    pub doubles_verified: Option<String>,
    /// Rating reliability in percent.
    #[serde(default, deserialize_with = "de_opt_f64_from_any")]
    pub singles_reliability: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64_from_any")]
    pub doubles_reliability: Option<f64>,
    #[serde(default)]
    pub club_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}
