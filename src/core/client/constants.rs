//! Centralized constants for default endpoints and UA.

/// Default desktop UA to avoid trivial bot blocking.
pub(crate) const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (X11; Linux x86_64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/122.0.0.0 Safari/537.36"
);

/// DUPR backend API base.
pub(crate) const DEFAULT_BASE_URL: &str = "https://api.dupr.gg/";

/// Login endpoint, relative to the base.
pub(crate) const LOGIN_PATH: &str = "auth/v1.0/login/";

/// Page size used while walking a club roster.
pub(crate) const DEFAULT_ROSTER_PAGE_SIZE: u32 = 20;

pub(crate) const ENV_EMAIL: &str = "DUPR_EMAIL";
pub(crate) const ENV_PASSWORD: &str = "DUPR_PASSWORD";
pub(crate) const ENV_BASE_URL: &str = "DUPR_BASE_URL";
