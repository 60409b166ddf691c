//! Implements a struct that holds the state of the web server.

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{
    api::ApiClient, auth::RedirectGuard, fetch::FetchGate, pagination::PaginationConfig,
    session::DEFAULT_COOKIE_DURATION,
};

/// The state of the web server.
#[derive(Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    /// The client for the MyPockit REST backend.
    pub api: ApiClient,
    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
    /// Serializes session eviction when concurrent requests hit a 401.
    pub(crate) redirect_guard: RedirectGuard,
    /// Discards a user's statistics fetches superseded by their own newer
    /// page load.
    pub(crate) statistics_gate: FetchGate,
    /// Discards a user's dashboard fetches superseded by their own newer
    /// month selection.
    pub(crate) dashboard_gate: FetchGate,
}

impl AppState {
    /// Create a new [AppState].
    pub fn new(cookie_secret: &str, api: ApiClient, pagination_config: PaginationConfig) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            api,
            pagination_config,
            redirect_guard: RedirectGuard::new(),
            statistics_gate: FetchGate::new(),
            dashboard_gate: FetchGate::new(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret` string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}
