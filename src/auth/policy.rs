//! The policy for backend 401 responses.
//!
//! A 401 means the bearer token is no longer accepted, so the session cookie
//! must be evicted and the user sent back to the log in page. Two exceptions
//! apply: report-export downloads and admin listings surface the failure
//! inline instead, so a transient backend auth hiccup does not kick an
//! admin out of a half-finished page. Handlers for those routes call
//! [crate::Error::into_alert_response] directly rather than this module.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::PrivateCookieJar;

use crate::{endpoints, session::invalidate_session_cookie};

/// Tracks which users are mid-eviction so concurrent 401s for the same
/// session are reported once.
///
/// Several in-flight requests can all hit a 401 when a token expires. Every
/// one of them invalidates the cookie (the removal cookie is idempotent);
/// the claim only dedupes the eviction log line per user. A successful log
/// in releases that user's claim so a later expiry is reported again.
#[derive(Debug, Clone, Default)]
pub(crate) struct RedirectGuard {
    evicting: Arc<Mutex<HashSet<i64>>>,
}

impl RedirectGuard {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Mark `user_id` as mid-eviction. Returns true for exactly one caller
    /// per user until [RedirectGuard::release] is called for that user.
    pub(crate) fn claim(&self, user_id: i64) -> bool {
        self.evicting
            .lock()
            .expect("the redirect guard mutex was poisoned")
            .insert(user_id)
    }

    /// Clear `user_id`'s claim so their next expired session is reported.
    pub(crate) fn release(&self, user_id: i64) {
        self.evicting
            .lock()
            .expect("the redirect guard mutex was poisoned")
            .remove(&user_id);
    }
}

/// Evict the session and redirect to the log in page.
///
/// The cookie is invalidated on every call; clearing an already-cleared
/// session is harmless and leaves no request without the removal cookie.
pub(crate) fn evict_session_and_redirect(
    jar: PrivateCookieJar,
    guard: &RedirectGuard,
    user_id: i64,
) -> Response {
    if guard.claim(user_id) {
        tracing::info!("backend rejected the session token for user {user_id}, logging them out");
    }

    (
        invalidate_session_cookie(jar),
        Redirect::to(endpoints::LOG_IN_VIEW),
    )
        .into_response()
}
