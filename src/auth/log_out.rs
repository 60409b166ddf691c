//! Log out simply discards the session cookie; the backend keeps no session
//! state to tear down.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::PrivateCookieJar;

use crate::{endpoints, session::invalidate_session_cookie};

/// Invalidate the session cookie and redirect to the log in page.
pub async fn get_log_out(jar: PrivateCookieJar) -> Response {
    (
        invalidate_session_cookie(jar),
        Redirect::to(endpoints::LOG_IN_VIEW),
    )
        .into_response()
}
