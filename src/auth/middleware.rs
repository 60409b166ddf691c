//! Authentication middleware that validates the session cookie, refreshes its
//! expiry, and redirects logged-out users to the log in page.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{StatusCode, header::SET_COOKIE},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use time::Duration;

use crate::{
    AppState, endpoints,
    auth::redirect::build_log_in_redirect_url,
    session::{Session, get_session_from_cookies, set_session_cookie},
};

/// The state needed for the auth middleware
#[derive(Clone)]
pub struct AuthState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AuthState> for Key {
    fn from_ref(state: &AuthState) -> Self {
        state.cookie_key.clone()
    }
}

/// Middleware function that checks for a valid session cookie.
/// The session is placed into the request and the request executed normally if the cookie is
/// valid, otherwise a redirect to the log-in page is returned using `get_redirect`.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(session): Extension<Session>` to receive the session.
#[inline]
async fn auth_guard_internal(
    state: AuthState,
    request: Request,
    next: Next,
    get_redirect: impl Fn(&str) -> Response,
) -> Response {
    let log_in_redirect_url = build_log_in_redirect_url(&request)
        .unwrap_or_else(|| endpoints::LOG_IN_VIEW.to_owned());

    let (mut parts, body) = request.into_parts();
    let jar = match PrivateCookieJar::from_request_parts(&mut parts, &state).await {
        Ok(jar) => jar,
        Err(err) => {
            tracing::error!("Error getting cookie jar: {err:?}. Redirecting to log in page.");
            return get_redirect(&log_in_redirect_url);
        }
    };
    let session = match get_session_from_cookies(&jar) {
        Ok(session) => session,
        Err(_) => return get_redirect(&log_in_redirect_url),
    };

    parts.extensions.insert(session.clone());
    let request = Request::from_parts(parts, body);
    let response = next.run(request).await;

    // Sliding expiry: each authenticated request re-issues the cookie.
    let (mut parts, body) = response.into_parts();
    let jar = match set_session_cookie(jar.clone(), &session, state.cookie_duration) {
        Ok(updated_jar) => updated_jar,
        Err(err) => {
            tracing::error!("Error refreshing session cookie: {err:?}. Rolling back cookie jar.");
            jar
        }
    };
    for (key, val) in jar.into_response().headers().iter() {
        if key != SET_COOKIE {
            continue;
        }

        parts.headers.append(key, val.to_owned());
    }

    Response::from_parts(parts, body)
}

/// Middleware function that checks for a valid session cookie.
/// The session is placed into the request and the request executed normally if
/// the cookie is valid, otherwise a redirect to the log-in page is returned.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    auth_guard_internal(state, request, next, |redirect_url| {
        Redirect::to(redirect_url).into_response()
    })
    .await
}

/// Same as [auth_guard] but returns an HTMX redirect, for the fragment
/// endpoints under `/api` whose responses are swapped into the page.
pub async fn auth_guard_hx(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    auth_guard_internal(state, request, next, |redirect_url| {
        (HxRedirect(redirect_url.to_owned()), StatusCode::OK).into_response()
    })
    .await
}

/// Middleware function that requires the admin role on top of [auth_guard].
///
/// Must be layered inside [auth_guard] so the session extension is present.
/// Logged-in users without the admin role are sent to their own dashboard.
pub async fn admin_guard(request: Request, next: Next) -> Response {
    match request.extensions().get::<Session>() {
        Some(session) if session.is_admin() => next.run(request).await,
        Some(session) => {
            tracing::warn!(
                "user {} requested an admin page without the admin role",
                session.email
            );
            Redirect::to(endpoints::DASHBOARD_VIEW).into_response()
        }
        None => Redirect::to(endpoints::LOG_IN_VIEW).into_response(),
    }
}
