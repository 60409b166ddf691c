//! The logged-in user's session, stored client side in an encrypted cookie.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, api::SignInResponse};

pub(crate) const COOKIE_SESSION: &str = "session";
/// The default duration for which session cookies are valid.
pub(crate) const DEFAULT_COOKIE_DURATION: Duration = Duration::minutes(30);

/// The backend role name that grants access to the admin pages.
const ADMIN_ROLE: &str = "ROLE_ADMIN";

/// Everything the application needs to act on behalf of a logged-in user.
///
/// Stored as JSON in a single private cookie, so the browser holds the only
/// copy and the server keeps no session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Session {
    /// The bearer token the backend issued at sign-in.
    pub token: String,
    /// The backend's ID for this user.
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl Session {
    pub(crate) fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| role == ADMIN_ROLE)
    }
}

impl From<SignInResponse> for Session {
    fn from(response: SignInResponse) -> Self {
        Self {
            token: response.token,
            user_id: response.id,
            username: response.username,
            email: response.email,
            roles: response.roles,
        }
    }
}

/// Add a session cookie to the cookie jar, indicating that a user is logged in.
///
/// Sets the expiry of the cookie to `duration` from the current time.
/// You can use [DEFAULT_COOKIE_DURATION] for the default duration.
///
/// Returns the cookie jar with the cookie added.
///
/// # Errors
///
/// Returns [Error::SessionMissing] if the session cannot be serialized, which
/// indicates a bug rather than a user problem.
pub(crate) fn set_session_cookie(
    jar: PrivateCookieJar,
    session: &Session,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let value = serde_json::to_string(session).map_err(|error| {
        tracing::error!("could not serialize the session: {error}");
        Error::SessionMissing
    })?;
    let expiry = OffsetDateTime::now_utc() + duration;

    Ok(jar.add(
        Cookie::build((COOKIE_SESSION, value))
            .expires(expiry)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    ))
}

/// Set the session cookie to an invalid value and set its max age to zero,
/// which should delete the cookie on the client side.
pub(crate) fn invalidate_session_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_SESSION, "deleted"))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Retrieve the session from the cookie jar.
///
/// # Errors
///
/// Returns [Error::SessionMissing] if the cookie is absent or its contents do
/// not parse as a session.
pub(crate) fn get_session_from_cookies(jar: &PrivateCookieJar) -> Result<Session, Error> {
    let cookie = jar.get(COOKIE_SESSION).ok_or(Error::SessionMissing)?;

    serde_json::from_str(cookie.value_trimmed()).map_err(|_| Error::SessionMissing)
}
