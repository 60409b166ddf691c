//! This file defines the routes for displaying the log-in page and handling log-in requests.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    api::{SignInResponse, paths},
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, base, auth_card, email_input, link, password_input},
    session::{Session, set_session_cookie},
};

pub const INVALID_CREDENTIALS_ERROR_MSG: &str = "Incorrect email or password.";

/// The raw data entered by the user in the log-in form.
///
/// The email and password are sent to the backend as-is. There is no need for
/// validation here since the backend verifies them against its records.
#[derive(Clone, Serialize, Deserialize)]
pub struct LogInData {
    /// Email entered during log-in.
    pub email: String,
    /// Password entered during log-in.
    pub password: String,
}

fn log_in_form(email: &str, error_message: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::LOG_IN_API)
            hx-target="this"
            hx-swap="outerHTML"
            class="space-y-4 md:space-y-6"
        {
            (email_input(email))
            (password_input("", 0, error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Sign in" }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                (link(endpoints::FORGOT_PASSWORD_VIEW, "Forgot password?"))
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Don't have an account yet? "
                (link(endpoints::REGISTER_VIEW, "Register"))
            }
        }
    }
}

/// Display the log-in page.
pub async fn get_log_in_page(State(_state): State<AppState>) -> Response {
    Html(
        base(
            "Log In",
            &[],
            &auth_card("Sign in to your account", &log_in_form("", None)),
        )
        .into_string(),
    )
    .into_response()
}

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in request, the session cookie is set and the client
/// is redirected to the dashboard page (admins land on the user listing).
/// Otherwise, the form is returned with an error message explaining the problem.
pub async fn post_log_in(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<LogInData>,
) -> Response {
    let response: SignInResponse = match state.api.post_unwrapped(paths::SIGN_IN, &user_data).await
    {
        Ok(response) => response,
        Err(Error::Unauthorized) => {
            return form_fragment(&user_data.email, INVALID_CREDENTIALS_ERROR_MSG);
        }
        Err(Error::Network(reason)) => {
            tracing::error!("could not reach the backend during log in: {reason}");
            return form_fragment(
                &user_data.email,
                "Cannot reach the server. Try again later.",
            );
        }
        Err(Error::Api(reason)) => {
            tracing::warn!("backend refused the log in: {reason}");
            return form_fragment(
                &user_data.email,
                "Could not sign you in. Check that your account has been verified and enabled.",
            );
        }
        Err(error) => {
            tracing::error!("unhandled error during log in: {error}");
            return form_fragment(
                &user_data.email,
                "An internal error occurred. Please try again later.",
            );
        }
    };

    let session = Session::from(response);
    let landing_page = if session.is_admin() {
        endpoints::ADMIN_USERS_VIEW
    } else {
        endpoints::DASHBOARD_VIEW
    };

    match set_session_cookie(jar, &session, state.cookie_duration) {
        Ok(updated_jar) => {
            // A fresh log in clears this user's pending eviction claim so a
            // later expiry is reported again.
            state.redirect_guard.release(session.user_id);
            (
                StatusCode::SEE_OTHER,
                HxRedirect(landing_page.to_owned()),
                updated_jar,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("Error setting session cookie: {error}");
            (
                HxRedirect(endpoints::INTERNAL_ERROR_VIEW.to_owned()),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
                .into_response()
        }
    }
}

fn form_fragment(email: &str, error_message: &str) -> Response {
    Html(log_in_form(email, Some(error_message)).into_string()).into_response()
}
