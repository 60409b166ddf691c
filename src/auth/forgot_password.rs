//! The forgot-password page. The backend drives the actual reset flow over
//! email; this page only kicks it off.

use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    api::paths,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, auth_card, base, email_input, link},
};

#[derive(Clone, Deserialize)]
pub struct ForgotPasswordData {
    pub email: String,
}

fn forgot_password_form(email: &str, error_message: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::FORGOT_PASSWORD_API)
            hx-target="this"
            hx-swap="outerHTML"
            class="space-y-4 md:space-y-6"
        {
            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Enter the email address for your account and we will send \
                you a verification code to reset your password."
            }

            (email_input(email))

            @if let Some(error_message) = error_message
            {
                p class="text-red-500 text-base" { (error_message) }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Send reset email" }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                (link(endpoints::LOG_IN_VIEW, "Back to sign in"))
            }
        }
    }
}

/// Display the forgot-password page.
pub async fn get_forgot_password_page() -> Response {
    Html(
        base(
            "Forgot Password",
            &[],
            &auth_card("Reset your password", &forgot_password_form("", None)),
        )
        .into_string(),
    )
    .into_response()
}

/// Ask the backend to email a password-reset verification code.
pub async fn post_forgot_password(
    State(state): State<AppState>,
    Form(data): Form<ForgotPasswordData>,
) -> Response {
    let result: Result<Option<String>, Error> = state
        .api
        .get(
            paths::FORGOT_PASSWORD_VERIFY_EMAIL,
            None,
            &[("email", data.email.clone())],
        )
        .await;

    match result {
        Ok(_) => Html(
            html! {
                div class="space-y-4"
                {
                    p class="text-gray-900 dark:text-white"
                    {
                        "We have sent a verification code to "
                        strong { (data.email) }
                        ". Follow the instructions in the email to finish \
                        resetting your password."
                    }

                    p { (link(endpoints::LOG_IN_VIEW, "Back to sign in")) }
                }
            }
            .into_string(),
        )
        .into_response(),
        Err(Error::Api(reason)) => {
            tracing::warn!("backend refused the password reset: {reason}");
            form_fragment(&data.email, "No account was found for that email address.")
        }
        Err(Error::Network(reason)) => {
            tracing::error!("could not reach the backend for a password reset: {reason}");
            form_fragment(&data.email, "Cannot reach the server. Try again later.")
        }
        Err(error) => {
            tracing::error!("unhandled error during password reset: {error}");
            form_fragment(&data.email, "An internal error occurred. Please try again later.")
        }
    }
}

fn form_fragment(email: &str, error_message: &str) -> Response {
    Html(forgot_password_form(email, Some(error_message)).into_string()).into_response()
}
