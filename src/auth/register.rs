//! The registration page. Account creation happens entirely on the backend,
//! which sends a verification email before the account can log in.

use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    api::paths,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, auth_card, base,
        email_input, link, password_input,
    },
};

/// The minimum password length enforced client-side. The backend applies its
/// own validation on top.
const PASSWORD_MIN_LENGTH: u8 = 8;

/// The raw data entered by the user in the registration form.
#[derive(Clone, Deserialize)]
pub struct RegisterData {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// The JSON body the backend expects for sign-up.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignUpRequest<'a> {
    user_name: &'a str,
    email: &'a str,
    password: &'a str,
}

fn register_form(username: &str, email: &str, error_message: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::REGISTER_API)
            hx-target="this"
            hx-swap="outerHTML"
            class="space-y-4 md:space-y-6"
        {
            div
            {
                label for="username" class=(FORM_LABEL_STYLE) { "Username" }

                input
                    type="text"
                    name="username"
                    id="username"
                    placeholder="yourname"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    value=(username);
            }

            (email_input(email))
            (password_input("", PASSWORD_MIN_LENGTH, error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create account" }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Already have an account? "
                (link(endpoints::LOG_IN_VIEW, "Sign in"))
            }
        }
    }
}

/// Display the registration page.
pub async fn get_register_page() -> Response {
    Html(
        base(
            "Register",
            &[],
            &auth_card("Create an account", &register_form("", "", None)),
        )
        .into_string(),
    )
    .into_response()
}

/// Handler for registration requests via the POST method.
///
/// On success the form is replaced with a prompt to check the verification
/// email; the user cannot log in until the account is verified.
pub async fn post_register(
    State(state): State<AppState>,
    Form(user_data): Form<RegisterData>,
) -> Response {
    let request = SignUpRequest {
        user_name: &user_data.username,
        email: &user_data.email,
        password: &user_data.password,
    };

    let result: Result<Option<String>, Error> = state
        .api
        .post(paths::SIGN_UP, None, &[], &request)
        .await;

    match result {
        Ok(_) => Html(
            html! {
                div class="space-y-4"
                {
                    p class="text-gray-900 dark:text-white"
                    {
                        "Almost there! We have sent a verification email to "
                        strong { (user_data.email) }
                        ". Verify your address, then sign in."
                    }

                    p { (link(endpoints::LOG_IN_VIEW, "Back to sign in")) }
                }
            }
            .into_string(),
        )
        .into_response(),
        Err(Error::Api(reason)) => {
            tracing::warn!("backend refused the registration: {reason}");
            form_fragment(
                &user_data.username,
                &user_data.email,
                "Could not create the account. The email or username may already be in use.",
            )
        }
        Err(Error::Network(reason)) => {
            tracing::error!("could not reach the backend during registration: {reason}");
            form_fragment(
                &user_data.username,
                &user_data.email,
                "Cannot reach the server. Try again later.",
            )
        }
        Err(error) => {
            tracing::error!("unhandled error during registration: {error}");
            form_fragment(
                &user_data.username,
                &user_data.email,
                "An internal error occurred. Please try again later.",
            )
        }
    }
}

fn form_fragment(username: &str, email: &str, error_message: &str) -> Response {
    Html(register_form(username, email, Some(error_message)).into_string()).into_response()
}
