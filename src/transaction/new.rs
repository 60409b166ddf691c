//! The new-transaction page: a category select plus amount, date and
//! description fields posting straight through to the backend.

use axum::{
    Extension, Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::{Date, format_description::well_known::Iso8601};

use crate::{
    AppState, Error,
    api::{Category, paths},
    auth::evict_session_and_redirect,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base, dollar_input_styles,
    },
    months::today,
    navigation::NavBar,
    session::Session,
};

/// The raw form data for a new transaction.
#[derive(Clone, Deserialize)]
pub struct NewTransactionData {
    pub category: i64,
    pub amount: f64,
    pub date: Date,
    #[serde(default)]
    pub description: String,
}

/// The JSON body the backend expects for a new transaction.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewTransactionRequest<'a> {
    email: &'a str,
    category_id: i64,
    description: &'a str,
    amount: f64,
    date: String,
}

/// Display the form for creating a transaction.
pub async fn get_new_transaction_page(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    jar: PrivateCookieJar,
) -> Response {
    let categories: Vec<Category> = match state
        .api
        .get(paths::CATEGORY_GET_ALL, Some(&session.token), &[])
        .await
    {
        Ok(categories) => categories.unwrap_or_default(),
        Err(Error::Unauthorized) => {
            return evict_session_and_redirect(jar, &state.redirect_guard, session.user_id);
        }
        Err(error) => {
            tracing::error!("could not load categories: {error}");
            return error.into_response();
        }
    };

    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto lg:py-5
            text-gray-900 dark:text-white"
        {
            div class="w-full max-w-md"
            {
                h2 class="text-xl font-bold mb-4" { "New Transaction" }

                @if categories.is_empty() {
                    p class="text-gray-500 dark:text-gray-400"
                    {
                        "No categories are available yet. Transactions need a \
                        category, ask an administrator to add some."
                    }
                } @else {
                    (new_transaction_form(&categories, None))
                }
            }
        }
    );

    Html(base("New Transaction", &[dollar_input_styles()], &content).into_string()).into_response()
}

/// Create a transaction on the backend, then redirect to the dashboard.
pub async fn post_transaction(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    jar: PrivateCookieJar,
    Form(data): Form<NewTransactionData>,
) -> Response {
    let date = data
        .date
        .format(&Iso8601::DATE)
        .unwrap_or_else(|_| data.date.to_string());

    let request = NewTransactionRequest {
        email: &session.email,
        category_id: data.category,
        description: &data.description,
        amount: data.amount,
        date,
    };

    let result: Result<Option<String>, Error> = state
        .api
        .post(paths::TRANSACTION_NEW, Some(&session.token), &[], &request)
        .await;

    match result {
        Ok(_) => {
            (
                HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
                StatusCode::OK,
            )
                .into_response()
        }
        Err(Error::Unauthorized) => {
            evict_session_and_redirect(jar, &state.redirect_guard, session.user_id)
        }
        Err(error) => {
            tracing::error!("could not create the transaction: {error}");
            error.into_alert_response()
        }
    }
}

fn new_transaction_form(categories: &[Category], error_message: Option<&str>) -> Markup {
    let max_date = today();

    html!(
        form
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="space-y-4 md:space-y-6"
        {
            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select
                    name="category"
                    id="category"
                    required
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for category in categories {
                        option value=(category.category_id)
                        {
                            (category.category_name)
                            @if category.is_expense() { " (expense)" } @else { " (income)" }
                        }
                    }
                }
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper w-full"
                {
                    input
                        type="number"
                        name="amount"
                        id="amount"
                        step="0.01"
                        min="0.01"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    type="date"
                    name="date"
                    id="date"
                    value=(max_date)
                    max=(max_date)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    type="text"
                    name="description"
                    id="description"
                    placeholder="What was this for?"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            @if let Some(error_message) = error_message
            {
                p class="text-red-500 text-base" { (error_message) }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add transaction" }
        }
    )
}
