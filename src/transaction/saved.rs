//! The saved (recurring) transactions page. The backend tracks recurring
//! plans and reports when each is due; the user confirms or skips each
//! occurrence.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    AppState, Error,
    api::{EXPENSE_TYPE_ID, SavedTransaction, paths},
    auth::evict_session_and_redirect,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, base, format_currency},
    navigation::NavBar,
    session::Session,
};

/// Display the user's saved transactions with their due information.
pub async fn get_saved_page(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    jar: PrivateCookieJar,
) -> Response {
    let result: Result<Option<Vec<SavedTransaction>>, Error> = state
        .api
        .get(
            paths::SAVED_TRANSACTION_GET,
            Some(&session.token),
            &[("email", session.email.clone())],
        )
        .await;

    let plans = match result {
        Ok(plans) => plans.unwrap_or_default(),
        Err(Error::Unauthorized) => {
            return evict_session_and_redirect(jar, &state.redirect_guard, session.user_id);
        }
        Err(error) => {
            tracing::error!("could not load saved transactions: {error}");
            return error.into_response();
        }
    };

    let nav_bar = NavBar::new(endpoints::SAVED_VIEW).into_html();

    // Plans without due information are dormant and stay hidden.
    let due_plans: Vec<&SavedTransaction> = plans
        .iter()
        .filter(|plan| plan.due_information.is_some())
        .collect();

    let content = html!(
        (nav_bar)

        div class="flex flex-col px-2 lg:px-6 lg:py-8 mx-auto w-full
            max-w-screen-xl text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold mb-4" { "Saved Transactions" }

            @if due_plans.is_empty() {
                p class="text-gray-500 dark:text-gray-400 py-8 text-center"
                {
                    "No saved transactions are due."
                }
            } @else {
                div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4"
                {
                    @for plan in &due_plans {
                        (saved_transaction_card(plan))
                    }
                }
            }
        }
    );

    Html(base("Saved Transactions", &[], &content).into_string()).into_response()
}

/// Confirm a due saved transaction, recording it as a real transaction.
pub async fn post_confirm_saved(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    jar: PrivateCookieJar,
    Path(plan_id): Path<i64>,
) -> Response {
    saved_transaction_action(&state, &session, jar, paths::SAVED_TRANSACTION_CONFIRM, plan_id).await
}

/// Skip the current occurrence of a saved transaction.
pub async fn post_skip_saved(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    jar: PrivateCookieJar,
    Path(plan_id): Path<i64>,
) -> Response {
    saved_transaction_action(&state, &session, jar, paths::SAVED_TRANSACTION_SKIP, plan_id).await
}

async fn saved_transaction_action(
    state: &AppState,
    session: &Session,
    jar: PrivateCookieJar,
    path: &str,
    plan_id: i64,
) -> Response {
    let result: Result<Option<String>, Error> = state
        .api
        .post(
            path,
            Some(&session.token),
            &[("planId", plan_id.to_string())],
            &serde_json::json!({}),
        )
        .await;

    match result {
        Ok(_) => {
            (
                HxRedirect(endpoints::SAVED_VIEW.to_owned()),
                StatusCode::OK,
            )
                .into_response()
        }
        Err(Error::Unauthorized) => {
            evict_session_and_redirect(jar, &state.redirect_guard, session.user_id)
        }
        Err(error) => {
            tracing::error!("saved transaction action failed: {error}");
            error.into_alert_response()
        }
    }
}

fn saved_transaction_card(plan: &SavedTransaction) -> Markup {
    let confirm_endpoint =
        crate::endpoints::format_endpoint(endpoints::SAVED_CONFIRM_API, plan.plan_id);
    let skip_endpoint = crate::endpoints::format_endpoint(endpoints::SAVED_SKIP_API, plan.plan_id);

    html!(
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                dark:border-gray-700 rounded-lg p-4 shadow-md
                flex flex-col justify-between"
        {
            div
            {
                div class="flex justify-between items-baseline mb-2"
                {
                    h3 class="font-semibold" { (plan.category_name) }

                    @if plan.transaction_type == EXPENSE_TYPE_ID {
                        span class="text-red-600 dark:text-red-400"
                        {
                            "-" (format_currency(plan.amount))
                        }
                    } @else {
                        span class="text-green-600 dark:text-green-400"
                        {
                            "+" (format_currency(plan.amount))
                        }
                    }
                }

                @if let Some(description) = &plan.description {
                    p class="text-sm text-gray-600 dark:text-gray-400 mb-2" { (description) }
                }

                @if let Some(due) = &plan.due_information {
                    p class="text-sm font-medium mb-2" { (due) }
                }

                @if let Some(frequency) = &plan.frequency {
                    p class="text-xs text-gray-500 dark:text-gray-400 mb-4" { (frequency) }
                }
            }

            div class="flex gap-2"
            {
                button
                    hx-post=(confirm_endpoint)
                    hx-target-error="#alert-container"
                    class=(BUTTON_PRIMARY_STYLE)
                {
                    "Confirm"
                }

                button
                    hx-post=(skip_endpoint)
                    hx-target-error="#alert-container"
                    class=(BUTTON_SECONDARY_STYLE)
                {
                    "Skip"
                }
            }
        }
    )
}

#[cfg(test)]
mod saved_transactions_tests {
    use axum::{
        Json, Router,
        extract::Query,
        http::StatusCode,
        middleware,
        routing::{get, post},
    };
    use axum_test::TestServer;
    use serde_json::json;
    use std::collections::HashMap;

    use crate::{
        AppState, endpoints,
        auth::{auth_guard, auth_guard_hx},
        pagination::PaginationConfig,
        session::{COOKIE_SESSION, Session, set_session_cookie},
        test_utils::assert_valid_html,
        test_utils::backend::serve_backend,
    };

    use super::{get_saved_page, post_confirm_saved, post_skip_saved};

    fn test_app(state: AppState) -> Router {
        Router::new()
            .route(
                endpoints::SAVED_VIEW,
                get(get_saved_page)
                    .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard)),
            )
            .route(
                endpoints::SAVED_CONFIRM_API,
                post(post_confirm_saved)
                    .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
            )
            .route(
                endpoints::SAVED_SKIP_API,
                post(post_skip_saved)
                    .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
            )
            .route(
                "/stub_log_in",
                get(
                    |axum::extract::State(state): axum::extract::State<AppState>,
                     jar: axum_extra::extract::PrivateCookieJar| async move {
                        set_session_cookie(
                            jar,
                            &Session {
                                token: "a.jwt.token".to_owned(),
                                user_id: 1,
                                username: "testuser".to_owned(),
                                email: "test@example.com".to_owned(),
                                roles: vec!["ROLE_USER".to_owned()],
                            },
                            state.cookie_duration,
                        )
                    },
                ),
            )
            .with_state(state)
    }

    fn saved_backend() -> Router {
        Router::new().route(
            "/savedTransaction/getByUser",
            get(|| async {
                Json(json!({
                    "status": "SUCCESS",
                    "response": [
                        {
                            "planId": 1,
                            "categoryName": "Rent",
                            "transactionType": 1,
                            "description": "Monthly rent",
                            "amount": 900.0,
                            "dueInformation": "Due in 3 days",
                            "frequency": "Monthly",
                        },
                        {
                            "planId": 2,
                            "categoryName": "Salary",
                            "transactionType": 2,
                            "description": null,
                            "amount": 500.0,
                            "dueInformation": null,
                            "frequency": "Monthly",
                        },
                    ],
                }))
            }),
        )
    }

    #[tokio::test]
    async fn only_due_plans_are_shown() {
        let (api, _backend) = serve_backend(saved_backend()).await;
        let state = AppState::new("foobar", api, PaginationConfig::default());
        let server = TestServer::new(test_app(state));

        let response = server.get("/stub_log_in").await;
        let session_cookie = response.cookie(COOKIE_SESSION);

        let response = server
            .get(endpoints::SAVED_VIEW)
            .add_cookie(session_cookie)
            .await;

        response.assert_status_ok();
        let text = response.text();
        assert_valid_html(&scraper::Html::parse_document(&text));

        assert!(text.contains("Monthly rent"));
        assert!(text.contains("Due in 3 days"));
        // The dormant salary plan stays hidden.
        assert!(!text.contains("Salary"));
    }

    #[tokio::test]
    async fn confirming_a_plan_posts_its_id() {
        let backend = saved_backend().route(
            "/savedTransaction/confirm",
            post(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params["planId"], "1");
                Json(json!({"status": "SUCCESS", "response": "Transaction added"}))
            }),
        );
        let (api, _backend) = serve_backend(backend).await;
        let state = AppState::new("foobar", api, PaginationConfig::default());
        let server = TestServer::new(test_app(state));

        let response = server.get("/stub_log_in").await;
        let session_cookie = response.cookie(COOKIE_SESSION);

        let response = server
            .post("/api/saved/1/confirm")
            .add_cookie(session_cookie)
            .await;

        response.assert_status_ok();
        assert_eq!(response.header("hx-redirect"), endpoints::SAVED_VIEW);
    }

    #[tokio::test]
    async fn a_failed_skip_shows_an_alert() {
        let backend = saved_backend().route(
            "/savedTransaction/skip",
            post(|| async { Json(json!({"status": "FAILED", "response": "Plan not found"})) }),
        );
        let (api, _backend) = serve_backend(backend).await;
        let state = AppState::new("foobar", api, PaginationConfig::default());
        let server = TestServer::new(test_app(state));

        let response = server.get("/stub_log_in").await;
        let session_cookie = response.cookie(COOKIE_SESSION);

        let response = server
            .post("/api/saved/7/skip")
            .add_cookie(session_cookie)
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        response.assert_text_contains("Request failed");
    }
}
