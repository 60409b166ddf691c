//! The dashboard page: month selector, figure cards, expense-by-category
//! chart and the monthly budget panel.

use axum::{
    Extension, Form,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{AxisLabel, AxisType},
    series::Bar,
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    api::{Category, paths},
    auth::evict_session_and_redirect,
    charts::{PageChart, chart_container, charts_script, currency_formatter, currency_tooltip,
        echarts_library},
    dashboard::summary::{DashboardSummary, load_dashboard_summary, save_budget},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base, dollar_input_styles,
        format_currency,
    },
    months::{MonthBucket, today, trailing_months_newest_first},
    navigation::NavBar,
    session::Session,
};

/// Query parameters for the dashboard page.
#[derive(Deserialize)]
pub struct DashboardQuery {
    /// The selected month encoded as `month-year`, e.g. `8-2026`.
    month: Option<String>,
}

/// Form data for saving a new monthly budget.
#[derive(Deserialize)]
pub struct BudgetForm {
    pub amount: f64,
    /// The selected month encoded as `month-year`, carried through so the
    /// refetch targets the month being viewed.
    pub month: Option<String>,
}

/// Display the dashboard for the selected month (current month by default).
pub async fn get_dashboard_page(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<DashboardQuery>,
    jar: PrivateCookieJar,
) -> Response {
    let months = trailing_months_newest_first(today());
    let selected = selected_month(&months, query.month.as_deref());
    let fetch = state.dashboard_gate.begin(session.user_id);

    // The category list feeds the breakdown; any other failure just skips the
    // breakdown for this cycle.
    let categories = match load_categories(&state, &session).await {
        Ok(categories) => categories,
        Err(Error::Unauthorized) => {
            return evict_session_and_redirect(jar, &state.redirect_guard, session.user_id);
        }
        Err(error) => {
            tracing::warn!("could not load categories for the dashboard: {error}");
            None
        }
    };

    let summary = match load_dashboard_summary(
        &state.api,
        &session,
        &selected,
        categories.as_deref(),
        &fetch,
    )
    .await
    {
        Ok(Some(summary)) => summary,
        // A newer request superseded this one; htmx ignores a 204.
        Ok(None) => return StatusCode::NO_CONTENT.into_response(),
        Err(Error::Unauthorized) => {
            return evict_session_and_redirect(jar, &state.redirect_guard, session.user_id);
        }
        Err(error) => {
            tracing::error!("could not load the dashboard summary: {error}");
            return error.into_response();
        }
    };

    dashboard_view(&months, &selected, &summary)
}

/// Save a new monthly budget and re-render the budget panel.
pub async fn post_budget(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    jar: PrivateCookieJar,
    Form(form): Form<BudgetForm>,
) -> Response {
    let months = trailing_months_newest_first(today());
    let selected = selected_month(&months, form.month.as_deref());

    match save_budget(&state.api, &session, &selected, form.amount).await {
        Ok(budget) => Html(budget_panel(budget, &selected).into_string()).into_response(),
        Err(Error::Unauthorized) => {
            evict_session_and_redirect(jar, &state.redirect_guard, session.user_id)
        }
        Err(error) => {
            tracing::error!("could not save the budget: {error}");
            error.into_alert_response()
        }
    }
}

async fn load_categories(
    state: &AppState,
    session: &Session,
) -> Result<Option<Vec<Category>>, Error> {
    state
        .api
        .get(paths::CATEGORY_GET_ALL, Some(&session.token), &[])
        .await
}

/// The bucket named by `encoded`, or the current month when absent or
/// unrecognized.
fn selected_month(months: &[MonthBucket], encoded: Option<&str>) -> MonthBucket {
    encoded
        .and_then(|value| {
            let (month, year) = value.split_once('-')?;
            let month: u8 = month.parse().ok()?;
            let year: i32 = year.parse().ok()?;

            months
                .iter()
                .find(|bucket| bucket.id == month && bucket.year == year)
                .cloned()
        })
        .unwrap_or_else(|| months[0].clone())
}

fn month_value(month: &MonthBucket) -> String {
    format!("{}-{}", month.id, month.year)
}

fn dashboard_view(
    months: &[MonthBucket],
    selected: &MonthBucket,
    summary: &DashboardSummary,
) -> Response {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let chart = (!summary.category_breakdown.is_empty()).then(|| PageChart {
        id: "category-breakdown-chart",
        options: category_breakdown_chart(summary).to_string(),
    });

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
            max-w-screen-xl text-gray-900 dark:text-white"
        {
            (month_selector(months, selected))
            (figure_cards(summary))

            section
                id="charts"
                class="w-full mx-auto mb-4"
            {
                div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
                {
                    @if let Some(chart) = &chart {
                        (chart_container(chart))
                    } @else {
                        div class="flex items-center justify-center min-h-[380px]
                            rounded bg-gray-50 dark:bg-gray-800"
                        {
                            p class="text-gray-500 dark:text-gray-400"
                            {
                                "No expenses recorded for " (selected.label()) "."
                            }
                        }
                    }

                    (budget_panel(summary.budget, selected))
                }
            }
        }
    );

    let mut scripts = vec![dollar_input_styles()];
    if let Some(chart) = &chart {
        scripts.push(echarts_library());
        scripts.push(charts_script(std::slice::from_ref(chart)));
    }

    Html(base("Dashboard", &scripts, &content).into_string()).into_response()
}

fn month_selector(months: &[MonthBucket], selected: &MonthBucket) -> Markup {
    html!(
        form
            method="get"
            action=(endpoints::DASHBOARD_VIEW)
            class="w-full mb-4"
        {
            label for="month" class=(FORM_LABEL_STYLE) { "Month" }

            select
                name="month"
                id="month"
                class=(FORM_TEXT_INPUT_STYLE)
                hx-get=(endpoints::DASHBOARD_VIEW)
                hx-target="body"
                hx-push-url="true"
            {
                @for month in months {
                    option
                        value=(month_value(month))
                        selected[month == selected]
                    {
                        (month.label())
                    }
                }
            }
        }
    )
}

fn figure_cards(summary: &DashboardSummary) -> Markup {
    let figures = [
        ("Total income", format_currency(summary.income)),
        ("Total expenses", format_currency(summary.expense)),
        ("Cash in hand", format_currency(summary.cash_in_hand)),
        ("Transactions", summary.transaction_count.to_string()),
    ];

    html!(
        section class="w-full mx-auto mb-4" {
            div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4"
            {
                @for (title, value) in figures {
                    div
                        class="bg-white dark:bg-gray-800 border border-gray-200
                            dark:border-gray-700 rounded-lg p-4 shadow-md"
                    {
                        p class="text-sm text-gray-600 dark:text-gray-400" { (title) }
                        p class="text-2xl font-semibold" { (value) }
                    }
                }
            }
        }
    )
}

fn budget_panel(budget: f64, selected: &MonthBucket) -> Markup {
    html!(
        div
            id="budget-panel"
            class="bg-white dark:bg-gray-800 border border-gray-200
                dark:border-gray-700 rounded-lg p-4 shadow-md"
        {
            h3 class="text-xl font-semibold mb-2" { "Monthly budget" }

            p class="text-2xl font-semibold mb-4" { (format_currency(budget)) }

            form
                hx-post=(endpoints::BUDGET_API)
                hx-target="#budget-panel"
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                class="space-y-4"
            {
                input type="hidden" name="month" value=(month_value(selected));

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "New budget" }

                    div class="input-wrapper w-full"
                    {
                        input
                            type="number"
                            name="amount"
                            id="amount"
                            step="0.01"
                            min="0"
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save budget" }
            }
        }
    )
}

fn category_breakdown_chart(summary: &DashboardSummary) -> Chart {
    let labels: Vec<String> = summary
        .category_breakdown
        .iter()
        .map(|slice| slice.name.clone())
        .collect();
    let amounts: Vec<f64> = summary
        .category_breakdown
        .iter()
        .map(|slice| slice.amount)
        .collect();

    Chart::new()
        .title(Title::new().text("Expenses by category"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Expenses").data(amounts))
}

#[cfg(test)]
mod dashboard_page_tests {
    use axum::{
        Json, Router,
        extract::Query,
        middleware,
        routing::{get, post},
    };
    use axum_test::TestServer;
    use scraper::Selector;
    use serde_json::json;
    use std::collections::HashMap;

    use crate::{
        AppState, endpoints,
        auth::{auth_guard, auth_guard_hx},
        months::{today, trailing_months_newest_first},
        pagination::PaginationConfig,
        session::{COOKIE_SESSION, Session, set_session_cookie},
        test_utils::assert_valid_html,
        test_utils::backend::serve_backend,
    };

    use super::{get_dashboard_page, post_budget, selected_month};

    fn mock_backend() -> Router {
        Router::new()
            .route(
                "/category/getAll",
                get(|| async {
                    Json(json!({
                        "status": "SUCCESS",
                        "response": [
                            {
                                "categoryId": 1,
                                "categoryName": "Groceries",
                                "transactionType": {"transactionTypeId": 1},
                            },
                        ],
                    }))
                }),
            )
            .route(
                "/report/getTotalIncomeOrExpense",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    let total = if params["transactionTypeId"] == "2" {
                        500.0
                    } else {
                        120.0
                    };
                    Json(json!({"status": "SUCCESS", "response": total}))
                }),
            )
            .route(
                "/report/getTotalNoOfTransactions",
                get(|| async { Json(json!({"status": "SUCCESS", "response": 7})) }),
            )
            .route(
                "/report/getTotalByCategory",
                get(|| async { Json(json!({"status": "SUCCESS", "response": 80.5})) }),
            )
            .route(
                "/budget/getByUser",
                get(|| async { Json(json!({"status": "SUCCESS", "response": 300.0})) }),
            )
            .route(
                "/budget/new",
                post(|| async { Json(json!({"status": "SUCCESS", "response": null})) }),
            )
    }

    fn test_app(state: AppState) -> Router {
        Router::new()
            .route(
                endpoints::DASHBOARD_VIEW,
                get(get_dashboard_page)
                    .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard)),
            )
            .route(
                endpoints::BUDGET_API,
                post(post_budget)
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

    #[test]
    fn the_current_month_is_selected_by_default() {
        let months = trailing_months_newest_first(today());

        assert_eq!(selected_month(&months, None), months[0]);
        assert_eq!(selected_month(&months, Some("garbage")), months[0]);
    }

    #[test]
    fn an_encoded_month_selects_its_bucket() {
        let months = trailing_months_newest_first(today());
        let encoded = format!("{}-{}", months[3].id, months[3].year);

        assert_eq!(selected_month(&months, Some(encoded.as_str())), months[3]);
    }

    #[tokio::test]
    async fn dashboard_shows_figures_chart_and_budget() {
        let (api, _backend) = serve_backend(mock_backend()).await;
        let state = AppState::new("foobar", api, PaginationConfig::default());
        let server = TestServer::new(test_app(state));

        let response = server.get("/stub_log_in").await;
        let session_cookie = response.cookie(COOKIE_SESSION);

        let response = server
            .get(endpoints::DASHBOARD_VIEW)
            .add_cookie(session_cookie)
            .await;

        response.assert_status_ok();
        let text = response.text();
        let document = scraper::Html::parse_document(&text);
        assert_valid_html(&document);

        assert!(text.contains("$500.00"), "income figure missing");
        assert!(text.contains("$120.00"), "expense figure missing");
        assert!(text.contains("$380.00"), "cash in hand figure missing");
        assert!(text.contains("$300.00"), "budget figure missing");

        let chart = Selector::parse("#category-breakdown-chart").unwrap();
        assert!(document.select(&chart).next().is_some());

        let selector = Selector::parse("select[name='month'] option").unwrap();
        assert_eq!(document.select(&selector).count(), 12);
    }

    #[tokio::test]
    async fn saving_the_budget_rerenders_the_panel() {
        let (api, _backend) = serve_backend(mock_backend()).await;
        let state = AppState::new("foobar", api, PaginationConfig::default());
        let server = TestServer::new(test_app(state));

        let response = server.get("/stub_log_in").await;
        let session_cookie = response.cookie(COOKIE_SESSION);

        let response = server
            .post(endpoints::BUDGET_API)
            .add_cookie(session_cookie)
            .form(&[("amount", "300.0")])
            .await;

        response.assert_status_ok();
        response.assert_text_contains("Monthly budget");
        response.assert_text_contains("$300.00");
    }
}
