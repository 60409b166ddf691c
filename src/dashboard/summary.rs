//! Builds the dashboard figures for one selected month.
//!
//! The backend exposes one endpoint per figure, so a dashboard load is a
//! small swarm of requests: the income, expense and transaction-count totals
//! run concurrently, and the expense-by-category breakdown fans out one
//! request per expense category. A failed figure shows as zero and a failed
//! category drops out of the breakdown; only a revoked token aborts the whole
//! load so the session can be evicted.

use tokio::task::JoinSet;

use crate::{
    Error,
    api::{ApiClient, Category, EXPENSE_TYPE_ID, INCOME_TYPE_ID, paths, truncate_two_dp},
    fetch::FetchToken,
    months::MonthBucket,
    session::Session,
};

/// The figures shown on the dashboard for one month.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DashboardSummary {
    pub income: f64,
    pub expense: f64,
    /// `max(0, income - expense)`, never negative.
    pub cash_in_hand: f64,
    pub transaction_count: u64,
    /// Expense totals per category, only categories with spending.
    pub category_breakdown: Vec<CategoryAmount>,
    /// The configured monthly budget, zero when none is set.
    pub budget: f64,
}

/// One slice of the expense-by-category breakdown.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryAmount {
    pub name: String,
    pub amount: f64,
}

/// Fetch every dashboard figure for `month`.
///
/// Returns `Ok(None)` when a newer fetch cycle has superseded `fetch`. The
/// breakdown is skipped entirely when `categories` has not loaded; it fills
/// in on the next cycle once the category list is available.
pub(crate) async fn load_dashboard_summary(
    api: &ApiClient,
    session: &Session,
    month: &MonthBucket,
    categories: Option<&[Category]>,
    fetch: &FetchToken,
) -> Result<Option<DashboardSummary>, Error> {
    let (income, expense, count) = tokio::join!(
        fetch_income_or_expense(api, session, INCOME_TYPE_ID, month),
        fetch_income_or_expense(api, session, EXPENSE_TYPE_ID, month),
        fetch_transaction_count(api, session, month),
    );

    let income = figure_or_zero(income)?;
    let expense = figure_or_zero(expense)?;
    let transaction_count = figure_or_zero(count)? as u64;

    let category_breakdown = match categories {
        Some(categories) => fetch_category_breakdown(api, session, month, categories).await,
        None => Vec::new(),
    };

    let budget = fetch_budget(api, session, month).await;

    if !fetch.is_current() {
        return Ok(None);
    }

    Ok(Some(DashboardSummary {
        income,
        expense,
        cash_in_hand: truncate_two_dp((income - expense).max(0.0)),
        transaction_count,
        category_breakdown,
        budget,
    }))
}

/// Post a new budget amount, then refetch it.
///
/// The save response carries no payload, so the refetch is what the caller
/// renders.
pub(crate) async fn save_budget(
    api: &ApiClient,
    session: &Session,
    month: &MonthBucket,
    amount: f64,
) -> Result<f64, Error> {
    let request = BudgetRequest {
        email: &session.email,
        amount,
    };

    api.post::<serde_json::Value, _>(paths::BUDGET_NEW, Some(&session.token), &[], &request)
        .await?;

    Ok(fetch_budget(api, session, month).await)
}

#[derive(serde::Serialize)]
struct BudgetRequest<'a> {
    email: &'a str,
    amount: f64,
}

async fn fetch_income_or_expense(
    api: &ApiClient,
    session: &Session,
    transaction_type_id: i64,
    month: &MonthBucket,
) -> Result<f64, Error> {
    let total: Option<f64> = api
        .get(
            paths::REPORT_TOTAL_INCOME_OR_EXPENSE,
            Some(&session.token),
            &[
                ("userId", session.user_id.to_string()),
                ("transactionTypeId", transaction_type_id.to_string()),
                ("month", month.id.to_string()),
                ("year", month.year.to_string()),
            ],
        )
        .await?;

    Ok(truncate_two_dp(total.unwrap_or(0.0)))
}

async fn fetch_transaction_count(
    api: &ApiClient,
    session: &Session,
    month: &MonthBucket,
) -> Result<f64, Error> {
    let count: Option<f64> = api
        .get(
            paths::REPORT_TOTAL_NO_OF_TRANSACTIONS,
            Some(&session.token),
            &[
                ("userId", session.user_id.to_string()),
                ("month", month.id.to_string()),
                ("year", month.year.to_string()),
            ],
        )
        .await?;

    Ok(count.unwrap_or(0.0))
}

/// A figure shows as zero when its fetch fails, except for a revoked token,
/// which must reach the caller so the session can be evicted.
fn figure_or_zero(result: Result<f64, Error>) -> Result<f64, Error> {
    match result {
        Ok(figure) => Ok(figure),
        Err(Error::Unauthorized) => Err(Error::Unauthorized),
        Err(error) => {
            tracing::warn!("a dashboard figure failed to load: {error}");
            Ok(0.0)
        }
    }
}

/// One concurrent request per expense category, keeping whatever succeeds.
///
/// Categories with no spending or a failed request drop out of the breakdown
/// individually; a partial result is shown rather than an error.
async fn fetch_category_breakdown(
    api: &ApiClient,
    session: &Session,
    month: &MonthBucket,
    categories: &[Category],
) -> Vec<CategoryAmount> {
    let mut requests = JoinSet::new();

    for category in categories.iter().filter(|category| category.is_expense()) {
        let api = api.clone();
        let token = session.token.clone();
        let email = session.email.clone();
        let category_id = category.category_id;
        let name = category.category_name.clone();
        let (month_id, year) = (month.id, month.year);

        requests.spawn(async move {
            let total: Result<Option<f64>, Error> = api
                .get(
                    paths::REPORT_TOTAL_BY_CATEGORY,
                    Some(&token),
                    &[
                        ("email", email),
                        ("categoryId", category_id.to_string()),
                        ("month", month_id.to_string()),
                        ("year", year.to_string()),
                    ],
                )
                .await;

            match total {
                Ok(Some(amount)) if amount != 0.0 => Some(CategoryAmount {
                    name,
                    amount: truncate_two_dp(amount),
                }),
                Ok(_) => None,
                Err(error) => {
                    tracing::warn!("category total failed to load: {error}");
                    None
                }
            }
        });
    }

    let mut breakdown: Vec<CategoryAmount> = Vec::new();

    while let Some(outcome) = requests.join_next().await {
        if let Ok(Some(slice)) = outcome {
            breakdown.push(slice);
        }
    }

    // Completion order is arbitrary; sort for a stable chart.
    breakdown.sort_by(|a, b| a.name.cmp(&b.name));
    breakdown
}

/// A missing or failed budget shows as zero.
async fn fetch_budget(api: &ApiClient, session: &Session, month: &MonthBucket) -> f64 {
    let budget: Result<Option<f64>, Error> = api
        .get(
            paths::BUDGET_GET,
            Some(&session.token),
            &[
                ("email", session.email.clone()),
                ("month", month.id.to_string()),
                ("year", month.year.to_string()),
            ],
        )
        .await;

    match budget {
        Ok(amount) => truncate_two_dp(amount.unwrap_or(0.0)),
        Err(error) => {
            tracing::warn!("the budget failed to load: {error}");
            0.0
        }
    }
}

#[cfg(test)]
mod dashboard_summary_tests {
    use axum::{
        Json, Router,
        extract::Query,
        http::StatusCode,
        routing::{get, post},
    };
    use serde_json::json;
    use std::collections::HashMap;

    use crate::{
        Error,
        api::Category,
        fetch::FetchGate,
        months::MonthBucket,
        session::Session,
        test_utils::backend::serve_backend,
    };

    use super::{load_dashboard_summary, save_budget};

    fn august() -> MonthBucket {
        MonthBucket {
            id: 8,
            year: 2026,
            name: "August".to_owned(),
        }
    }

    fn session() -> Session {
        Session {
            token: "a.jwt.token".to_owned(),
            user_id: 1,
            username: "testuser".to_owned(),
            email: "test@example.com".to_owned(),
            roles: vec!["ROLE_USER".to_owned()],
        }
    }

    fn expense_category(id: i64, name: &str) -> Category {
        serde_json::from_value(json!({
            "categoryId": id,
            "categoryName": name,
            "transactionType": {"transactionTypeId": 1},
        }))
        .unwrap()
    }

    fn figures_backend() -> Router {
        Router::new()
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
                "/budget/getByUser",
                get(|| async { Json(json!({"status": "SUCCESS", "response": 300.0})) }),
            )
    }

    #[tokio::test]
    async fn figures_load_concurrently_for_the_selected_month() {
        let (api, _backend) = serve_backend(figures_backend()).await;
        let fetch = FetchGate::new().begin(1);

        let summary = load_dashboard_summary(&api, &session(), &august(), None, &fetch)
            .await
            .unwrap()
            .expect("the fetch was not superseded");

        assert_eq!(summary.income, 500.0);
        assert_eq!(summary.expense, 120.0);
        assert_eq!(summary.cash_in_hand, 380.0);
        assert_eq!(summary.transaction_count, 7);
        assert_eq!(summary.budget, 300.0);
        assert!(summary.category_breakdown.is_empty());
    }

    #[tokio::test]
    async fn cash_in_hand_is_never_negative() {
        let backend = Router::new()
            .route(
                "/report/getTotalIncomeOrExpense",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    let total = if params["transactionTypeId"] == "2" {
                        100.0
                    } else {
                        250.0
                    };
                    Json(json!({"status": "SUCCESS", "response": total}))
                }),
            )
            .route(
                "/report/getTotalNoOfTransactions",
                get(|| async { Json(json!({"status": "SUCCESS", "response": 2})) }),
            )
            .route(
                "/budget/getByUser",
                get(|| async { Json(json!({"status": "SUCCESS", "response": null})) }),
            );
        let (api, _backend) = serve_backend(backend).await;
        let fetch = FetchGate::new().begin(1);

        let summary = load_dashboard_summary(&api, &session(), &august(), None, &fetch)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(summary.cash_in_hand, 0.0);
        assert_eq!(summary.budget, 0.0);
    }

    #[tokio::test]
    async fn a_failed_figure_shows_as_zero() {
        let backend = Router::new()
            .route(
                "/report/getTotalIncomeOrExpense",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    if params["transactionTypeId"] == "2" {
                        Json(json!({"status": "SUCCESS", "response": 500.0}))
                    } else {
                        Json(json!({"status": "FAILED", "response": "boom"}))
                    }
                }),
            )
            .route(
                "/report/getTotalNoOfTransactions",
                get(|| async { Json(json!({"status": "SUCCESS", "response": 7})) }),
            )
            .route(
                "/budget/getByUser",
                get(|| async { Json(json!({"status": "SUCCESS", "response": 0.0})) }),
            );
        let (api, _backend) = serve_backend(backend).await;
        let fetch = FetchGate::new().begin(1);

        let summary = load_dashboard_summary(&api, &session(), &august(), None, &fetch)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(summary.income, 500.0);
        assert_eq!(summary.expense, 0.0);
    }

    #[tokio::test]
    async fn a_revoked_token_aborts_the_whole_load() {
        let backend = Router::new()
            .route(
                "/report/getTotalIncomeOrExpense",
                get(|| async { StatusCode::UNAUTHORIZED }),
            )
            .route(
                "/report/getTotalNoOfTransactions",
                get(|| async { Json(json!({"status": "SUCCESS", "response": 7})) }),
            )
            .route(
                "/budget/getByUser",
                get(|| async { Json(json!({"status": "SUCCESS", "response": 0.0})) }),
            );
        let (api, _backend) = serve_backend(backend).await;
        let fetch = FetchGate::new().begin(1);

        let result = load_dashboard_summary(&api, &session(), &august(), None, &fetch).await;

        assert_eq!(result, Err(Error::Unauthorized));
    }

    #[tokio::test]
    async fn breakdown_keeps_successes_and_drops_failures() {
        let backend = figures_backend().route(
            "/report/getTotalByCategory",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                match params["categoryId"].as_str() {
                    "1" => Json(json!({"status": "SUCCESS", "response": 80.5})),
                    "2" => Json(json!({"status": "FAILED", "response": "boom"})),
                    // No spending in this category.
                    _ => Json(json!({"status": "SUCCESS", "response": null})),
                }
            }),
        );
        let (api, _backend) = serve_backend(backend).await;
        let fetch = FetchGate::new().begin(1);
        let categories = vec![
            expense_category(1, "Groceries"),
            expense_category(2, "Rent"),
            expense_category(3, "Travel"),
        ];

        let summary =
            load_dashboard_summary(&api, &session(), &august(), Some(&categories), &fetch)
                .await
                .unwrap()
                .unwrap();

        assert_eq!(summary.category_breakdown.len(), 1);
        assert_eq!(summary.category_breakdown[0].name, "Groceries");
        assert_eq!(summary.category_breakdown[0].amount, 80.5);
    }

    #[tokio::test]
    async fn income_categories_are_not_in_the_breakdown() {
        let backend = figures_backend().route(
            "/report/getTotalByCategory",
            get(|| async { Json(json!({"status": "SUCCESS", "response": 50.0})) }),
        );
        let (api, _backend) = serve_backend(backend).await;
        let fetch = FetchGate::new().begin(1);
        let salary: Category = serde_json::from_value(json!({
            "categoryId": 9,
            "categoryName": "Salary",
            "transactionType": {"transactionTypeId": 2},
        }))
        .unwrap();
        let categories = vec![salary, expense_category(1, "Groceries")];

        let summary =
            load_dashboard_summary(&api, &session(), &august(), Some(&categories), &fetch)
                .await
                .unwrap()
                .unwrap();

        assert_eq!(summary.category_breakdown.len(), 1);
        assert_eq!(summary.category_breakdown[0].name, "Groceries");
    }

    #[tokio::test]
    async fn a_superseded_fetch_is_discarded() {
        let (api, _backend) = serve_backend(figures_backend()).await;
        let gate = FetchGate::new();
        let fetch = gate.begin(1);
        gate.begin(1);

        let result = load_dashboard_summary(&api, &session(), &august(), None, &fetch)
            .await
            .unwrap();

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn saving_the_budget_refetches_it() {
        let backend = Router::new()
            .route(
                "/budget/new",
                post(|| async { Json(json!({"status": "SUCCESS", "response": null})) }),
            )
            .route(
                "/budget/getByUser",
                get(|| async { Json(json!({"status": "SUCCESS", "response": 450.0})) }),
            );
        let (api, _backend) = serve_backend(backend).await;

        let budget = save_budget(&api, &session(), &august(), 450.0)
            .await
            .unwrap();

        assert_eq!(budget, 450.0);
    }

    #[tokio::test]
    async fn a_failed_budget_save_is_an_error() {
        let backend = Router::new().route(
            "/budget/new",
            post(|| async { Json(json!({"status": "FAILED", "response": "no"})) }),
        );
        let (api, _backend) = serve_backend(backend).await;

        let result = save_budget(&api, &session(), &august(), 450.0).await;

        assert!(matches!(result, Err(Error::Api(_))));
    }
}
