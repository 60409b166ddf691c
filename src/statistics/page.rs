//! The statistics page: an income versus expense bar chart over the trailing
//! twelve months.

use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisType},
    series::Bar,
};
use maud::html;

use crate::{
    AppState, Error,
    auth::evict_session_and_redirect,
    charts::{PageChart, chart_container, charts_script, currency_formatter, currency_tooltip,
        echarts_library},
    endpoints,
    html::base,
    months::{MonthBucket, trailing_months, today},
    navigation::NavBar,
    session::Session,
    statistics::summary::{MonthTotals, load_monthly_totals},
};

/// Display the statistics page for the logged-in user.
pub async fn get_statistics_page(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    jar: PrivateCookieJar,
) -> Response {
    let fetch = state.statistics_gate.begin(session.user_id);
    let buckets = trailing_months(today());

    let totals = match load_monthly_totals(&state.api, &session, &buckets, &fetch).await {
        Ok(Some(totals)) => totals,
        // A newer request superseded this one; htmx ignores a 204.
        Ok(None) => return StatusCode::NO_CONTENT.into_response(),
        Err(Error::Unauthorized) => {
            return evict_session_and_redirect(jar, &state.redirect_guard, session.user_id);
        }
        Err(error) => {
            tracing::error!("could not load the monthly summary: {error}");
            return error.into_response();
        }
    };

    statistics_view(&buckets, &totals)
}

fn statistics_view(buckets: &[MonthBucket], totals: &[MonthTotals]) -> Response {
    let nav_bar = NavBar::new(endpoints::STATISTICS_VIEW).into_html();
    let chart = PageChart {
        id: "income-expense-chart",
        options: income_expense_chart(buckets, totals).to_string(),
    };

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
            max-w-screen-xl text-gray-900 dark:text-white"
        {
            section
                id="charts"
                class="w-full mx-auto mb-4"
            {
                (chart_container(&chart))
            }
        }
    );

    let scripts = [echarts_library(), charts_script(&[chart])];

    Html(base("Statistics", &scripts, &content).into_string()).into_response()
}

fn income_expense_chart(buckets: &[MonthBucket], totals: &[MonthTotals]) -> Chart {
    let labels: Vec<String> = buckets.iter().map(MonthBucket::label).collect();
    let income: Vec<f64> = totals.iter().map(|month| month.income).collect();
    let expense: Vec<f64> = totals.iter().map(|month| month.expense).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Income vs Expenses")
                .subtext("Last twelve months"),
        )
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("6%"))
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
        .series(Bar::new().name("Income").data(income))
        .series(Bar::new().name("Expense").data(expense))
}
