//! The transaction history page: a paginated, searchable, sortable table of
//! the user's transactions with report download buttons.

use axum::{
    Extension,
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    api::{EXPENSE_TYPE_ID, INCOME_TYPE_ID, PageData, TransactionRow, paths},
    auth::evict_session_and_redirect,
    endpoints,
    html::{
        BUTTON_SECONDARY_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
    pagination::{PageQuery, PageState, SortDirection, page_url, pagination_nav},
    session::Session,
};

/// The default sort for the transaction history.
const DEFAULT_SORT_FIELD: &str = "date";

/// Query parameters for the transaction history page.
///
/// The fields mirror [PageQuery] plus the transaction type filter; axum's
/// query extractor cannot flatten a nested struct out of a urlencoded string.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsQuery {
    page: Option<u64>,
    search: Option<String>,
    sort: Option<String>,
    direction: Option<SortDirection>,
    /// `1` for expenses, `2` for income, absent for all transactions.
    #[serde(rename = "type")]
    type_id: Option<i64>,
}

impl TransactionsQuery {
    fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            search: self.search.clone(),
            sort: self.sort.clone(),
            direction: self.direction,
        }
    }
}

/// Render the paginated transaction history for the logged-in user.
pub async fn get_transactions_page(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<TransactionsQuery>,
    jar: PrivateCookieJar,
) -> Response {
    let page_query = query.page_query();
    let page = PageState::resolve_page(page_query.page, &state.pagination_config);
    let page_size = state.pagination_config.default_page_size;

    let mut params = vec![
        ("email", session.email.clone()),
        // The backend pages from zero.
        ("pageNumber", (page - 1).to_string()),
        ("pageSize", page_size.to_string()),
        (
            "sortField",
            page_query.sort_field(DEFAULT_SORT_FIELD).to_owned(),
        ),
        (
            "sortDirec",
            page_query.sort_direction().as_query().to_owned(),
        ),
        (
            "searchKey",
            page_query.search_key().unwrap_or_default().to_owned(),
        ),
    ];

    if let Some(type_id) = query.type_id {
        params.push(("transactionTypeId", type_id.to_string()));
    }

    let result: Result<Option<PageData<TransactionRow>>, Error> = state
        .api
        .get(
            paths::TRANSACTION_GET_BY_USER,
            Some(&session.token),
            &params,
        )
        .await;

    let page_data = match result {
        Ok(page_data) => page_data.unwrap_or_default(),
        Err(Error::Unauthorized) => {
            return evict_session_and_redirect(jar, &state.redirect_guard, session.user_id);
        }
        Err(error) => {
            tracing::error!("could not load transactions: {error}");
            return error.into_response();
        }
    };

    let page_state = PageState {
        page,
        page_size,
        total_pages: page_data.total_no_of_pages,
        total_records: page_data.total_no_of_records,
    };

    transactions_view(&query, &page_query, &page_state, &page_data.data)
}

fn transactions_view(
    query: &TransactionsQuery,
    page_query: &PageQuery,
    page_state: &PageState,
    transactions: &[TransactionRow],
) -> Response {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class="flex flex-col px-2 lg:px-6 lg:py-8 mx-auto w-full
            max-w-screen-xl text-gray-900 dark:text-white"
        {
            div class="flex flex-wrap items-end justify-between gap-4 mb-4"
            {
                h2 class="text-xl font-bold" { "Transaction History" }

                div class="flex items-center gap-2"
                {
                    a
                        href=(endpoints::NEW_TRANSACTION_VIEW)
                        class=(LINK_STYLE)
                    {
                        "New transaction"
                    }

                    a
                        href=(endpoints::REPORT_PDF)
                        class=(BUTTON_SECONDARY_STYLE)
                        download="transactions-report.pdf"
                    {
                        "Download PDF"
                    }

                    a
                        href=(endpoints::REPORT_EXCEL)
                        class=(BUTTON_SECONDARY_STYLE)
                        download="transactions-report.xlsx"
                    {
                        "Download Excel"
                    }
                }
            }

            (filter_controls(query))

            @if transactions.is_empty() {
                p class="text-gray-500 dark:text-gray-400 py-8 text-center"
                {
                    "No transactions found."
                }
            } @else {
                (transactions_table(page_query, transactions))
            }

            (pagination_nav(endpoints::TRANSACTIONS_VIEW, page_query, page_state, 5))
        }
    );

    Html(base("Transactions", &[], &content).into_string()).into_response()
}

/// The search box and transaction type filter.
///
/// Both forms deliberately omit the page field so a new search or filter
/// starts from the first page.
fn filter_controls(query: &TransactionsQuery) -> Markup {
    html!(
        div class="flex flex-wrap items-center justify-between gap-4 mb-4"
        {
            form method="get" action=(endpoints::TRANSACTIONS_VIEW) class="flex items-center gap-2"
            {
                select
                    name="type"
                    class=(FORM_TEXT_INPUT_STYLE)
                    onchange="this.form.submit()"
                {
                    option value="" selected[query.type_id.is_none()] { "All types" }
                    option
                        value=(EXPENSE_TYPE_ID)
                        selected[query.type_id == Some(EXPENSE_TYPE_ID)]
                    {
                        "Expenses"
                    }
                    option
                        value=(INCOME_TYPE_ID)
                        selected[query.type_id == Some(INCOME_TYPE_ID)]
                    {
                        "Income"
                    }
                }
            }

            form method="get" action=(endpoints::TRANSACTIONS_VIEW) class="flex items-center gap-2"
            {
                @if let Some(type_id) = query.type_id {
                    input type="hidden" name="type" value=(type_id);
                }

                input
                    type="search"
                    name="search"
                    placeholder="Search transactions"
                    value=(query.search.as_deref().unwrap_or(""))
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }
    )
}

fn transactions_table(page_query: &PageQuery, transactions: &[TransactionRow]) -> Markup {
    html!(
        table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE)
                    {
                        (sort_link(page_query, "date", "Date"))
                    }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                    th scope="col" class=(TABLE_CELL_STYLE)
                    {
                        (sort_link(page_query, "amount", "Amount"))
                    }
                }
            }

            tbody
            {
                @for transaction in transactions {
                    tr class=(TABLE_ROW_STYLE)
                    {
                        td class=(TABLE_CELL_STYLE) { (transaction.date) }
                        td class=(TABLE_CELL_STYLE) { (transaction.category_name) }
                        td class=(TABLE_CELL_STYLE)
                        {
                            (transaction.description.as_deref().unwrap_or(""))
                        }
                        td class=(TABLE_CELL_STYLE)
                        {
                            @if transaction.transaction_type == EXPENSE_TYPE_ID {
                                span class="text-red-600 dark:text-red-400"
                                {
                                    "-" (format_currency(transaction.amount))
                                }
                            } @else {
                                span class="text-green-600 dark:text-green-400"
                                {
                                    "+" (format_currency(transaction.amount))
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}

/// A column header link that sorts by `field`, toggling the direction when
/// the column is already the active sort.
fn sort_link(page_query: &PageQuery, field: &str, label: &str) -> Markup {
    let active = page_query.sort_field(DEFAULT_SORT_FIELD) == field;
    let direction = if active {
        page_query.sort_direction().toggled()
    } else {
        SortDirection::Desc
    };

    let target = PageQuery {
        page: Some(1),
        search: page_query.search.clone(),
        sort: Some(field.to_owned()),
        direction: Some(direction),
    };

    html!(
        a href=(page_url(endpoints::TRANSACTIONS_VIEW, 1, &target)) class="hover:underline"
        {
            (label)
            @if active {
                @match page_query.sort_direction() {
                    SortDirection::Asc => { " \u{25B2}" }
                    SortDirection::Desc => { " \u{25BC}" }
                }
            }
        }
    )
}
