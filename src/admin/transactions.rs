//! The admin transaction listing: a paginated, searchable table of
//! transactions across every user.

use axum::{
    Extension,
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    api::{AdminTransactionRow, EXPENSE_TYPE_ID, PageData, paths},
    category::permission_notice_page,
    endpoints,
    html::{
        FORM_TEXT_INPUT_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        format_currency,
    },
    navigation::NavBar,
    pagination::{PageQuery, PageState, pagination_nav},
    session::Session,
};

/// Render the paginated all-users transaction listing for administrators.
pub async fn get_admin_transactions_page(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<PageQuery>,
) -> Response {
    let page = PageState::resolve_page(query.page, &state.pagination_config);
    let page_size = state.pagination_config.default_page_size;

    let params = [
        // The backend pages from zero.
        ("pageNumber", (page - 1).to_string()),
        ("pageSize", page_size.to_string()),
        (
            "searchKey",
            query.search_key().unwrap_or_default().to_owned(),
        ),
    ];

    let result: Result<Option<PageData<AdminTransactionRow>>, Error> = state
        .api
        .get(paths::TRANSACTION_GET_ALL, Some(&session.token), &params)
        .await;

    let page_data = match result {
        Ok(page_data) => page_data.unwrap_or_default(),
        Err(Error::Unauthorized | Error::Forbidden) => return permission_notice_page(),
        Err(error) => {
            tracing::error!("could not load the transaction listing: {error}");
            return error.into_response();
        }
    };

    let page_state = PageState {
        page,
        page_size,
        total_pages: page_data.total_no_of_pages,
        total_records: page_data.total_no_of_records,
    };

    transactions_view(&query, &page_state, &page_data.data)
}

fn transactions_view(
    query: &PageQuery,
    page_state: &PageState,
    transactions: &[AdminTransactionRow],
) -> Response {
    let nav_bar = NavBar::new_admin(endpoints::ADMIN_TRANSACTIONS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class="flex flex-col px-2 lg:px-6 lg:py-8 mx-auto w-full
            max-w-screen-xl text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold mb-4" { "All Transactions" }

            // The search form omits the page field so a new search starts
            // from the first page.
            form
                method="get"
                action=(endpoints::ADMIN_TRANSACTIONS_VIEW)
                class="flex items-center gap-2 mb-4"
            {
                input
                    type="search"
                    name="search"
                    placeholder="Search transactions"
                    value=(query.search.as_deref().unwrap_or(""))
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            @if transactions.is_empty() {
                p class="text-gray-500 dark:text-gray-400 py-8 text-center"
                {
                    "No transactions found."
                }
            } @else {
                (transactions_table(transactions))
            }

            (pagination_nav(endpoints::ADMIN_TRANSACTIONS_VIEW, query, page_state, 5))
        }
    );

    Html(base("All Transactions", &[], &content).into_string()).into_response()
}

fn transactions_table(transactions: &[AdminTransactionRow]) -> Markup {
    html!(
        table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "User" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                }
            }

            tbody
            {
                @for transaction in transactions {
                    tr class=(TABLE_ROW_STYLE)
                    {
                        td class=(TABLE_CELL_STYLE) { (transaction.date) }
                        td class=(TABLE_CELL_STYLE) { (transaction.user_email) }
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
