//! The admin user listing: a paginated, searchable table of every account
//! with per-user totals and an enable/disable action.

use axum::{
    Extension,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    AppState, Error,
    api::{AdminUserRow, PageData, paths},
    category::permission_notice_page,
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_SECONDARY_STYLE, FORM_TEXT_INPUT_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
    pagination::{PageQuery, PageState, pagination_nav},
    session::Session,
};

/// Render the paginated user listing for administrators.
pub async fn get_admin_users_page(
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

    let result: Result<Option<PageData<AdminUserRow>>, Error> = state
        .api
        .get(paths::USER_GET_ALL, Some(&session.token), &params)
        .await;

    let page_data = match result {
        Ok(page_data) => page_data.unwrap_or_default(),
        Err(Error::Unauthorized | Error::Forbidden) => return permission_notice_page(),
        Err(error) => {
            tracing::error!("could not load users: {error}");
            return error.into_response();
        }
    };

    let page_state = PageState {
        page,
        page_size,
        total_pages: page_data.total_no_of_pages,
        total_records: page_data.total_no_of_records,
    };

    users_view(&query, &page_state, &page_data.data)
}

/// Flip a user account between enabled and disabled.
pub async fn post_toggle_user(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(user_id): Path<i64>,
) -> Response {
    let result: Result<Option<String>, Error> = state
        .api
        .delete(
            paths::USER_DISABLE,
            Some(&session.token),
            &[("userId", user_id.to_string())],
        )
        .await;

    match result {
        Ok(_) => {
            (
                HxRedirect(endpoints::ADMIN_USERS_VIEW.to_owned()),
                StatusCode::OK,
            )
                .into_response()
        }
        Err(Error::Unauthorized | Error::Forbidden) => Error::Forbidden.into_alert_response(),
        Err(error) => {
            tracing::error!("user toggle failed: {error}");
            error.into_alert_response()
        }
    }
}

fn users_view(query: &PageQuery, page_state: &PageState, users: &[AdminUserRow]) -> Response {
    let nav_bar = NavBar::new_admin(endpoints::ADMIN_USERS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class="flex flex-col px-2 lg:px-6 lg:py-8 mx-auto w-full
            max-w-screen-xl text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold mb-4" { "Users" }

            // The search form omits the page field so a new search starts
            // from the first page.
            form
                method="get"
                action=(endpoints::ADMIN_USERS_VIEW)
                class="flex items-center gap-2 mb-4"
            {
                input
                    type="search"
                    name="search"
                    placeholder="Search users"
                    value=(query.search.as_deref().unwrap_or(""))
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            @if users.is_empty() {
                p class="text-gray-500 dark:text-gray-400 py-8 text-center"
                {
                    "No users found."
                }
            } @else {
                (users_table(users))
            }

            (pagination_nav(endpoints::ADMIN_USERS_VIEW, query, page_state, 5))
        }
    );

    Html(base("Users", &[], &content).into_string()).into_response()
}

fn users_table(users: &[AdminUserRow]) -> Markup {
    html!(
        table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "User Id" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Username" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Email" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Tot. Expense" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Tot. Income" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Transactions" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Action" }
                }
            }

            tbody
            {
                @for user in users {
                    tr class=(TABLE_ROW_STYLE)
                    {
                        td class=(TABLE_CELL_STYLE) { (display_user_id(user.id)) }
                        td class=(TABLE_CELL_STYLE) { (user.username) }
                        td class=(TABLE_CELL_STYLE) { (user.email) }
                        td class=(TABLE_CELL_STYLE)
                        {
                            (format_currency(user.expense.unwrap_or(0.0)))
                        }
                        td class=(TABLE_CELL_STYLE)
                        {
                            (format_currency(user.income.unwrap_or(0.0)))
                        }
                        td class=(TABLE_CELL_STYLE) { (user.no_of_transactions.unwrap_or(0)) }

                        td class=(TABLE_CELL_STYLE)
                        {
                            @if user.enabled {
                                span class="text-green-600 dark:text-green-400" { "Enabled" }
                            } @else {
                                span class="text-gray-500" { "Disabled" }
                            }
                        }

                        td class=(TABLE_CELL_STYLE)
                        {
                            button
                                hx-post=(endpoints::format_endpoint(
                                    endpoints::USER_TOGGLE_API, user.id))
                                hx-target-error="#alert-container"
                                class=(if user.enabled {
                                    BUTTON_DELETE_STYLE
                                } else {
                                    BUTTON_SECONDARY_STYLE
                                })
                            {
                                @if user.enabled { "Disable" } @else { "Enable" }
                            }
                        }
                    }
                }
            }
        }
    )
}

/// The display form of a user ID, e.g. `U00042`.
fn display_user_id(id: i64) -> String {
    format!("U{id:05}")
}
