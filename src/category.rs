//! Category management for administrators: list, create, rename and
//! enable/disable categories.
//!
//! A 401 from the backend on these pages is shown as a permission notice and
//! never evicts the session; an admin demoted mid-session keeps their login.

use axum::{
    Extension, Form,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    api::{Category, EXPENSE_TYPE_ID, INCOME_TYPE_ID, paths},
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
    },
    navigation::NavBar,
    session::Session,
};

/// Form data for creating or updating a category.
#[derive(Clone, Deserialize)]
pub struct CategoryData {
    pub name: String,
    pub transaction_type_id: i64,
}

/// The JSON body the backend expects for category writes.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryRequest<'a> {
    category_name: &'a str,
    transaction_type_id: i64,
}

/// Display the category management page.
pub async fn get_admin_categories_page(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Response {
    let categories: Vec<Category> = match state
        .api
        .get(paths::CATEGORY_GET_ALL, Some(&session.token), &[])
        .await
    {
        Ok(categories) => categories.unwrap_or_default(),
        Err(Error::Unauthorized | Error::Forbidden) => return permission_notice_page(),
        Err(error) => {
            tracing::error!("could not load categories: {error}");
            return error.into_response();
        }
    };

    let nav_bar = NavBar::new_admin(endpoints::ADMIN_CATEGORIES_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class="flex flex-col px-2 lg:px-6 lg:py-8 mx-auto w-full
            max-w-screen-xl text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold mb-4" { "Categories" }

            (create_category_form())

            @if categories.is_empty() {
                p class="text-gray-500 dark:text-gray-400 py-8 text-center"
                {
                    "No categories exist yet."
                }
            } @else {
                (categories_table(&categories))
            }
        }
    );

    Html(base("Categories", &[], &content).into_string()).into_response()
}

/// Create a new category.
pub async fn post_category(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(data): Form<CategoryData>,
) -> Response {
    let request = CategoryRequest {
        category_name: &data.name,
        transaction_type_id: data.transaction_type_id,
    };

    let result: Result<Option<String>, Error> = state
        .api
        .post(paths::CATEGORY_NEW, Some(&session.token), &[], &request)
        .await;

    category_action_response(result)
}

/// Rename a category or change its transaction type.
pub async fn put_category(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(category_id): Path<i64>,
    Form(data): Form<CategoryData>,
) -> Response {
    let request = CategoryRequest {
        category_name: &data.name,
        transaction_type_id: data.transaction_type_id,
    };

    let result: Result<Option<String>, Error> = state
        .api
        .put(
            paths::CATEGORY_UPDATE,
            Some(&session.token),
            &[("categoryId", category_id.to_string())],
            &request,
        )
        .await;

    category_action_response(result)
}

/// Flip a category between enabled and disabled.
pub async fn post_toggle_category(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(category_id): Path<i64>,
) -> Response {
    let result: Result<Option<String>, Error> = state
        .api
        .delete(
            paths::CATEGORY_DELETE,
            Some(&session.token),
            &[("categoryId", category_id.to_string())],
        )
        .await;

    category_action_response(result)
}

fn category_action_response(result: Result<Option<String>, Error>) -> Response {
    match result {
        Ok(_) => {
            (
                HxRedirect(endpoints::ADMIN_CATEGORIES_VIEW.to_owned()),
                StatusCode::OK,
            )
                .into_response()
        }
        Err(Error::Unauthorized | Error::Forbidden) => Error::Forbidden.into_alert_response(),
        Err(error) => {
            tracing::error!("category action failed: {error}");
            error.into_alert_response()
        }
    }
}

/// The full-page permission notice shown when the backend rejects an admin
/// request. The session is left untouched.
pub(crate) fn permission_notice_page() -> Response {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto
            text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold" { "Permission denied" }

            p
            {
                "Your account is not allowed to view this page."
            }
        }
    );

    Html(base("Permission denied", &[], &content).into_string()).into_response()
}

fn create_category_form() -> Markup {
    html!(
        form
            hx-post=(endpoints::CATEGORIES_API)
            hx-target-error="#alert-container"
            class="flex flex-wrap items-end gap-2 mb-6"
        {
            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Name" }

                input
                    type="text"
                    name="name"
                    id="name"
                    placeholder="Groceries"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="transaction_type_id" class=(FORM_LABEL_STYLE) { "Type" }

                (transaction_type_select(EXPENSE_TYPE_ID))
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add category" }
        }
    )
}

fn transaction_type_select(selected: i64) -> Markup {
    html!(
        select
            name="transaction_type_id"
            class=(FORM_TEXT_INPUT_STYLE)
        {
            option value=(EXPENSE_TYPE_ID) selected[selected == EXPENSE_TYPE_ID] { "Expense" }
            option value=(INCOME_TYPE_ID) selected[selected == INCOME_TYPE_ID] { "Income" }
        }
    )
}

fn categories_table(categories: &[Category]) -> Markup {
    html!(
        table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                }
            }

            tbody
            {
                @for category in categories {
                    tr class=(TABLE_ROW_STYLE)
                    {
                        td class=(TABLE_CELL_STYLE)
                        {
                            form
                                hx-put=(endpoints::format_endpoint(
                                    endpoints::CATEGORY_API, category.category_id))
                                hx-target-error="#alert-container"
                                class="flex flex-wrap items-center gap-2"
                            {
                                input
                                    type="text"
                                    name="name"
                                    value=(category.category_name)
                                    required
                                    class=(FORM_TEXT_INPUT_STYLE);

                                (transaction_type_select(
                                    category.transaction_type.transaction_type_id))

                                button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Update" }
                            }
                        }

                        td class=(TABLE_CELL_STYLE)
                        {
                            @if category.enabled.unwrap_or(true) {
                                span class="text-green-600 dark:text-green-400" { "Enabled" }
                            } @else {
                                span class="text-gray-500" { "Disabled" }
                            }
                        }

                        td class=(TABLE_CELL_STYLE)
                        {
                            button
                                hx-post=(endpoints::format_endpoint(
                                    endpoints::CATEGORY_TOGGLE_API, category.category_id))
                                hx-target-error="#alert-container"
                                class=(BUTTON_DELETE_STYLE)
                            {
                                @if category.enabled.unwrap_or(true) { "Disable" } @else { "Enable" }
                            }
                        }
                    }
                }
            }
        }
    )
}
