//! The routes served by this application.
//!
//! For endpoints that take a parameter, e.g., '/users/{user_id}', use [format_endpoint].

/// The root route which redirects to the dashboard or log in page.
pub const ROOT: &str = "/";
/// The landing page for logged in users.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page with per-category and per-month spending breakdowns.
pub const STATISTICS_VIEW: &str = "/statistics";
/// The page for displaying a user's transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for creating a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The page listing the user's saved (recurring) transaction plans.
pub const SAVED_VIEW: &str = "/saved";
/// The route for getting the registration page.
pub const REGISTER_VIEW: &str = "/register";
/// The route for getting the log in page.
pub const LOG_IN_VIEW: &str = "/log_in";
/// The route for instructions for resetting the user's password.
pub const FORGOT_PASSWORD_VIEW: &str = "/forgot_password";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The admin page listing all user accounts.
pub const ADMIN_USERS_VIEW: &str = "/admin/users";
/// The admin page listing transactions across all users.
pub const ADMIN_TRANSACTIONS_VIEW: &str = "/admin/transactions";
/// The admin page for managing transaction categories.
pub const ADMIN_CATEGORIES_VIEW: &str = "/admin/categories";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for logging in a user.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";
/// The route for registering a new user account.
pub const REGISTER_API: &str = "/api/register";
/// The route for starting the forgot-password flow.
pub const FORGOT_PASSWORD_API: &str = "/api/forgot_password";
/// The route to create a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to set the current month's budget.
pub const BUDGET_API: &str = "/api/budget";
/// The route to confirm a saved transaction plan, recording a transaction.
pub const SAVED_CONFIRM_API: &str = "/api/saved/{plan_id}/confirm";
/// The route to skip the current due date of a saved transaction plan.
pub const SAVED_SKIP_API: &str = "/api/saved/{plan_id}/skip";
/// The route to create a category (admin).
pub const CATEGORIES_API: &str = "/api/categories";
/// The route to update a category (admin).
pub const CATEGORY_API: &str = "/api/categories/{category_id}";
/// The route to disable or enable a category (admin).
pub const CATEGORY_TOGGLE_API: &str = "/api/categories/{category_id}/toggle";
/// The route to disable or enable a user account (admin).
pub const USER_TOGGLE_API: &str = "/api/users/{user_id}/toggle";
/// The route to download the transaction report as a PDF.
pub const REPORT_PDF: &str = "/reports/pdf";
/// The route to download the transaction report as a spreadsheet.
pub const REPORT_EXCEL: &str = "/reports/excel";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/users/{user_id}', '{user_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
