//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    admin::{get_admin_transactions_page, get_admin_users_page, post_toggle_user},
    auth::{
        admin_guard, auth_guard, auth_guard_hx, get_forgot_password_page, get_log_in_page,
        get_log_out, get_register_page, post_forgot_password, post_log_in, post_register,
    },
    category::{get_admin_categories_page, post_category, post_toggle_category, put_category},
    dashboard::{get_dashboard_page, post_budget},
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    report::{get_excel_report, get_pdf_report},
    statistics::get_statistics_page,
    transaction::{
        get_new_transaction_page, get_saved_page, get_transactions_page, post_confirm_saved,
        post_skip_saved, post_transaction,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::REGISTER_VIEW, get(get_register_page))
        .route(endpoints::REGISTER_API, post(post_register))
        .route(
            endpoints::FORGOT_PASSWORD_VIEW,
            get(get_forgot_password_page),
        )
        .route(endpoints::FORGOT_PASSWORD_API, post(post_forgot_password))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::STATISTICS_VIEW, get(get_statistics_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_new_transaction_page),
        )
        .route(endpoints::SAVED_VIEW, get(get_saved_page))
        .route(endpoints::REPORT_PDF, get(get_pdf_report))
        .route(endpoints::REPORT_EXCEL, get(get_excel_report))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // These POST/PUT routes need to use the HX-REDIRECT header for auth redirects to work properly for HTMX requests.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(endpoints::TRANSACTIONS_API, post(post_transaction))
            .route(endpoints::BUDGET_API, post(post_budget))
            .route(endpoints::SAVED_CONFIRM_API, post(post_confirm_saved))
            .route(endpoints::SAVED_SKIP_API, post(post_skip_saved))
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
    );

    // Admin pages sit behind both guards: the session guard populates the
    // session extension the admin guard inspects.
    let admin_routes = Router::new()
        .route(endpoints::ADMIN_USERS_VIEW, get(get_admin_users_page))
        .route(
            endpoints::ADMIN_TRANSACTIONS_VIEW,
            get(get_admin_transactions_page),
        )
        .route(
            endpoints::ADMIN_CATEGORIES_VIEW,
            get(get_admin_categories_page),
        )
        .layer(middleware::from_fn(admin_guard))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    let admin_routes = admin_routes.merge(
        Router::new()
            .route(endpoints::CATEGORIES_API, post(post_category))
            .route(endpoints::CATEGORY_API, put(put_category))
            .route(endpoints::CATEGORY_TOGGLE_API, post(post_toggle_category))
            .route(endpoints::USER_TOGGLE_API, post(post_toggle_user))
            .layer(middleware::from_fn(admin_guard))
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
    );

    protected_routes
        .merge(admin_routes)
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

#[cfg(test)]
mod routing_tests {
    use axum_test::TestServer;

    use crate::{
        AppState, endpoints,
        pagination::PaginationConfig,
        test_utils::backend::serve_backend,
    };

    use super::build_router;

    async fn test_server() -> (TestServer, crate::test_utils::backend::BackendGuard) {
        let (api, backend) = serve_backend(axum::Router::new()).await;
        let state = AppState::new("foobar", api, PaginationConfig::default());
        let server = TestServer::new(build_router(state));

        (server, backend)
    }

    #[tokio::test]
    async fn root_redirects_anonymous_users_to_log_in() {
        let (server, _backend) = test_server().await;

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_see_other();
        assert_eq!(
            response.header("location"),
            format!("{}?redirect_url=%2F", endpoints::LOG_IN_VIEW)
        );
    }

    #[tokio::test]
    async fn protected_pages_redirect_to_log_in_without_a_session() {
        let (server, _backend) = test_server().await;

        for endpoint in [
            endpoints::DASHBOARD_VIEW,
            endpoints::STATISTICS_VIEW,
            endpoints::TRANSACTIONS_VIEW,
            endpoints::SAVED_VIEW,
        ] {
            let response = server.get(endpoint).await;

            response.assert_status_see_other();
            // The log in page keeps the requested page to return to.
            let expected = format!(
                "{}?{}",
                endpoints::LOG_IN_VIEW,
                serde_urlencoded::to_string([("redirect_url", endpoint)]).unwrap()
            );
            assert_eq!(response.header("location"), expected);
        }
    }

    #[tokio::test]
    async fn unknown_routes_render_not_found() {
        let (server, _backend) = test_server().await;

        let response = server.get("/no/such/page").await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn the_log_in_page_is_public() {
        let (server, _backend) = test_server().await;

        let response = server.get(endpoints::LOG_IN_VIEW).await;

        response.assert_status_ok();
    }
}
