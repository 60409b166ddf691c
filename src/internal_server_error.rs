//! The full-page 500 view. Backend failures render here when there is no
//! page fragment to show an inline alert in.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// A whole-page internal error: a one-line summary of what broke and a
/// suggested remedy for the user.
pub struct InternalServerError<'a> {
    pub summary: &'a str,
    pub advice: &'a str,
}

impl Default for InternalServerError<'_> {
    fn default() -> Self {
        Self {
            summary: "Something went wrong on our side.",
            advice: "Try again in a moment. If this keeps happening, \
                the MyPockit backend may be down.",
        }
    }
}

impl IntoResponse for InternalServerError<'_> {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(
                error_view("Internal Server Error", "500", self.summary, self.advice)
                    .into_string(),
            ),
        )
            .into_response()
    }
}

/// The page clients are redirected to when a request fails beyond repair.
pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}

#[cfg(test)]
mod internal_server_error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::test_utils::{assert_valid_html, parse_html_document};

    use super::{InternalServerError, get_internal_server_error_page};

    #[tokio::test]
    async fn the_error_page_is_a_500() {
        let response = get_internal_server_error_page().await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        assert!(document.html().contains("500"));
    }

    #[tokio::test]
    async fn a_custom_summary_is_rendered() {
        let response = InternalServerError {
            summary: "Cannot reach the server",
            advice: "Make sure the MyPockit backend is running and try again.",
        }
        .into_response();

        let document = parse_html_document(response).await;
        assert!(document.html().contains("Cannot reach the server"));
    }
}
