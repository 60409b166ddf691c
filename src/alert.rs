//! Alert messages swapped into the page out-of-band by htmx.
//!
//! Every page body includes an empty `#alert-container`, so any fragment
//! response can attach an alert without knowing which page it lands on.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

/// An alert message for display in the `#alert-container`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    Success { message: String, details: String },
    Error { message: String, details: String },
}

const ALERT_SUCCESS_STYLE: &str = "flex items-start gap-3 p-4 mb-4 rounded-lg \
    text-green-800 bg-green-50 dark:bg-gray-800 dark:text-green-400";
const ALERT_ERROR_STYLE: &str = "flex items-start gap-3 p-4 mb-4 rounded-lg \
    text-red-800 bg-red-50 dark:bg-gray-800 dark:text-red-400";

impl Alert {
    pub fn into_markup(self) -> Markup {
        let (style, message, details) = match self {
            Alert::Success { message, details } => (ALERT_SUCCESS_STYLE, message, details),
            Alert::Error { message, details } => (ALERT_ERROR_STYLE, message, details),
        };

        html!(
            div id="alert-container" hx-swap-oob="innerHTML"
            {
                div class=(style) role="alert"
                {
                    div
                    {
                        p class="font-medium" { (message) }

                        @if !details.is_empty()
                        {
                            p class="text-sm" { (details) }
                        }
                    }

                    button
                        type="button"
                        class="ms-auto bg-transparent border-none cursor-pointer"
                        aria-label="Close"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "✕"
                    }
                }
            }
        )
    }

    /// Render the alert as a standalone HTTP response with `status`.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Html(self.into_markup().into_string())).into_response()
    }
}
