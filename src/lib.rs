//! MyPockit Web is the web client for the MyPockit expense tracker.
//!
//! This library serves HTML pages directly and sources all of its data from
//! the remote MyPockit REST backend.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod admin;
mod alert;
mod api;
mod app_state;
mod auth;
mod category;
mod charts;
mod dashboard;
mod endpoints;
mod fetch;
mod html;
mod internal_server_error;
mod months;
mod navigation;
mod not_found;
mod pagination;
mod report;
mod routing;
mod session;
mod statistics;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use api::ApiClient;
pub use app_state::AppState;
pub use pagination::PaginationConfig;
pub use routing::build_router;

use crate::{
    alert::Alert, internal_server_error::InternalServerError, not_found::NotFoundError,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The backend could not be reached, or the connection dropped before a
    /// response arrived.
    #[error("could not reach the MyPockit backend: {0}")]
    Network(String),

    /// The backend rejected the bearer token (HTTP 401).
    ///
    /// How this is surfaced depends on which route triggered it, see the
    /// policy in the auth module.
    #[error("the session token was rejected by the backend")]
    Unauthorized,

    /// The backend refused the operation for the authenticated user
    /// (HTTP 403). Never triggers a logout.
    #[error("the backend denied permission for this operation")]
    Forbidden,

    /// The backend answered with 2xx but the response envelope was missing or
    /// its status was not "SUCCESS".
    #[error("the backend reported a failure: {0}")]
    Api(String),

    /// The response body could not be decoded as the expected payload type.
    #[error("could not decode the backend response: {0}")]
    Decode(String),

    /// The session cookie is missing or could not be parsed.
    #[error("no valid session")]
    SessionMissing,

    /// The user provided credentials the backend did not accept.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::SessionMissing => {
                axum::response::Redirect::to(endpoints::LOG_IN_VIEW).into_response()
            }
            Error::Network(reason) => {
                tracing::error!("backend unreachable: {reason}");
                InternalServerError {
                    summary: "Cannot reach the server",
                    advice: "Make sure the MyPockit backend is running and try again.",
                }
                .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    ///
    /// Used by fragment endpoints where a full error page would be swapped
    /// into part of a page.
    pub(crate) fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::Forbidden => (
                StatusCode::FORBIDDEN,
                Alert::Error {
                    message: "Permission denied".to_owned(),
                    details: "You do not have permission to perform this action.".to_owned(),
                },
            ),
            Error::Api(reason) => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "Request failed".to_owned(),
                    details: format!(
                        "The server could not complete the request: {reason}. Try again later."
                    ),
                },
            ),
            Error::Network(_) => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "Cannot reach the server".to_owned(),
                    details: "Make sure the MyPockit backend is running and try again.".to_owned(),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details: "An unexpected error occurred. Try again later.".to_owned(),
                    },
                )
            }
        };

        alert.into_response_with(status_code)
    }
}
