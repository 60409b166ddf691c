//! Proxies the backend's binary report exports to the browser.
//!
//! A 401 on an export path never evicts the session; the failure is shown
//! inline so an expired report token cannot log the user out mid-session.

use axum::{
    Extension,
    extract::State,
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};

use crate::{AppState, Error, api::paths, session::Session};

const PDF_CONTENT_TYPE: &str = "application/pdf";
const EXCEL_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Download the user's transactions as a PDF report.
pub async fn get_pdf_report(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Response {
    proxy_report(
        &state,
        &session,
        paths::REPORT_EXPORT_PDF,
        PDF_CONTENT_TYPE,
        "transactions-report.pdf",
    )
    .await
}

/// Download the user's transactions as an Excel report.
pub async fn get_excel_report(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Response {
    proxy_report(
        &state,
        &session,
        paths::REPORT_EXPORT_EXCEL,
        EXCEL_CONTENT_TYPE,
        "transactions-report.xlsx",
    )
    .await
}

async fn proxy_report(
    state: &AppState,
    session: &Session,
    path: &str,
    content_type: &'static str,
    file_name: &str,
) -> Response {
    let result = state
        .api
        .download(
            path,
            Some(&session.token),
            &[("email", session.email.clone())],
        )
        .await;

    match result {
        Ok(bytes) => {
            let mut response = bytes.into_response();
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));

            let disposition = format!("attachment; filename=\"{file_name}\"");
            match HeaderValue::from_str(&disposition) {
                Ok(value) => {
                    response.headers_mut().insert(header::CONTENT_DISPOSITION, value);
                }
                Err(error) => {
                    tracing::warn!("could not set the download file name: {error}");
                }
            }

            response
        }
        Err(error) => {
            tracing::error!("report export failed: {error}");
            // Includes expired tokens: the session survives a failed export.
            if error == Error::Unauthorized {
                Error::Api("the backend rejected the report token".to_owned())
                    .into_alert_response()
            } else {
                error.into_alert_response()
            }
        }
    }
}
