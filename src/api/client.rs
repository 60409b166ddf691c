//! The HTTP client that talks to the MyPockit backend.

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{Serialize, de::DeserializeOwned};

use crate::Error;

use super::envelope::{ApiEnvelope, BlobErrorPayload};

/// A thin wrapper over [reqwest::Client] that knows the backend's base URL,
/// attaches the bearer token, and maps transport and status failures onto
/// [Error].
///
/// Requests are not given a client-side timeout, slow report exports are
/// allowed to take as long as the backend needs.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the backend at `base_url`, e.g.
    /// `http://localhost:8080/mypockit`. A trailing slash is trimmed so that
    /// paths can be joined naively.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let request = self.http.request(method, url);

        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, Error> {
        let response = request.send().await.map_err(|error| {
            tracing::warn!("request to the backend failed: {error}");
            Error::Network(error.to_string())
        })?;

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::FORBIDDEN => Err(Error::Forbidden),
            status => Err(Error::Api(format!("HTTP {status}"))),
        }
    }

    async fn decode_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Option<T>, Error> {
        response
            .json::<ApiEnvelope>()
            .await
            .map_err(|error| Error::Decode(error.to_string()))?
            .into_result()
    }

    /// GET an envelope-wrapped payload.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        query: &[(&str, String)],
    ) -> Result<Option<T>, Error> {
        let response = self
            .send(self.request(Method::GET, path, token).query(query))
            .await?;

        Self::decode_envelope(response).await
    }

    /// POST a JSON body, expecting an envelope-wrapped payload back.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        token: Option<&str>,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<Option<T>, Error> {
        let response = self
            .send(
                self.request(Method::POST, path, token)
                    .query(query)
                    .json(body),
            )
            .await?;

        Self::decode_envelope(response).await
    }

    /// POST a JSON body whose response is a bare payload rather than the
    /// usual envelope. Only the sign-in endpoint behaves this way.
    pub(crate) async fn post_unwrapped<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let response = self
            .send(self.request(Method::POST, path, None).json(body))
            .await?;

        response
            .json::<T>()
            .await
            .map_err(|error| Error::Decode(error.to_string()))
    }

    /// PUT a JSON body, expecting an envelope-wrapped payload back.
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        token: Option<&str>,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<Option<T>, Error> {
        let response = self
            .send(
                self.request(Method::PUT, path, token)
                    .query(query)
                    .json(body),
            )
            .await?;

        Self::decode_envelope(response).await
    }

    /// DELETE with query parameters, expecting an envelope-wrapped payload.
    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        query: &[(&str, String)],
    ) -> Result<Option<T>, Error> {
        let response = self
            .send(self.request(Method::DELETE, path, token).query(query))
            .await?;

        Self::decode_envelope(response).await
    }

    /// GET a binary document such as a PDF or spreadsheet export.
    ///
    /// The backend signals authentication failures on these endpoints by
    /// embedding a JSON error object in the body, sometimes under a 2xx
    /// status, so a successful download is re-checked before it is trusted.
    pub(crate) async fn download(
        &self,
        path: &str,
        token: Option<&str>,
        query: &[(&str, String)],
    ) -> Result<Vec<u8>, Error> {
        let response = self
            .send(self.request(Method::GET, path, token).query(query))
            .await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|error| Error::Network(error.to_string()))?;

        if let Ok(payload) = serde_json::from_slice::<BlobErrorPayload>(&bytes) {
            if payload.status == Some(401) || payload.error.as_deref() == Some("Unauthorized") {
                return Err(Error::Unauthorized);
            }
        }

        Ok(bytes.to_vec())
    }
}
