use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::api::error::{ApiError, ErrorPayload};
use crate::config::{build_auth_header, CredentialProvider};

/// Shared HTTP client for the Picsilfy backend.
///
/// Every request carries `Authorization: Bearer <token>` when the
/// credential provider holds a token. There is no retry and no timeout
/// beyond what reqwest applies by default.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(concat!("picsilfy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request with the auth header attached.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, self.url(path));
        if let Some((name, value)) = build_auth_header(self.credentials.as_ref()) {
            builder = builder.header(&name, value);
        }
        builder
    }

    /// Send a request and decode the JSON body into `T`.
    ///
    /// `customize` adds the body or query to the prepared builder. An empty
    /// 2xx body decodes as JSON `null`, so `T` may be `()` or an `Option`.
    pub(crate) async fn execute<T, F>(
        &self,
        method: Method,
        path: &str,
        customize: F,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        tracing::debug!(%method, path, "Sending request");

        let response = customize(self.request(method.clone(), path))
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|source| ApiError::Transport {
            path: path.to_string(),
            source,
        })?;

        if !status.is_success() {
            let payload = ErrorPayload::from_body(&body);
            tracing::warn!(
                %method,
                path,
                status = status.as_u16(),
                message = payload.as_ref().map(|p| p.message.as_str()).unwrap_or(""),
                "Request rejected"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                payload,
            });
        }

        let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &body
        };

        serde_json::from_slice(body).map_err(|source| {
            tracing::warn!(%method, path, error = %source, "Response did not decode");
            ApiError::Decode {
                path: path.to_string(),
                source,
            }
        })
    }
}

/// Validate an id for use as a single path segment.
pub(crate) fn segment(id: &str) -> Result<&str, ApiError> {
    if id.is_empty() || id.contains(['/', '?', '#']) || id.chars().any(char::is_whitespace) {
        return Err(ApiError::InvalidPath(id.to_string()));
    }
    Ok(id)
}
