//! Shared request plumbing for the platform's REST endpoints.
//!
//! Client-side (hydrate): `gloo-net` requests carrying the project `apikey`
//! header and, when signed in, a bearer token. Other builds only compile the
//! pure URL helpers.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use crate::config::AppConfig;

/// Join the platform base URL and a path that starts with `/`.
pub fn endpoint(config: &AppConfig, path: &str) -> String {
    format!("{}{}", config.backend_url.trim_end_matches('/'), path)
}

/// Percent-encode a single query value.
pub fn encode_query_value(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(feature = "hydrate")]
pub(crate) use client_side::*;

#[cfg(feature = "hydrate")]
mod client_side {
    use gloo_net::http::{RequestBuilder, Response};
    use serde::de::DeserializeOwned;

    use crate::config::AppConfig;
    use crate::net::error::{ApiError, error_body_message};

    /// Attach the project key and optional bearer token.
    pub(crate) fn with_auth(builder: RequestBuilder, config: &AppConfig, bearer: Option<&str>) -> RequestBuilder {
        let token = bearer.unwrap_or(&config.anon_key);
        builder
            .header("apikey", &config.anon_key)
            .header("Authorization", &format!("Bearer {token}"))
    }

    pub(crate) fn network(err: gloo_net::Error) -> ApiError {
        ApiError::Network(err.to_string())
    }

    pub(crate) async fn check(resp: Response) -> Result<Response, ApiError> {
        if resp.ok() {
            return Ok(resp);
        }
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Err(ApiError::Http {
            status,
            message: error_body_message(&body),
        })
    }

    pub(crate) async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let resp = check(resp).await?;
        resp.json::<T>().await.map_err(|e| ApiError::Parse(e.to_string()))
    }

    pub(crate) async fn read_empty(resp: Response) -> Result<(), ApiError> {
        check(resp).await.map(|_| ())
    }
}
