//! Backend API Access
//!
//! One module per backend resource. Every call goes through [`ApiClient`],
//! which joins the base URL, sends cookies, attaches the bearer token and
//! turns non-2xx responses into [`ApiError::Server`].

mod endpoint;
mod error;

pub mod auth;
pub mod branch;
pub mod department;
pub mod kpi;
pub mod revenue;
pub mod role;
pub mod task;
pub mod upload;

pub use endpoint::{Endpoint, Resource, TrashAction};
pub use error::{ApiError, ApiResult};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// `{ "message": "..." }` reply used by most mutations
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Serialize)]
struct BranchIdArgs<'a> {
    #[serde(rename = "branchId")]
    branch_id: &'a str,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token,
        }
    }

    fn request(&self, endpoint: &Endpoint) -> reqwest::RequestBuilder {
        let req = self.http.request(endpoint.method.clone(), endpoint.url(&self.base_url));
        #[cfg(target_arch = "wasm32")]
        let req = req.fetch_credentials_include();
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Request without a body
    pub async fn call<T: DeserializeOwned>(&self, endpoint: Endpoint) -> ApiResult<T> {
        let req = self.request(&endpoint);
        self.execute(&endpoint, req).await
    }

    /// Request with a JSON body
    pub async fn send<B, T>(&self, endpoint: Endpoint, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.request(&endpoint).json(body);
        self.execute(&endpoint, req).await
    }

    async fn execute<T: DeserializeOwned>(&self, endpoint: &Endpoint, req: reqwest::RequestBuilder) -> ApiResult<T> {
        tracing::debug!(method = %endpoint.method, path = %endpoint.path, "API request");

        let response = req.send().await.map_err(|e| {
            tracing::error!(path = %endpoint.path, error = %e, "API request failed");
            ApiError::network(e)
        })?;
        let status = response.status();
        let text = response.text().await.map_err(ApiError::network)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.trim().is_empty());
            tracing::warn!(path = %endpoint.path, status = status.as_u16(), ?message, "API error response");
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        decode_body(&text)
    }
}

fn decode_body<T: DeserializeOwned>(text: &str) -> ApiResult<T> {
    let text = if text.trim().is_empty() { "{}" } else { text };
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// `POST <resource>/get` with `{branchId}`
pub(crate) async fn list_for_branch<T: DeserializeOwned>(
    client: &ApiClient,
    resource: Resource,
    branch_id: &str,
) -> ApiResult<Vec<T>> {
    client
        .send(Endpoint::for_branch(resource), &BranchIdArgs { branch_id })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_decodes_as_message() {
        let message: Message = decode_body("").unwrap();
        assert_eq!(message.message, "");

        let message: Message = decode_body(r#"{"status":true,"message":"Task created"}"#).unwrap();
        assert_eq!(message.message, "Task created");

        assert!(matches!(decode_body::<Vec<String>>("{}"), Err(ApiError::Decode(_))));
    }
}
