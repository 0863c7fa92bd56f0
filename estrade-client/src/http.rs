//! HTTP transport for network-based API calls

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::ApiResponse;
use std::sync::Arc;
use tokio::sync::RwLock;

/// HTTP client shared by all API implementations
///
/// Cloning is cheap and clones share the bearer token, so a login through
/// one handle authenticates every other handle.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            token: Arc::new(RwLock::new(config.token.clone())),
        }
    }

    /// Replace the bearer token; `None` clears it
    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    /// Get a copy of the current token
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Build authorization header value
    async fn auth_header(&self) -> Option<String> {
        self.token
            .read()
            .await
            .as_ref()
            .map(|t| format!("Bearer {}", t))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        mut request: reqwest::RequestBuilder,
    ) -> ClientResult<T> {
        if let Some(auth) = self.auth_header().await {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.client.get(self.url(path))).await
    }

    /// Make a GET request with URL query parameters
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        self.send(self.client.get(self.url(path)).query(query)).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.client.post(self.url(path))).await
    }

    /// Make a PATCH request with JSON body
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.client.patch(self.url(path)).json(body))
            .await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.client.delete(self.url(path))).await
    }

    /// Upload a file as multipart form data under the `file` field
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<T> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        self.send(self.client.post(self.url(path)).multipart(form))
            .await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            let message = Self::error_message(status, text);
            tracing::debug!(status = %status, %message, "API request failed");
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(message)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
                StatusCode::CONFLICT => Err(ClientError::Conflict(message)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(message)),
                _ => Err(ClientError::Internal(message)),
            };
        }

        response.json().await.map_err(Into::into)
    }

    /// Extract the server's message from an error body, falling back to raw text
    fn error_message(status: StatusCode, text: String) -> String {
        if let Ok(body) = serde_json::from_str::<ApiResponse<serde_json::Value>>(&text) {
            if !body.message.is_empty() {
                return body.message;
            }
        }

        if text.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            text
        }
    }
}

#[async_trait::async_trait]
impl crate::api::TokenSink for HttpClient {
    async fn set_token(&self, token: Option<String>) {
        HttpClient::set_token(self, token).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let client = HttpClient::new(&ClientConfig::new("http://localhost:8080/"));
        assert_eq!(
            client.url("/api/structures"),
            "http://localhost:8080/api/structures"
        );
        assert_eq!(
            client.url("api/structures"),
            "http://localhost:8080/api/structures"
        );
    }

    #[test]
    fn test_error_message_extraction() {
        let body = r#"{"code":7002,"message":"Friendship already exists"}"#.to_string();
        assert_eq!(
            HttpClient::error_message(StatusCode::CONFLICT, body),
            "Friendship already exists"
        );

        let raw = "plain text error".to_string();
        assert_eq!(
            HttpClient::error_message(StatusCode::BAD_REQUEST, raw),
            "plain text error"
        );

        assert_eq!(
            HttpClient::error_message(StatusCode::NOT_FOUND, String::new()),
            "Not Found"
        );
    }
}
