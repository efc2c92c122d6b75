use async_trait::async_trait;
use reqwest::{Client, Method};
use std::time::Duration;
use tracing::debug;

use crate::api::PostApi;
use crate::error::{SubakClientError, SubakClientResult};
use crate::models::CreatePostRequest;

/// Таймаут запроса по умолчанию.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(2000);

const CREATE_POST_PATH: &str = "/post";

#[derive(Debug, Clone)]
/// HTTP-клиент для REST API бэкенда маркетплейса.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт клиент с базовым URL сервера и таймаутом на весь запрос.
    ///
    /// Повторных попыток нет: один запрос, один ответ или ошибка.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> SubakClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|err| SubakClientError::Unexpected(err.to_string()))?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Базовый URL, с которым был создан клиент.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode_error(response: reqwest::Response) -> SubakClientError {
        let status = response.status();
        let body = response.text().await.ok();
        SubakClientError::from_http_status(status, body)
    }
}

#[async_trait]
impl PostApi for HttpClient {
    async fn create_post(
        &self,
        request: &CreatePostRequest,
        token: Option<&str>,
    ) -> SubakClientResult<()> {
        let url = self.endpoint(CREATE_POST_PATH);
        debug!(%url, title = %request.post_title, price = request.price, "sending create post");

        let mut builder = self.client.request(Method::POST, url).json(request);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(SubakClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = HttpClient::new("http://10.0.0.5:8080/", DEFAULT_REQUEST_TIMEOUT)
            .expect("client must build");
        let full = client.endpoint("/post");
        assert_eq!(full, "http://10.0.0.5:8080/post");
    }

    #[test]
    fn endpoint_without_trailing_slash() {
        let client = HttpClient::new("http://localhost", DEFAULT_REQUEST_TIMEOUT)
            .expect("client must build");
        assert_eq!(client.endpoint(CREATE_POST_PATH), "http://localhost/post");
        assert_eq!(client.base_url(), "http://localhost");
    }
}
