use async_trait::async_trait;

use crate::error::SubakClientResult;
use crate::models::CreatePostRequest;

/// Бэкенд, принимающий новые объявления.
///
/// Экран создания объявления зависит только от этого трейта, поэтому в
/// тестах его можно заменить фейком без сети.
#[async_trait]
pub trait PostApi: Send + Sync {
    /// Отправляет объявление. `Ok(())` означает ответ 2xx.
    ///
    /// `token` передаётся как `Authorization: Bearer`, если задан.
    async fn create_post(
        &self,
        request: &CreatePostRequest,
        token: Option<&str>,
    ) -> SubakClientResult<()>;
}
