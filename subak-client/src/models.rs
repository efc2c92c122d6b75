use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Тело запроса `POST /post`.
pub struct CreatePostRequest {
    /// Заголовок объявления.
    pub post_title: String,
    /// Цена в вонах. Для раздачи всегда 0.
    pub price: u64,
}
