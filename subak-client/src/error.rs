use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `subak-client`.
///
/// Варианты взаимоисключающие и соответствуют трём способам, которыми может
/// закончиться неудачная отправка запроса.
pub enum SubakClientError {
    /// Сервер ответил статусом вне диапазона 2xx.
    #[error("server rejected request ({status}): {message}")]
    Server {
        /// HTTP-статус ответа.
        status: u16,
        /// Тело ответа сервера.
        message: String,
    },

    /// Ответ не получен: таймаут, отказ в соединении, обрыв при отправке.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Любая другая ошибка при построении или отправке запроса.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Результат операций `subak-client`.
pub type SubakClientResult<T> = Result<T, SubakClientError>;

impl SubakClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, body: Option<String>) -> Self {
        let message = body
            .filter(|body| !body.trim().is_empty())
            .unwrap_or_else(|| format!("http status {status}"));
        Self::Server {
            status: status.as_u16(),
            message,
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_builder() {
            return Self::Unexpected(err.to_string());
        }
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        if err.is_timeout() || err.is_connect() || err.is_request() {
            return Self::Network(err);
        }
        Self::Unexpected(err.to_string())
    }

    /// `true`, если ответ от сервера так и не был получен.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
