use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

use crate::error::SubakClientError;

/// Сколько алерт висит на экране по умолчанию.
pub const DEFAULT_ALERT_DURATION: Duration = Duration::from_millis(6000);

/// Сообщение, когда сервер не ответил (таймаут или нет соединения).
pub const CONNECTION_UNSTABLE_MESSAGE: &str =
    "서버와의 연결이 원활하지 않습니다. \n잠시 후 다시 시도해주세요.";

/// Текст алерта для ошибки отправки.
///
/// - ответ сервера не 2xx: тело ответа как есть;
/// - нет ответа: фиксированное сообщение о соединении;
/// - прочее: общее сообщение с текстом ошибки.
pub fn alert_message(err: &SubakClientError) -> String {
    match err {
        SubakClientError::Server { message, .. } => message.clone(),
        SubakClientError::Network(_) => CONNECTION_UNSTABLE_MESSAGE.to_string(),
        SubakClientError::Unexpected(message) => {
            format!("오류가 발생했습니다. \n[{message}]")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Всплывающее сообщение об ошибке.
pub struct Alert {
    /// Порядковый номер показа.
    pub id: u64,
    /// Текст сообщения.
    pub message: String,
    /// Когда алерт был показан.
    pub shown_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
/// Слот для одного алерта с автоскрытием.
///
/// Очереди нет: новый алерт заменяет текущий. Таймер скрытия не отменяется
/// ручным закрытием, но скрывает только тот алерт, для которого был запущен.
pub struct AlertChannel {
    state: Arc<watch::Sender<Option<Alert>>>,
    next_id: Arc<AtomicU64>,
    duration: Duration,
}

impl Default for AlertChannel {
    fn default() -> Self {
        Self::new(DEFAULT_ALERT_DURATION)
    }
}

impl AlertChannel {
    /// Создаёт пустой слот с заданным временем показа.
    pub fn new(duration: Duration) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            state: Arc::new(state),
            next_id: Arc::new(AtomicU64::new(0)),
            duration,
        }
    }

    /// Время показа.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Текущий видимый алерт.
    pub fn current(&self) -> Option<Alert> {
        self.state.borrow().clone()
    }

    /// Подписка на показ и скрытие.
    pub fn subscribe(&self) -> watch::Receiver<Option<Alert>> {
        self.state.subscribe()
    }

    /// Показывает алерт и запускает таймер скрытия.
    ///
    /// Должен вызываться внутри рантайма Tokio.
    pub fn show(&self, message: impl Into<String>) -> Alert {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let alert = Alert {
            id,
            message: message.into(),
            shown_at: Utc::now(),
        };
        self.state.send_replace(Some(alert.clone()));
        debug!(id, "alert shown");

        let state = Arc::clone(&self.state);
        let duration = self.duration;
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let hidden = state.send_if_modified(|current| match current {
                Some(alert) if alert.id == id => {
                    *current = None;
                    true
                }
                _ => false,
            });
            if hidden {
                debug!(id, "alert hidden");
            }
        });

        alert
    }

    /// Закрывает алерт вручную.
    pub fn dismiss(&self) {
        self.state.send_if_modified(|current| current.take().is_some());
    }
}
