//! Клиентское ядро мобильного маркетплейса subak.
//!
//! Содержит:
//! - контейнер пользовательской сессии (`SessionStore`);
//! - экран создания объявления (`NewPostScreen`): черновик, проверка
//!   обязательных полей, отправка `POST /post` и алерт с автоскрытием;
//! - HTTP-клиент (`reqwest`) за трейтом `PostApi`;
//! - настройки из окружения (`ClientConfig`).
//!
//! Навигация подключается снаружи через трейт `Navigator`.
#![warn(missing_docs)]

mod alert;
mod api;
mod config;
mod draft;
mod error;
mod http_client;
mod models;
mod navigation;
mod session;
mod submission;

pub use alert::{
    Alert, AlertChannel, CONNECTION_UNSTABLE_MESSAGE, DEFAULT_ALERT_DURATION, alert_message,
};
pub use api::PostApi;
pub use config::{ClientConfig, normalize_server};
pub use draft::{DealType, DraftError, DraftPost, MAX_IMAGES, MissingFields};
pub use error::{SubakClientError, SubakClientResult};
pub use http_client::{DEFAULT_REQUEST_TIMEOUT, HttpClient};
pub use models::CreatePostRequest;
pub use navigation::{Destination, Navigator};
pub use session::{Session, SessionAction, SessionStore};
pub use submission::{
    NewPostScreen, SUCCESS_DESTINATION, ScreenState, SubmissionPhase, SubmitOutcome,
};
