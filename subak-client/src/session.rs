use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Данные пользовательской сессии.
pub struct Session {
    /// Имя пользователя.
    pub name: String,
    /// Телефон.
    pub phone: String,
    /// Email.
    pub email: String,
    /// Адрес (район сделки).
    pub address: String,
    /// Признак входа.
    pub logined: bool,
    /// Токен доступа.
    pub token: String,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            logined: true,
            token: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Запись одного поля сессии.
pub enum SessionAction {
    /// Заменить имя.
    SetName(String),
    /// Заменить телефон.
    SetPhone(String),
    /// Заменить email.
    SetEmail(String),
    /// Заменить адрес.
    SetAddress(String),
    /// Заменить признак входа.
    SetLogined(bool),
    /// Заменить токен.
    SetToken(String),
}

impl Session {
    /// Применяет действие: поле заменяется безусловно, последняя запись побеждает.
    pub fn apply(&mut self, action: SessionAction) {
        match action {
            SessionAction::SetName(name) => self.name = name,
            SessionAction::SetPhone(phone) => self.phone = phone,
            SessionAction::SetEmail(email) => self.email = email,
            SessionAction::SetAddress(address) => self.address = address,
            SessionAction::SetLogined(logined) => self.logined = logined,
            SessionAction::SetToken(token) => self.token = token,
        }
    }
}

#[derive(Debug, Clone)]
/// Общий контейнер сессии.
///
/// Передаётся потребителям явно; клоны разделяют одно состояние.
/// Подписчики получают уведомление после каждой записи.
pub struct SessionStore {
    state: Arc<watch::Sender<Session>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Создаёт контейнер с начальными значениями.
    pub fn new() -> Self {
        Self::with_session(Session::default())
    }

    /// Создаёт контейнер с заданной сессией.
    pub fn with_session(session: Session) -> Self {
        let (state, _) = watch::channel(session);
        Self {
            state: Arc::new(state),
        }
    }

    /// Копия текущей сессии.
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Подписка на изменения.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Применяет действие и уведомляет подписчиков.
    pub fn dispatch(&self, action: SessionAction) {
        self.state.send_modify(|session| session.apply(action));
    }

    /// Заменяет имя.
    pub fn set_name(&self, name: impl Into<String>) {
        self.dispatch(SessionAction::SetName(name.into()));
    }

    /// Заменяет телефон.
    pub fn set_phone(&self, phone: impl Into<String>) {
        self.dispatch(SessionAction::SetPhone(phone.into()));
    }

    /// Заменяет email.
    pub fn set_email(&self, email: impl Into<String>) {
        self.dispatch(SessionAction::SetEmail(email.into()));
    }

    /// Заменяет адрес.
    pub fn set_address(&self, address: impl Into<String>) {
        self.dispatch(SessionAction::SetAddress(address.into()));
    }

    /// Заменяет признак входа.
    pub fn set_logined(&self, logined: bool) {
        self.dispatch(SessionAction::SetLogined(logined));
    }

    /// Заменяет токен.
    pub fn set_token(&self, token: impl Into<String>) {
        self.dispatch(SessionAction::SetToken(token.into()));
    }

    /// Токен для заголовка `Authorization`, если он не пустой.
    pub fn bearer_token(&self) -> Option<String> {
        let session = self.state.borrow();
        if session.token.is_empty() {
            return None;
        }
        Some(session.token.clone())
    }
}
