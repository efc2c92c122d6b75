//! Экран создания объявления: черновик, проверка полей и отправка.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::alert::{Alert, AlertChannel, alert_message};
use crate::api::PostApi;
use crate::draft::{DealType, DraftError, DraftPost, MissingFields};
use crate::error::SubakClientError;
use crate::models::CreatePostRequest;
use crate::navigation::{Destination, Navigator};
use crate::session::SessionStore;

/// Куда ведёт успешная публикация.
pub const SUCCESS_DESTINATION: Destination = Destination::FooterTabs;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Фаза отправки.
pub enum SubmissionPhase {
    /// Можно редактировать и отправлять.
    #[default]
    Idle,
    /// Запрос отправлен, ответа ещё нет.
    Pending,
    /// Объявление опубликовано, экран покинут.
    Navigated,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Локальное состояние экрана.
pub struct ScreenState {
    /// Черновик.
    pub draft: DraftPost,
    /// Подсветка незаполненных полей.
    pub missing: MissingFields,
    /// Фаза отправки.
    pub phase: SubmissionPhase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Чем закончилось нажатие «작성 완료».
pub enum SubmitOutcome {
    /// Не заполнены обязательные поля, запрос не отправлялся.
    Incomplete(MissingFields),
    /// Предыдущая отправка ещё не завершилась, нажатие проигнорировано.
    InFlight,
    /// Экран уже покинут после успешной публикации.
    AlreadyNavigated,
    /// Сервер принял объявление.
    Navigated(Destination),
    /// Отправка не удалась, показан алерт.
    Failed(Alert),
}

/// Экран «내 물건 팔기».
///
/// Клоны разделяют одно состояние, поэтому обработчики ввода и отправки
/// могут работать с экраном одновременно.
pub struct NewPostScreen<A, N> {
    api: Arc<A>,
    navigator: Arc<N>,
    session: SessionStore,
    alerts: AlertChannel,
    state: Arc<watch::Sender<ScreenState>>,
}

impl<A, N> Clone for NewPostScreen<A, N> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            navigator: Arc::clone(&self.navigator),
            session: self.session.clone(),
            alerts: self.alerts.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<A, N> NewPostScreen<A, N>
where
    A: PostApi,
    N: Navigator,
{
    /// Открывает экран с пустым черновиком.
    pub fn new(
        api: Arc<A>,
        navigator: Arc<N>,
        session: &SessionStore,
        alerts: AlertChannel,
    ) -> Self {
        let (state, _) = watch::channel(ScreenState::default());
        Self {
            api,
            navigator,
            session: session.clone(),
            alerts,
            state: Arc::new(state),
        }
    }

    /// Копия текущего состояния.
    pub fn snapshot(&self) -> ScreenState {
        self.state.borrow().clone()
    }

    /// Подписка на изменения состояния.
    pub fn subscribe(&self) -> watch::Receiver<ScreenState> {
        self.state.subscribe()
    }

    /// Слот алертов этого экрана.
    pub fn alerts(&self) -> &AlertChannel {
        &self.alerts
    }

    /// Ввод заголовка. Любое изменение снимает подсветку поля.
    pub fn set_title(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_modify(|state| {
            state.draft.set_title(text);
            state.missing.title = false;
        });
    }

    /// Ввод описания. Любое изменение снимает подсветку поля.
    pub fn set_content(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_modify(|state| {
            state.draft.set_content(text);
            state.missing.content = false;
        });
    }

    /// Ввод цены в текстовом виде.
    pub fn set_price_text(&self, text: &str) -> Result<(), DraftError> {
        self.edit_draft(|draft| draft.set_price_text(text))
    }

    /// Ввод цены числом.
    pub fn set_price(&self, price: u64) -> Result<(), DraftError> {
        self.edit_draft(|draft| draft.set_price(price))
    }

    /// Переключатель «판매하기 / 나눔하기».
    pub fn select_deal(&self, deal_type: DealType) {
        self.state.send_modify(|state| state.draft.select_deal(deal_type));
    }

    /// Прикрепляет фото.
    pub fn add_image(&self) -> Result<(), DraftError> {
        self.edit_draft(DraftPost::add_image)
    }

    /// Открепляет фото.
    pub fn remove_image(&self) {
        self.state.send_modify(|state| state.draft.remove_image());
    }

    /// Кнопка «назад».
    pub fn go_back(&self) {
        self.navigator.go_back();
    }

    fn edit_draft<F>(&self, edit: F) -> Result<(), DraftError>
    where
        F: FnOnce(&mut DraftPost) -> Result<(), DraftError>,
    {
        let mut result = Ok(());
        self.state.send_if_modified(|state| {
            result = edit(&mut state.draft);
            result.is_ok()
        });
        result
    }

    /// Проверяет черновик и отправляет его на сервер.
    ///
    /// Пустой заголовок или описание подсвечиваются без обращения к сети.
    /// Пока запрос в полёте, повторные нажатия игнорируются.
    pub async fn submit(&self) -> SubmitOutcome {
        let mut decision = Decision::Ignored(SubmissionPhase::Idle);
        self.state.send_if_modified(|state| {
            if state.phase != SubmissionPhase::Idle {
                decision = Decision::Ignored(state.phase);
                return false;
            }

            let missing = state.draft.missing_fields();
            if missing.any() {
                state.missing.title |= missing.title;
                state.missing.content |= missing.content;
                decision = Decision::Incomplete(missing);
                return true;
            }

            state.phase = SubmissionPhase::Pending;
            decision = Decision::Send(state.draft.to_request());
            true
        });

        let request = match decision {
            Decision::Ignored(SubmissionPhase::Navigated) => {
                return SubmitOutcome::AlreadyNavigated;
            }
            Decision::Ignored(_) => return SubmitOutcome::InFlight,
            Decision::Incomplete(missing) => {
                info!(
                    no_title = missing.title,
                    no_content = missing.content,
                    "post draft is incomplete"
                );
                return SubmitOutcome::Incomplete(missing);
            }
            Decision::Send(request) => request,
        };

        info!(title = %request.post_title, price = request.price, "submitting post");
        let _pending = PendingGuard {
            state: self.state.as_ref(),
        };
        let token = self.session.bearer_token();
        let result = self.api.create_post(&request, token.as_deref()).await;

        match result {
            Ok(()) => {
                self.state
                    .send_modify(|state| state.phase = SubmissionPhase::Navigated);
                info!(destination = SUCCESS_DESTINATION.route_name(), "post created");
                self.navigator.navigate(SUCCESS_DESTINATION);
                SubmitOutcome::Navigated(SUCCESS_DESTINATION)
            }
            Err(err) => {
                log_failure(&err);
                self.state
                    .send_modify(|state| state.phase = SubmissionPhase::Idle);
                let alert = self.alerts.show(alert_message(&err));
                SubmitOutcome::Failed(alert)
            }
        }
    }
}

enum Decision {
    Ignored(SubmissionPhase),
    Incomplete(MissingFields),
    Send(CreatePostRequest),
}

/// Снимает `Pending`, если `submit` бросили посреди запроса
/// (таймаут, `select!`, отмена задачи).
struct PendingGuard<'a> {
    state: &'a watch::Sender<ScreenState>,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|state| {
            if state.phase != SubmissionPhase::Pending {
                return false;
            }
            state.phase = SubmissionPhase::Idle;
            true
        });
    }
}

fn log_failure(err: &SubakClientError) {
    match err {
        SubakClientError::Server { status, message } => {
            error!(status, %message, "post rejected by server");
        }
        SubakClientError::Network(err) => warn!(error = %err, "post request got no response"),
        SubakClientError::Unexpected(message) => {
            error!(%message, "post request failed unexpectedly");
        }
    }
}
