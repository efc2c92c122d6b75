#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use subak_client::{
    AlertChannel, CreatePostRequest, Destination, Navigator, NewPostScreen, PostApi,
    SessionStore, SubakClientResult,
};
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub request: CreatePostRequest,
    pub token: Option<String>,
}

/// Бэкенд без сети: запоминает запросы и отвечает заранее заданными результатами.
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<VecDeque<SubakClientResult<()>>>,
    gate: Option<Arc<Notify>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Каждый запрос ждёт `gate.notify_one()` перед ответом.
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn respond_with(self, result: SubakClientResult<()>) -> Self {
        self.responses
            .lock()
            .expect("responses lock")
            .push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }
}

#[async_trait]
impl PostApi for FakeApi {
    async fn create_post(
        &self,
        request: &CreatePostRequest,
        token: Option<&str>,
    ) -> SubakClientResult<()> {
        self.calls.lock().expect("calls lock").push(RecordedCall {
            request: request.clone(),
            token: token.map(str::to_string),
        });

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or(Ok(()))
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<Destination>>,
    backs: AtomicUsize,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<Destination> {
        self.visited.lock().expect("visited lock").clone()
    }

    pub fn back_count(&self) -> usize {
        self.backs.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, destination: Destination) {
        self.visited
            .lock()
            .expect("visited lock")
            .push(destination);
    }

    fn go_back(&self) {
        self.backs.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct Harness<A> {
    pub api: Arc<A>,
    pub navigator: Arc<RecordingNavigator>,
    pub session: SessionStore,
    pub screen: NewPostScreen<A, RecordingNavigator>,
}

pub fn harness<A: PostApi>(api: A) -> Harness<A> {
    let api = Arc::new(api);
    let navigator = Arc::new(RecordingNavigator::default());
    let session = SessionStore::new();
    let screen = NewPostScreen::new(
        Arc::clone(&api),
        Arc::clone(&navigator),
        &session,
        AlertChannel::default(),
    );

    Harness {
        api,
        navigator,
        session,
        screen,
    }
}
