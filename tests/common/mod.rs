#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use refbot::application::services::{
    CommandService, PipelineService, ReferralSettings, ReferralUrlBuilder, UpdateService,
};
use refbot::domain::entities::{BotUser, LinkRequest, NewLinkRequest};
use refbot::domain::repositories::{RequestRepository, UserRepository};
use refbot::error::AppError;
use refbot::infrastructure::pacer::Pacer;
use refbot::infrastructure::resolver::{RedirectResolver, ResolveError};
use refbot::infrastructure::shortener::{LinkShortener, ShortenError};
use refbot::infrastructure::telegram::{ChatTransport, ReplyFormat, TransportError};
use refbot::state::AppState;
use refbot::utils::domain_matcher::{DomainMatch, DomainMatcher};
use refbot::utils::path_canonicalizer::ProductMarkers;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use url::Url;

pub const ADMIN_ID: i64 = 1;
pub const REFERRAL_ID: &str = "refbot-21";

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<HashMap<i64, BotUser>>,
    pub unavailable: AtomicBool,
}

impl InMemoryUsers {
    pub fn with_admin(telegram_id: i64) -> Self {
        let store = Self::default();
        let mut admin = BotUser::new(telegram_id);
        admin.is_admin = true;
        store.insert(admin);
        store
    }

    pub fn insert(&self, user: BotUser) {
        self.users.lock().unwrap().insert(user.telegram_id, user);
    }

    pub fn get(&self, telegram_id: i64) -> Option<BotUser> {
        self.users.lock().unwrap().get(&telegram_id).cloned()
    }

    fn check(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::internal(
                "Database error",
                serde_json::json!({"reason": "connection refused"}),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn upsert_active(&self, telegram_id: i64) -> Result<(), AppError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        users
            .entry(telegram_id)
            .or_insert_with(|| BotUser::new(telegram_id))
            .has_blocked_bot = false;
        Ok(())
    }

    async fn set_blocked(&self, telegram_id: i64, blocked: bool) -> Result<(), AppError> {
        self.check()?;
        if let Some(user) = self.users.lock().unwrap().get_mut(&telegram_id) {
            user.has_blocked_bot = blocked;
        }
        Ok(())
    }

    async fn list_reachable(&self) -> Result<Vec<BotUser>, AppError> {
        self.check()?;
        let mut users: Vec<BotUser> = self
            .users
            .lock()
            .unwrap()
            .values()
            .filter(|u| u.is_reachable())
            .cloned()
            .collect();
        users.sort_by_key(|u| u.telegram_id);
        Ok(users)
    }

    async fn is_admin(&self, telegram_id: i64) -> Result<bool, AppError> {
        self.check()?;
        Ok(self.get(telegram_id).is_some_and(|u| u.is_admin))
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.check()?;
        Ok(self.users.lock().unwrap().len() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryRequests {
    requests: Mutex<Vec<LinkRequest>>,
}

impl InMemoryRequests {
    pub fn all(&self) -> Vec<LinkRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn insert_at(&self, telegram_id: i64, url: &str, created_at: DateTime<Utc>) {
        let mut requests = self.requests.lock().unwrap();
        let id = requests.len() as i64 + 1;
        requests.push(LinkRequest::new(id, telegram_id, url.to_string(), created_at));
    }
}

#[async_trait]
impl RequestRepository for InMemoryRequests {
    async fn create(&self, new_request: NewLinkRequest) -> Result<LinkRequest, AppError> {
        let mut requests = self.requests.lock().unwrap();
        let request = LinkRequest::new(
            requests.len() as i64 + 1,
            new_request.telegram_id,
            new_request.url,
            Utc::now(),
        );
        requests.push(request.clone());
        Ok(request)
    }

    async fn list_since(&self, since: DateTime<Utc>) -> Result<Vec<LinkRequest>, AppError> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.created_at > since)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.requests.lock().unwrap().len() as i64)
    }
}

/// Records every outgoing message; chats in `blocked` answer `Forbidden`.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<(i64, String, ReplyFormat)>>,
    blocked: Mutex<HashSet<i64>>,
}

impl RecordingTransport {
    pub fn block(&self, chat_id: i64) {
        self.blocked.lock().unwrap().insert(chat_id);
    }

    pub fn sent(&self) -> Vec<(i64, String, ReplyFormat)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, chat_id: i64) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|(id, _, _)| *id == chat_id)
            .map(|(_, text, _)| text)
            .collect()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        format: ReplyFormat,
    ) -> Result<(), TransportError> {
        if self.blocked.lock().unwrap().contains(&chat_id) {
            return Err(TransportError::Forbidden(
                "bot was blocked by the user".to_string(),
            ));
        }
        self.sent
            .lock()
            .unwrap()
            .push((chat_id, text.to_string(), format));
        Ok(())
    }

    async fn send_typing(&self, _chat_id: i64) -> Result<(), TransportError> {
        Ok(())
    }
}

/// Follows a fixed redirect table; unknown URLs resolve to themselves.
#[derive(Default)]
pub struct StaticResolver {
    redirects: HashMap<String, String>,
}

impl StaticResolver {
    pub fn redirect(mut self, from: &str, to: &str) -> Self {
        self.redirects.insert(from.to_string(), to.to_string());
        self
    }
}

#[async_trait]
impl RedirectResolver for StaticResolver {
    async fn resolve(&self, url: &Url) -> Result<Url, ResolveError> {
        if url.host_str() == Some("unreachable.example") {
            return Err(ResolveError::Network("connection refused".to_string()));
        }
        match self.redirects.get(url.as_str()) {
            Some(target) => {
                Url::parse(target).map_err(|e| ResolveError::Network(e.to_string()))
            }
            None => Ok(url.clone()),
        }
    }
}

/// Hands out `https://bit.ly/1`, `https://bit.ly/2`, ... and remembers the long URLs.
#[derive(Default)]
pub struct CountingShortener {
    counter: AtomicUsize,
    long_urls: Mutex<Vec<String>>,
}

impl CountingShortener {
    pub fn long_urls(&self) -> Vec<String> {
        self.long_urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LinkShortener for CountingShortener {
    async fn shorten(&self, long_url: &str) -> Result<String, ShortenError> {
        self.long_urls.lock().unwrap().push(long_url.to_string());
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("https://bit.ly/{n}"))
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

pub struct NoPacing;

#[async_trait]
impl Pacer for NoPacing {
    async fn ready(&self) {}
}

/// Everything a test may want to inspect after driving the app.
pub struct TestApp {
    pub state: AppState,
    pub users: Arc<InMemoryUsers>,
    pub requests: Arc<InMemoryRequests>,
    pub transport: Arc<RecordingTransport>,
    pub shortener: Arc<CountingShortener>,
}

pub fn referral_settings() -> ReferralSettings {
    ReferralSettings {
        referral_id: REFERRAL_ID.to_string(),
        domain_matcher: DomainMatcher::new("amazon.it", DomainMatch::LabelBoundary),
        product_markers: ProductMarkers::default(),
    }
}

pub fn default_resolver() -> StaticResolver {
    StaticResolver::default().redirect(
        "https://amzn.to/2lVEfGs",
        "https://www.amazon.it/gp/product/B078WST5RK/ref=as_li_tl?ie=UTF8&th=1#reviews",
    )
}

pub fn create_test_app(webhook_secret: Option<&str>) -> TestApp {
    create_test_app_with(default_resolver(), webhook_secret)
}

pub fn create_test_app_with(resolver: StaticResolver, webhook_secret: Option<&str>) -> TestApp {
    let users = Arc::new(InMemoryUsers::with_admin(ADMIN_ID));
    let requests = Arc::new(InMemoryRequests::default());
    let transport = Arc::new(RecordingTransport::default());
    let shortener = Arc::new(CountingShortener::default());

    let builder = Arc::new(ReferralUrlBuilder::new(
        Arc::new(resolver),
        referral_settings(),
    ));
    let pipeline = Arc::new(PipelineService::new(builder, shortener.clone()));

    let commands = Arc::new(CommandService::new(
        users.clone(),
        requests.clone(),
        transport.clone(),
        Arc::new(NoPacing),
    ));

    let update_service = Arc::new(UpdateService::new(
        pipeline,
        commands,
        users.clone(),
        requests.clone(),
        transport.clone(),
    ));

    let state = AppState::new(
        update_service,
        users.clone(),
        shortener.clone(),
        webhook_secret.map(str::to_string),
    );

    TestApp {
        state,
        users,
        requests,
        transport,
        shortener,
    }
}

/// A text message update with a single `url` entity covering `url`.
pub fn url_message(update_id: i64, user_id: i64, prefix: &str, url: &str) -> serde_json::Value {
    let offset = prefix.encode_utf16().count();
    let length = url.encode_utf16().count();

    serde_json::json!({
        "update_id": update_id,
        "message": {
            "message_id": update_id,
            "from": {"id": user_id, "is_bot": false},
            "chat": {"id": user_id},
            "text": format!("{prefix}{url}"),
            "entities": [{"type": "url", "offset": offset, "length": length}]
        }
    })
}

pub fn command_message(update_id: i64, user_id: i64, text: &str) -> serde_json::Value {
    let command_len = text
        .split_whitespace()
        .next()
        .map(|c| c.encode_utf16().count())
        .unwrap_or(0);

    serde_json::json!({
        "update_id": update_id,
        "message": {
            "message_id": update_id,
            "from": {"id": user_id, "is_bot": false},
            "chat": {"id": user_id},
            "text": text,
            "entities": [{"type": "bot_command", "offset": 0, "length": command_len}]
        }
    })
}
