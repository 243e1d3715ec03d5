//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use crate::application::services::UpdateService;
use crate::domain::repositories::UserRepository;
use crate::infrastructure::shortener::LinkShortener;

#[derive(Clone)]
pub struct AppState {
    pub update_service: Arc<UpdateService>,
    /// Used by the health check to check the database.
    pub user_repository: Arc<dyn UserRepository>,
    pub shortener: Arc<dyn LinkShortener>,
    /// Expected `X-Telegram-Bot-Api-Secret-Token`; `None` accepts every request.
    pub webhook_secret: Option<Arc<str>>,
}

impl AppState {
    pub fn new(
        update_service: Arc<UpdateService>,
        user_repository: Arc<dyn UserRepository>,
        shortener: Arc<dyn LinkShortener>,
        webhook_secret: Option<String>,
    ) -> Self {
        Self {
            update_service,
            user_repository,
            shortener,
            webhook_secret: webhook_secret.map(Arc::from),
        }
    }
}
