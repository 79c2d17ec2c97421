use std::sync::Arc;

use crate::config::Config;
use crate::notify::TelegramNotifier;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub notifier: TelegramNotifier,
}
