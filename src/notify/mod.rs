pub mod target;
pub mod telegram;

pub use target::{BotTarget, resolve};
pub use telegram::TelegramNotifier;

#[derive(Debug)]
pub enum NotifyError {
    /// The request never produced a response (connect, DNS, timeout).
    Transport(reqwest::Error),
    /// The endpoint answered with a non-2xx status.
    DeliveryFailed { url: String, status: u16 },
}

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifyError::Transport(err) => write!(f, "{err}"),
            NotifyError::DeliveryFailed { url, status } => {
                write!(f, "Failed to send message to {url} (status {status})")
            }
        }
    }
}

impl std::error::Error for NotifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NotifyError::Transport(err) => Some(err),
            NotifyError::DeliveryFailed { .. } => None,
        }
    }
}

impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        NotifyError::Transport(err)
    }
}
