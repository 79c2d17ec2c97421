use std::net::IpAddr;

use crate::notify::target::{BotTarget, SecondaryTarget, Targets};

#[derive(Debug, Clone)]
pub struct Config {
    pub secret_key: String,
    pub host: IpAddr,
    pub port: u16,
    pub targets: Targets,
    pub allowed_origins: Vec<String>,
    pub notify_timeout_secs: u64,
    pub max_body_size: usize,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let secret_key = env_required("SECRET_KEY")?;

        let host: IpAddr = env_or("RELAY_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid RELAY_HOST: {e}"))?;

        let port: u16 = env_or("PORT", "3001")
            .parse()
            .map_err(|e| format!("Invalid PORT: {e}"))?;

        let api_base = env_or("RELAY_TELEGRAM_API", "https://api.telegram.org");

        let primary = BotTarget::telegram(
            &api_base,
            &env_required("NOTIFICATION_BOT_TOKEN")?,
            &env_required("NOTIFICATION_CHAT_ID")?,
        );

        let secondary = match (
            std::env::var("RELAY_SECONDARY_APP").ok(),
            std::env::var("SECONDARY_BOT_TOKEN").ok(),
            std::env::var("SECONDARY_CHAT_ID").ok(),
        ) {
            (Some(app_name), Some(token), Some(chat_id)) if !app_name.trim().is_empty() => {
                Some(SecondaryTarget {
                    app_name: app_name.trim().to_string(),
                    target: BotTarget::telegram(&api_base, &token, &chat_id),
                })
            }
            (None, None, None) => None,
            _ => {
                return Err(
                    "RELAY_SECONDARY_APP, SECONDARY_BOT_TOKEN and SECONDARY_CHAT_ID must be set together"
                        .to_string(),
                );
            }
        };

        let allowed_origins = parse_origins(&env_or("RELAY_ALLOWED_ORIGINS", ""));

        let notify_timeout_secs: u64 = env_or("RELAY_NOTIFY_TIMEOUT_SECS", "10")
            .parse()
            .map_err(|e| format!("Invalid RELAY_NOTIFY_TIMEOUT_SECS: {e}"))?;

        let max_body_size: usize = env_or("RELAY_MAX_BODY_SIZE", "102400")
            .parse()
            .map_err(|e| format!("Invalid RELAY_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("RELAY_LOG_LEVEL", "info");

        Ok(Config {
            secret_key,
            host,
            port,
            targets: Targets { primary, secondary },
            allowed_origins,
            notify_timeout_secs,
            max_body_size,
            log_level,
        })
    }
}

/// Split a comma-separated origin list. Browsers never send a trailing slash
/// in `Origin`, so one is stripped from each entry.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
