/// A chat endpoint plus the chat that receives the messages.
#[derive(Debug, Clone, PartialEq)]
pub struct BotTarget {
    pub url: String,
    pub chat_id: String,
}

impl BotTarget {
    /// Build a Telegram Bot API `sendMessage` target.
    pub fn telegram(api_base: &str, token: &str, chat_id: &str) -> Self {
        Self {
            url: format!("{}/bot{token}/sendMessage", api_base.trim_end_matches('/')),
            chat_id: chat_id.to_string(),
        }
    }

    /// The target URL with the bot token masked, safe to log or echo back.
    pub fn redacted_url(&self) -> String {
        redact_token(&self.url)
    }
}

#[derive(Debug, Clone)]
pub struct SecondaryTarget {
    pub app_name: String,
    pub target: BotTarget,
}

#[derive(Debug, Clone)]
pub struct Targets {
    pub primary: BotTarget,
    pub secondary: Option<SecondaryTarget>,
}

/// Pick the target for an application name. Only a case-insensitive exact
/// match on the secondary app name leaves the primary target.
pub fn resolve<'a>(targets: &'a Targets, app_name: Option<&str>) -> &'a BotTarget {
    match (&targets.secondary, app_name) {
        (Some(secondary), Some(name))
            if !name.is_empty() && name.to_lowercase() == secondary.app_name.to_lowercase() =>
        {
            &secondary.target
        }
        _ => &targets.primary,
    }
}

fn redact_token(url: &str) -> String {
    let Some(start) = url.find("/bot") else {
        return url.to_string();
    };
    let token_start = start + "/bot".len();
    match url[token_start..].find('/') {
        Some(len) => format!("{}***{}", &url[..token_start], &url[token_start + len..]),
        None => format!("{}***", &url[..token_start]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets() -> Targets {
        Targets {
            primary: BotTarget::telegram("https://api.telegram.org", "111:aaa", "-100"),
            secondary: Some(SecondaryTarget {
                app_name: "Orbit".to_string(),
                target: BotTarget::telegram("https://api.telegram.org/", "222:bbb", "-200"),
            }),
        }
    }

    #[test]
    fn secondary_matches_any_case() {
        let t = targets();
        for name in ["Orbit", "ORBIT", "orbit"] {
            assert_eq!(resolve(&t, Some(name)).chat_id, "-200", "{name}");
        }
    }

    #[test]
    fn everything_else_goes_to_primary() {
        let t = targets();
        for name in [Some("Other"), Some("Orbit2"), Some(" orbit"), Some(""), None] {
            assert_eq!(resolve(&t, name).chat_id, "-100", "{name:?}");
        }
    }

    #[test]
    fn no_secondary_configured() {
        let mut t = targets();
        t.secondary = None;
        assert_eq!(resolve(&t, Some("orbit")), &t.primary);
    }

    #[test]
    fn telegram_url_and_redaction() {
        let t = BotTarget::telegram("https://api.telegram.org/", "123:secret", "42");
        assert_eq!(t.url, "https://api.telegram.org/bot123:secret/sendMessage");
        assert_eq!(t.redacted_url(), "https://api.telegram.org/bot***/sendMessage");
    }

    #[test]
    fn redaction_leaves_plain_urls_alone() {
        assert_eq!(redact_token("http://127.0.0.1:9000/hook"), "http://127.0.0.1:9000/hook");
    }
}
