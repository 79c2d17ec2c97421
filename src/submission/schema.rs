use std::net::IpAddr;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static HTTP_URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://.+").unwrap());

/// Predicate applied to a single field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Check {
    /// Not missing, null, or the empty string.
    Present,
    /// Not missing, null, false, zero, or the empty string.
    Truthy,
    /// Present, and not only whitespace when it is a string.
    NonBlank,
    /// A string starting with `http://` or `https://`.
    HttpUrl,
    /// A string holding an IPv4 or IPv6 literal.
    IpAddr,
    /// Documented but never rejected.
    Any,
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Dotted path into the JSON body, e.g. `location.city`.
    pub path: &'static str,
    pub check: Check,
    pub message: &'static str,
    /// Skipped when the visitor carries a crawler signature.
    pub waived_for_crawlers: bool,
}

impl Rule {
    const fn new(path: &'static str, check: Check, message: &'static str) -> Self {
        Self {
            path,
            check,
            message,
            waived_for_crawlers: false,
        }
    }

    const fn crawler_waivable(mut self) -> Self {
        self.waived_for_crawlers = true;
        self
    }
}

#[derive(Debug)]
pub struct Schema {
    pub rules: &'static [Rule],
}

pub static VISITOR_EVENT: Schema = Schema {
    rules: &[
        Rule::new("info", Check::Present, "Info is required"),
        Rule::new("appName", Check::Present, "App Name is required"),
        Rule::new("url", Check::HttpUrl, "Valid URL is required").crawler_waivable(),
        Rule::new("referer", Check::NonBlank, "Referer is required").crawler_waivable(),
        Rule::new("location.country", Check::Present, "Country is required"),
        Rule::new("location.countryEmoji", Check::Present, "Country emoji is required"),
        Rule::new("location.city", Check::Present, "City is required"),
        Rule::new("location.ipAddress", Check::IpAddr, "Valid IP address is required"),
        Rule::new("agent", Check::Present, "User agent is required"),
        Rule::new("vpnDetected", Check::Any, "").crawler_waivable(),
        Rule::new("date", Check::Any, ""),
    ],
};

pub static ADMIN_NOTIFICATION: Schema = Schema {
    rules: &[
        Rule::new("country", Check::Truthy, "country"),
        Rule::new("ipAddress", Check::Truthy, "ipAddress"),
        Rule::new("browser", Check::Truthy, "browser"),
        Rule::new("appName", Check::Truthy, "appName"),
    ],
};

impl Schema {
    /// Evaluate every rule and collect the messages of those that fail.
    pub fn violations(&self, body: &Value, crawler: bool) -> Vec<String> {
        self.rules
            .iter()
            .filter(|rule| !(crawler && rule.waived_for_crawlers))
            .filter(|rule| !passes(rule.check, lookup(body, rule.path)))
            .map(|rule| rule.message.to_string())
            .collect()
    }
}

/// Resolve a dotted path. Missing intermediate objects yield `None`.
pub fn lookup<'a>(body: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(body, |value, key| value.get(key))
}

fn passes(check: Check, value: Option<&Value>) -> bool {
    match check {
        Check::Any => true,
        Check::Present => match value {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        },
        Check::Truthy => match value {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(_) => true,
        },
        Check::NonBlank => match value {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
        },
        Check::HttpUrl => value
            .and_then(Value::as_str)
            .is_some_and(|s| HTTP_URL_RE.is_match(s)),
        Check::IpAddr => value
            .and_then(Value::as_str)
            .is_some_and(|s| s.parse::<IpAddr>().is_ok()),
    }
}
