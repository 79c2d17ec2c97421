//! Best-effort user-agent parsing.
//!
//! Covers the mainstream browsers and operating systems well enough for a
//! human-readable notification. Anything unrecognised falls back to
//! `Unknown` (browser, OS) or `Desktop` (device).

use regex::Regex;
use std::sync::LazyLock;

#[derive(Debug, Clone, PartialEq)]
pub struct UserAgentInfo {
    pub browser: String,
    pub os: String,
    pub device: String,
}

struct Pattern {
    re: Regex,
    name: &'static str,
}

fn pattern(re: &str, name: &'static str) -> Pattern {
    Pattern {
        re: Regex::new(re).unwrap(),
        name,
    }
}

// Order matters: Edge and Opera also claim Chrome, Chrome also claims Safari.
static BROWSERS: LazyLock<Vec<Pattern>> = LazyLock::new(|| {
    vec![
        pattern(r"Edg(?:e|A|iOS)?/([\d.]+)", "Edge"),
        pattern(r"(?:OPR|Opera)/([\d.]+)", "Opera"),
        pattern(r"SamsungBrowser/([\d.]+)", "Samsung Internet"),
        pattern(r"(?:Firefox|FxiOS)/([\d.]+)", "Firefox"),
        pattern(r"CriOS/([\d.]+)", "Chrome"),
        pattern(r"Chrome/([\d.]+)", "Chrome"),
        pattern(r"Version/([\d.]+).*Mobile.*Safari/", "Mobile Safari"),
        pattern(r"Version/([\d.]+).*Safari/", "Safari"),
        pattern(r"MSIE ([\d.]+)", "IE"),
        pattern(r"Trident/.*rv:([\d.]+)", "IE"),
    ]
});

// iOS before macOS (iPads say "like Mac OS X"), Android before Linux.
static SYSTEMS: LazyLock<Vec<Pattern>> = LazyLock::new(|| {
    vec![
        pattern(r"Windows NT ([\d.]+)", "Windows"),
        pattern(r"(?:iPhone|iPad|iPod).*? OS ([\d_]+)", "iOS"),
        pattern(r"Mac OS X ([\d_.]+)", "Mac OS"),
        pattern(r"Android ([\d.]+)", "Android"),
        pattern(r"CrOS \S+ ([\d.]+)", "Chrome OS"),
        pattern(r"Linux()", "Linux"),
    ]
});

static CONSOLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"PlayStation|Xbox|Nintendo").unwrap());
static SMART_TV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)smart-?tv|tizen.+tv|web0s|netcast").unwrap());
static MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"iPhone|iPod|Mobile|Windows Phone").unwrap());

pub fn parse(agent: &str) -> UserAgentInfo {
    UserAgentInfo {
        browser: match_first(&BROWSERS, agent, |_, v| v.to_string()),
        os: match_first(&SYSTEMS, agent, os_version),
        device: device_class(agent).to_string(),
    }
}

fn match_first(
    patterns: &[Pattern],
    agent: &str,
    version: impl Fn(&str, &str) -> String,
) -> String {
    patterns
        .iter()
        .find_map(|p| {
            p.re.captures(agent).map(|caps| {
                let v = caps.get(1).map(|m| version(p.name, m.as_str())).unwrap_or_default();
                format!("{} {v}", p.name).trim().to_string()
            })
        })
        .unwrap_or_else(|| "Unknown".to_string())
}

fn os_version(name: &str, raw: &str) -> String {
    match (name, raw) {
        ("Windows", "10.0") => "10".to_string(),
        ("Windows", "6.3") => "8.1".to_string(),
        ("Windows", "6.2") => "8".to_string(),
        ("Windows", "6.1") => "7".to_string(),
        ("Windows", "6.0") => "Vista".to_string(),
        ("Windows", "5.1" | "5.2") => "XP".to_string(),
        (_, other) => other.replace('_', "."),
    }
}

fn device_class(agent: &str) -> &'static str {
    if CONSOLE_RE.is_match(agent) {
        "console"
    } else if SMART_TV_RE.is_match(agent) {
        "smarttv"
    } else if agent.contains("iPad") || agent.contains("Tablet") {
        "tablet"
    } else if MOBILE_RE.is_match(agent) {
        "mobile"
    } else if agent.contains("Android") {
        // Android without the "Mobile" token
        "tablet"
    } else {
        "Desktop"
    }
}
