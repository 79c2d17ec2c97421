use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use super::user_agent::UserAgentInfo;
use super::Submission;

pub const CRAWLER_PLACEHOLDER: &str = "Not applicable (Google Bot crawling)";

/// Parse a caller-supplied event date. Accepts RFC 3339, `YYYY-MM-DD`,
/// `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` (local time), and epoch
/// milliseconds.
pub fn parse_date(raw: &Value) -> Option<DateTime<Local>> {
    match raw {
        Value::Number(n) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
            .map(|dt| dt.with_timezone(&Local)),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Local));
            }
            for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
                if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                    return Local.from_local_datetime(&naive).earliest();
                }
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| Utc.from_utc_datetime(&naive).with_timezone(&Local))
        }
        _ => None,
    }
}

/// en-US style, e.g. `1/15/2024, 3:04:05 PM`.
pub fn format_timestamp<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// The event time to print: the supplied date when it parses, else now.
pub fn event_time(date: Option<&Value>) -> String {
    let when = date.and_then(parse_date).unwrap_or_else(Local::now);
    format_timestamp(&when)
}

pub fn visitor_event(sub: &Submission, ua: &UserAgentInfo, when: &str, crawler: bool) -> String {
    let (status_emoji, status_text, info) = if crawler {
        ("🤖", "Google Bot Crawling Detected", "Google Bot")
    } else {
        ("🟢", "New Accepted Visitor", "Regular Visitor")
    };

    let (url, referer) = if crawler {
        (CRAWLER_PLACEHOLDER, CRAWLER_PLACEHOLDER)
    } else {
        (sub.url.as_str(), sub.referer.as_str())
    };

    let loc = &sub.location;
    let country = if loc.country_emoji.is_empty() {
        loc.country.clone()
    } else {
        format!("{} {}", loc.country_emoji, loc.country)
    };

    format!(
        "\n{status_emoji} {status_text}\n\
         \nℹ Info: {info}\
         \nℹ App Name: {app}\n\
         \n📅 {when}\n\
         \n🌐 Url: {url}\n\
         \n📤 Referer: {referer}\n\
         \n📍 Country: {country}\n\
         \n🏙 City: {city}\n\
         \n🖥 IP: {ip}\n\
         \n🌍 Browser: {browser}\n\
         \n💻 OS: {os}\n\
         \n📱 Device: {device}\n\
         \n🔎 User Agent: {agent}\n",
        app = sub.app_name,
        city = loc.city,
        ip = loc.ip_address,
        browser = ua.browser,
        os = ua.os,
        device = ua.device,
        agent = sub.agent,
    )
}

pub fn note(app_name: &str, country: &str, browser: &str, note: &str) -> String {
    format!("{app_name}: {country} | Browser: {browser}\n\n{note}")
}

pub fn alert(app_name: &str, country: &str, browser: &str) -> String {
    format!("{app_name}: {country} | Browser: {browser}")
}

pub fn admin_notification(app_name: &str, note: &str) -> String {
    format!("{app_name}: {note}")
}
