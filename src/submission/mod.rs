pub mod crawler;
pub mod message;
pub mod schema;
pub mod user_agent;

use serde_json::Value;

use self::schema::lookup;

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub country: String,
    pub country_emoji: String,
    pub city: String,
    pub ip_address: String,
}

/// A visitor event, read from a body that already passed
/// [`schema::VISITOR_EVENT`].
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub info: String,
    pub app_name: String,
    pub url: String,
    pub referer: String,
    pub location: Location,
    pub agent: String,
    pub vpn_detected: Option<Value>,
    pub date: Option<Value>,
}

impl Submission {
    pub fn from_body(body: &Value) -> Self {
        let text = |path: &str| text_of(lookup(body, path));
        Self {
            info: text("info"),
            app_name: text("appName"),
            url: text("url"),
            referer: text("referer"),
            location: Location {
                country: text("location.country"),
                country_emoji: text("location.countryEmoji"),
                city: text("location.city"),
                ip_address: text("location.ipAddress"),
            },
            agent: text("agent"),
            vpn_detected: present(lookup(body, "vpnDetected")),
            date: present(lookup(body, "date")),
        }
    }
}

/// Render a body field for a message: strings as-is, missing or null as
/// empty, other values in their JSON form.
pub fn text_of(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// The `appName` of a body, if it is a string.
pub fn app_name(body: &Value) -> Option<&str> {
    body.get("appName").and_then(Value::as_str)
}

fn present(value: Option<&Value>) -> Option<Value> {
    value.filter(|v| !v.is_null()).cloned()
}
