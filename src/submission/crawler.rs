use regex::Regex;
use std::sync::LazyLock;

// Narrow signature, used to waive the url/referer/vpnDetected rules.
static CRAWLER_SIGNATURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)googlebot|google.*bot").unwrap());

// Broad signature, used to label the visit in the forwarded message.
static GOOGLE_AGENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)google").unwrap());

/// True when the agent carries a Google crawler signature.
pub fn is_crawler_signature(agent: &str) -> bool {
    CRAWLER_SIGNATURE_RE.is_match(agent)
}

/// True when the agent mentions Google at all.
pub fn is_google_agent(agent: &str) -> bool {
    GOOGLE_AGENT_RE.is_match(agent)
}
