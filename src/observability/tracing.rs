//! Request tracing helpers
//!
//! Structured `tracing` events for each `generateContent` call, with
//! credentials masked in headers and in the `key` query parameter.

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, info, warn};

static PRETTY_JSON: AtomicBool = AtomicBool::new(false);
static MASK_SENSITIVE_VALUES: AtomicBool = AtomicBool::new(true);

static KEY_QUERY_PARAM: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"([?&]key=)([^&#]*)").ok());

pub fn set_pretty_json(pretty: bool) {
    PRETTY_JSON.store(pretty, Ordering::Relaxed);
}

pub fn get_pretty_json() -> bool {
    PRETTY_JSON.load(Ordering::Relaxed)
}

pub fn set_mask_sensitive_values(mask: bool) {
    MASK_SENSITIVE_VALUES.store(mask, Ordering::Relaxed);
}

pub fn get_mask_sensitive_values() -> bool {
    MASK_SENSITIVE_VALUES.load(Ordering::Relaxed)
}

pub fn format_json_for_logging(value: &serde_json::Value) -> String {
    if get_pretty_json() {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    } else {
        value.to_string()
    }
}

/// Keep a short prefix and suffix of long secrets.
pub fn mask_sensitive_value(value: &str) -> String {
    if !get_mask_sensitive_values() {
        return value.to_string();
    }
    if let Some(token) = value.strip_prefix("Bearer ") {
        return format!("Bearer {}", mask_token(token));
    }
    mask_token(value)
}

fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "***".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Mask the value of a `key` query parameter.
pub fn mask_url(url: &str) -> String {
    if !get_mask_sensitive_values() {
        return url.to_string();
    }
    match KEY_QUERY_PARAM.as_ref() {
        Some(re) => re
            .replace_all(url, |caps: &regex::Captures<'_>| {
                format!("{}{}", &caps[1], mask_token(&caps[2]))
            })
            .into_owned(),
        None => url.to_string(),
    }
}

fn is_sensitive_header(name: &str) -> bool {
    let name = name.to_lowercase();
    name.contains("authorization") || name.contains("key") || name.contains("token")
}

pub fn format_headers_for_logging(headers: &reqwest::header::HeaderMap) -> String {
    let map: std::collections::BTreeMap<&str, String> = headers
        .iter()
        .map(|(k, v)| {
            let value = v.to_str().unwrap_or("<invalid>");
            let masked = if is_sensitive_header(k.as_str()) || v.is_sensitive() {
                mask_sensitive_value(value)
            } else {
                value.to_string()
            };
            (k.as_str(), masked)
        })
        .collect();
    if get_pretty_json() {
        serde_json::to_string_pretty(&map).unwrap_or_else(|_| format!("{map:?}"))
    } else {
        serde_json::to_string(&map).unwrap_or_else(|_| format!("{map:?}"))
    }
}

/// Per-call tracer for one model.
#[derive(Debug, Clone)]
pub struct ProviderTracer {
    provider: String,
    model: Option<String>,
}

impl ProviderTracer {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn trace_request_start(&self, method: &str, url: &str) {
        info!(provider = %self.provider, model = ?self.model, method = %method, url = %mask_url(url), "Request started");
    }

    pub fn trace_request_details(
        &self,
        headers: &reqwest::header::HeaderMap,
        body: &serde_json::Value,
    ) {
        debug!(
            provider = %self.provider,
            model = ?self.model,
            request_headers = %format_headers_for_logging(headers),
            request_body = %format_json_for_logging(body),
            "Request details"
        );
    }

    pub fn trace_response_body(&self, status_code: u16, body: &str) {
        debug!(provider = %self.provider, model = ?self.model, status_code = status_code, response_body = %body, "Response body");
    }

    pub fn trace_request_complete(&self, start: Instant, response_length: usize) {
        let duration_ms = start.elapsed().as_millis();
        info!(provider = %self.provider, model = ?self.model, duration_ms = duration_ms, response_length = response_length, "Request completed");
    }

    pub fn trace_request_error(&self, status_code: Option<u16>, error_text: &str, start: Instant) {
        let duration_ms = start.elapsed().as_millis();
        warn!(provider = %self.provider, model = ?self.model, status_code = ?status_code, error_text = %error_text, duration_ms = duration_ms, "Request failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue};

    #[test]
    fn masks_bearer_and_plain_tokens() {
        assert_eq!(mask_sensitive_value("Bearer abcdefghijkl"), "Bearer abcd...ijkl");
        assert_eq!(mask_sensitive_value("short"), "***");
    }

    #[test]
    fn masks_key_query_param() {
        let key = format!("AIza{}", "z".repeat(35));
        let url = format!("https://host/models/gemini-2.0-flash:generateContent?key={key}");
        let masked = mask_url(&url);
        assert!(!masked.contains(&key));
        assert!(masked.ends_with("?key=AIza...zzzz"));
        assert_eq!(mask_url("https://host/no-query"), "https://host/no-query");
    }

    #[test]
    fn headers_are_masked_for_logging() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer supersecrettoken"));
        headers.insert("accept", HeaderValue::from_static("application/json"));
        let out = format_headers_for_logging(&headers);
        assert!(!out.contains("supersecrettoken"));
        assert!(out.contains("application/json"));
    }

    #[tracing_test::traced_test]
    #[test]
    fn tracer_logs_masked_url() {
        let tracer = ProviderTracer::new("gemini").with_model("gemini-2.0-flash");
        tracer.trace_request_start("POST", "https://host/m:generateContent?key=AIzaSECRETSECRETxyz1");
        assert!(logs_contain("Request started"));
        assert!(!logs_contain("SECRETSECRET"));
    }
}
