//! Rephrase exchange log
//!
//! Appends every rephrase request and its outcome to
//! `.prompt-perfect/http_requests.log` when `PROMPT_PERFECT_HTTP_LOG` is
//! `1`, `true`, `yes` or `on`. The flag is read once per process.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use chrono::Local;
use serde::Serialize;
use tracing::warn;

use crate::storage::get_data_dir;

/// Environment variable to control HTTP logging
pub const ENV_HTTP_LOG: &str = "PROMPT_PERFECT_HTTP_LOG";

/// Log file name inside the data directory
pub const LOG_FILE_NAME: &str = "http_requests.log";

/// Bodies longer than this are cut in the log
const MAX_BODY_SIZE: usize = 10000;

/// Response headers whose values are masked
const SENSITIVE_HEADERS: &[&str] = &["set-cookie", "cookie", "authorization", "x-api-key"];

static LOG_MUTEX: Mutex<()> = Mutex::new(());

pub fn is_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| {
        std::env::var(ENV_HTTP_LOG)
            .map(|v| parse_flag(&v))
            .unwrap_or(false)
    })
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// How a logged exchange ended
pub enum ExchangeOutcome<'a> {
    Response {
        status: u16,
        headers: Vec<(String, String)>,
        body: &'a str,
    },
    Error(&'a str),
}

/// One rephrase request awaiting its outcome
pub struct ExchangeLog {
    url: String,
    request_body: String,
    started: Instant,
}

impl ExchangeLog {
    /// Start logging a POST of `payload` to `url`.
    /// Returns None without serializing anything when logging is off.
    pub fn start<T: Serialize>(url: &str, payload: &T) -> Option<Self> {
        if !is_enabled() {
            return None;
        }
        Some(Self::new(url, payload))
    }

    fn new<T: Serialize>(url: &str, payload: &T) -> Self {
        let request_body = serde_json::to_string(payload)
            .unwrap_or_else(|e| format!("<unserializable body: {}>", e));
        Self {
            url: url.to_string(),
            request_body,
            started: Instant::now(),
        }
    }

    /// Append the finished exchange to the log under `store_dir`
    pub fn finish(self, store_dir: &Path, outcome: ExchangeOutcome<'_>) {
        let entry = self.render(&outcome);
        let log_path = get_data_dir(store_dir).join(LOG_FILE_NAME);

        let _guard = LOG_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .and_then(|mut file| file.write_all(entry.as_bytes()));

        if let Err(e) = written {
            warn!("Failed to write HTTP log {:?}: {}", log_path, e);
        }
    }

    fn render(&self, outcome: &ExchangeOutcome<'_>) -> String {
        let elapsed_ms = self.started.elapsed().as_millis();
        let rule = "=".repeat(80);
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");

        let mut out = format!("\n{rule}\n[{timestamp}] POST {}\n{rule}\n", self.url);
        out.push_str("\n--- Request Body ---\n");
        out.push_str(&format_body(&self.request_body));
        out.push('\n');

        match outcome {
            ExchangeOutcome::Response {
                status,
                headers,
                body,
            } => {
                out.push_str(&format!("\n--- Response ({elapsed_ms}ms) ---\n"));
                out.push_str(&format!("Status: {status}\n"));
                for (name, value) in headers {
                    out.push_str(&format!("{}: {}\n", name, header_value(name, value)));
                }
                out.push('\n');
                out.push_str(&format_body(body));
                out.push('\n');
            }
            ExchangeOutcome::Error(err) => {
                out.push_str(&format!("\n--- Error ({elapsed_ms}ms) ---\n{err}\n"));
            }
        }

        out.push_str(&format!("{rule}\n"));
        out
    }
}

fn header_value(name: &str, value: &str) -> String {
    let sensitive = SENSITIVE_HEADERS
        .iter()
        .any(|h| h.eq_ignore_ascii_case(name));
    if sensitive {
        mask_secret(value)
    } else {
        value.to_string()
    }
}

/// Keep four characters at each end of a secret
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Pretty-print JSON bodies, then cap the size
fn format_body(body: &str) -> String {
    let pretty = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| serde_json::to_string_pretty(&v).ok());
    truncate_at_char_boundary(pretty.as_deref().unwrap_or(body), MAX_BODY_SIZE)
}

/// Cut `s` to at most `max_len` bytes without splitting a character
pub fn truncate_at_char_boundary(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let end = (0..=max_len)
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0);
    format!("{}...\n[truncated, total {} bytes]", &s[..end], s.len())
}

/// Collect response headers for the log
pub fn response_headers(response: &reqwest::Response) -> Vec<(String, String)> {
    response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                value.to_str().unwrap_or("<binary>").to_string(),
            )
        })
        .collect()
}
