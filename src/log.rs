//! One-line JSON events, written to stdout natively and to the console in the browser.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicU8, Ordering as AtomicOrdering};

pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

static MIN_LEVEL: AtomicU8 = AtomicU8::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl LogLevel {
    fn rank(self) -> u8 {
        match self {
            Self::Debug => 0,
            Self::Info => 1,
        }
    }

    fn from_rank(rank: u8) -> Self {
        if rank == 0 {
            Self::Debug
        } else {
            Self::Info
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
        }
    }

    /// Case-insensitive; anything unrecognised falls back to `default`.
    pub fn parse_or(value: Option<&str>, default: LogLevel) -> LogLevel {
        match value
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("debug") => Self::Debug,
            Some("info") => Self::Info,
            _ => default,
        }
    }
}

pub fn set_min_level(level: LogLevel) {
    MIN_LEVEL.store(level.rank(), AtomicOrdering::Relaxed);
}

pub fn min_level() -> LogLevel {
    LogLevel::from_rank(MIN_LEVEL.load(AtomicOrdering::Relaxed))
}

pub fn enabled(level: LogLevel) -> bool {
    level >= min_level()
}

/// `ts`, `level` and `event` first; object `fields` are merged in after them.
pub fn event_payload(
    ts_ms: u64,
    level: LogLevel,
    event: &str,
    fields: serde_json::Value,
) -> serde_json::Value {
    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(ts_ms)),
    );
    payload.insert(
        "level".to_string(),
        serde_json::Value::String(level.as_str().to_string()),
    );
    payload.insert(
        "event".to_string(),
        serde_json::Value::String(event.to_string()),
    );

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            if matches!(key.as_str(), "ts" | "level" | "event") {
                continue;
            }
            payload.insert(key, value);
        }
    }

    serde_json::Value::Object(payload)
}

pub fn log_event(level: LogLevel, event: &str, fields: serde_json::Value) {
    if !enabled(level) {
        return;
    }
    emit(&event_payload(now_unix_millis(), level, event, fields).to_string());
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(line: &str) {
    println!("{line}");
}

#[cfg(target_arch = "wasm32")]
fn emit(line: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(line));
}
