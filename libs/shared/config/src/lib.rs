use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Offsets, relative to the send instant, at which a sent message is
/// delivered, answered and read. Sessions untouched for `session_idle_ms`
/// are closed the next time a conversation is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagingTimings {
    pub delivered_after_ms: u64,
    pub reply_after_ms: u64,
    pub read_after_ms: u64,
    pub session_idle_ms: u64,
}

impl Default for MessagingTimings {
    fn default() -> Self {
        Self {
            delivered_after_ms: 1000,
            reply_after_ms: 1500,
            read_after_ms: 2000,
            session_idle_ms: 30 * 60 * 1000,
        }
    }
}

impl MessagingTimings {
    pub fn delivered_after(&self) -> Duration {
        Duration::from_millis(self.delivered_after_ms)
    }

    pub fn reply_after(&self) -> Duration {
        Duration::from_millis(self.reply_after_ms)
    }

    pub fn read_after(&self) -> Duration {
        Duration::from_millis(self.read_after_ms)
    }

    pub fn session_idle(&self) -> Duration {
        Duration::from_millis(self.session_idle_ms)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub favorites_path: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub messaging: MessagingTimings,
    pub booking_latency_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            favorites_path: PathBuf::from("favorites.json"),
            catalog_path: None,
            messaging: MessagingTimings::default(),
            booking_latency_ms: 2000,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let timings = defaults.messaging;

        Self {
            bind_address: env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| {
                    warn!("BIND_ADDRESS not set, using {}", defaults.bind_address);
                    defaults.bind_address.clone()
                }),
            favorites_path: env::var("FAVORITES_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    warn!("FAVORITES_PATH not set, using {}", defaults.favorites_path.display());
                    defaults.favorites_path.clone()
                }),
            catalog_path: env::var("CATALOG_PATH").ok().map(PathBuf::from),
            messaging: MessagingTimings {
                delivered_after_ms: env_number("MESSAGE_DELIVERED_AFTER_MS", timings.delivered_after_ms),
                reply_after_ms: env_number("MESSAGE_REPLY_AFTER_MS", timings.reply_after_ms),
                read_after_ms: env_number("MESSAGE_READ_AFTER_MS", timings.read_after_ms),
                session_idle_ms: env_number("MESSAGE_SESSION_IDLE_MS", timings.session_idle_ms),
            },
            booking_latency_ms: env_number("BOOKING_LATENCY_MS", defaults.booking_latency_ms),
        }
    }

    pub fn booking_latency(&self) -> Duration {
        Duration::from_millis(self.booking_latency_ms)
    }

    pub fn uses_builtin_catalog(&self) -> bool {
        self.catalog_path.is_none()
    }
}

fn env_number<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => parse_or(key, &raw, default),
        Err(_) => default,
    }
}

fn parse_or<T>(key: &str, raw: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    raw.trim().parse().unwrap_or_else(|_| {
        warn!("{} has invalid value {:?}, using {}", key, raw, default);
        default
    })
}
