//! Configuration for the linedesk backend.
//!
//! RAM-only design - nothing survives a restart.
//! All configuration is loaded from environment variables.

use linedesk_core::NOTIFICATION_DISPLAY_SECS;
use std::time::Duration;

/// Default overdue scan period in seconds
pub const DEFAULT_SCAN_INTERVAL_SECS: u64 = 10;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,

    /// Server port
    pub port: u16,

    /// How often the reminder worker scans for overdue bills (default: 10 seconds)
    pub reminder_scan_interval: Duration,

    /// How long a notification stays visible (default: 8 seconds)
    pub notification_display: Duration,

    /// Load the three demo connections at startup (default: true)
    pub seed_demo_data: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            reminder_scan_interval: Duration::from_secs(positive_secs(
                std::env::var("REMINDER_SCAN_INTERVAL_SECS").ok().as_deref(),
                DEFAULT_SCAN_INTERVAL_SECS,
            )),
            notification_display: Duration::from_secs(positive_secs(
                std::env::var("NOTIFICATION_DISPLAY_SECS").ok().as_deref(),
                NOTIFICATION_DISPLAY_SECS as u64,
            )),

            seed_demo_data: std::env::var("SEED_DEMO_DATA")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
        }
    }

    /// Notification display time as a chrono duration for the engine
    pub fn notification_display_chrono(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.notification_display.as_secs() as i64)
    }
}

/// Parse a whole number of seconds; zero and garbage fall back to `default`
fn positive_secs(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|s| s.trim().parse().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
