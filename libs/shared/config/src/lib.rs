use std::env;

use chrono::FixedOffset;
use tracing::warn;

/// Business-wide reference offset used when schedules never carry a zone of
/// their own: civil schedule times are compared against appointment instants
/// normalized into this offset.
pub const DEFAULT_SCHEDULE_UTC_OFFSET: &str = "-08:00";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub postgrest_url: String,
    pub postgrest_api_key: String,
    pub schedule_utc_offset: FixedOffset,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            postgrest_url: env::var("POSTGREST_URL").unwrap_or_else(|_| {
                warn!("POSTGREST_URL not set, using empty value");
                String::new()
            }),
            postgrest_api_key: env::var("POSTGREST_API_KEY").unwrap_or_else(|_| {
                warn!("POSTGREST_API_KEY not set, using empty value");
                String::new()
            }),
            schedule_utc_offset: env::var("SCHEDULE_UTC_OFFSET")
                .ok()
                .and_then(|raw| {
                    let parsed = parse_utc_offset(&raw);
                    if parsed.is_none() {
                        warn!("SCHEDULE_UTC_OFFSET {:?} is not a valid +HH:MM offset, using default", raw);
                    }
                    parsed
                })
                .unwrap_or_else(default_schedule_offset),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.postgrest_url.is_empty() && !self.postgrest_api_key.is_empty()
    }
}

pub fn default_schedule_offset() -> FixedOffset {
    parse_utc_offset(DEFAULT_SCHEDULE_UTC_OFFSET).expect("default offset is valid")
}

/// Parse a `+HH:MM` / `-HH:MM` UTC offset string.
pub fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.len() != 6 {
        return None;
    }
    let sign = match raw.as_bytes()[0] {
        b'+' => 1i32,
        b'-' => -1i32,
        _ => return None,
    };
    if raw.as_bytes()[3] != b':' {
        return None;
    }
    let hours: i32 = raw[1..3].parse().ok()?;
    let minutes: i32 = raw[4..6].parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
