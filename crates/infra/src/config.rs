use reminder_scheduler_domain::ReminderTiming;
use reminder_scheduler_utils::create_random_secret;
use std::{fmt::Display, path::PathBuf, str::FromStr};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Minutes before an appointment at which its reminder is shown
    pub reminder_window_minutes: i64,
    /// Cadence of the reminder worker poll loop. Should stay below the
    /// idle threshold of the host so that polling keeps the worker alive.
    pub poll_interval_millis: i64,
    /// Cadence of the foreground monitor evaluation
    pub monitor_interval_millis: i64,
    /// Cadence of the liveness message from the monitor to the worker
    pub heartbeat_interval_millis: i64,
    /// Number of days, starting at the beginning of today, to fetch
    /// appointments for
    pub lookahead_days: i64,
    /// Directory of the file backed state store
    pub state_dir: PathBuf,
    /// Notifications are posted to this url when set, otherwise they are
    /// only logged
    pub notification_webhook_url: Option<String>,
    /// Sent with every webhook request so that the receiver can verify
    /// the sender
    pub notification_webhook_key: String,
    /// Where the "open" action of a notification navigates to
    pub app_url: String,
}

fn env_or_default<T>(name: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match std::env::var(name) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default value: {}.",
                    name, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

fn positive_env_or_default(name: &str, default: i64) -> i64 {
    let value = env_or_default(name, default);
    if value <= 0 {
        warn!(
            "The given {}: {} must be positive, falling back to the default value: {}.",
            name, value, default
        );
        return default;
    }
    value
}

impl Config {
    pub fn new() -> Self {
        let notification_webhook_key = match std::env::var("NOTIFICATION_WEBHOOK_KEY") {
            Ok(key) => key,
            Err(_) => {
                info!("Did not find NOTIFICATION_WEBHOOK_KEY environment variable. Going to create one.");
                let key = create_random_secret(16);
                info!("Notification webhook key was generated and set to: {}", key);
                key
            }
        };
        let notification_webhook_url = std::env::var("NOTIFICATION_WEBHOOK_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        Self {
            port: env_or_default("PORT", 5000),
            reminder_window_minutes: positive_env_or_default("REMINDER_WINDOW_MINUTES", 15),
            poll_interval_millis: positive_env_or_default("POLL_INTERVAL_SECS", 55) * 1000,
            monitor_interval_millis: positive_env_or_default("MONITOR_INTERVAL_SECS", 30) * 1000,
            heartbeat_interval_millis: positive_env_or_default("HEARTBEAT_INTERVAL_SECS", 50)
                * 1000,
            lookahead_days: positive_env_or_default("LOOKAHEAD_DAYS", 2),
            state_dir: std::env::var("STATE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".reminder-state")),
            notification_webhook_url,
            notification_webhook_key,
            app_url: env_or_default("APP_URL", String::from("/")),
        }
    }

    pub fn reminder_timing(&self) -> ReminderTiming {
        ReminderTiming {
            window_minutes: self.reminder_window_minutes,
            poll_interval_millis: self.poll_interval_millis,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
