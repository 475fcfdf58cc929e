use regsuite_core::hospital::appointment::FOLLOW_UP_AFTER_DAYS;
use regsuite_core::operator::EXPIRY_REMINDER_WINDOW_DAYS;

/// Worker configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Seconds between scheduler ticks (default: `300`).
    pub tick_secs: u64,
    /// Licenses expiring within this many days get a reminder (default: `90`).
    pub license_reminder_days: i64,
    /// Completed appointments this many days old get a follow-up (default: `7`).
    pub follow_up_days: i64,
}

/// Default scheduler tick.
const DEFAULT_TICK_SECS: u64 = 300;

impl WorkerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default |
    /// |-------------------------|---------|
    /// | `JOB_TICK_SECS`         | `300`   |
    /// | `LICENSE_REMINDER_DAYS` | `90`    |
    /// | `FOLLOW_UP_DAYS`        | `7`     |
    ///
    /// Unparseable values fall back to the default with a warning.
    pub fn from_env() -> Self {
        Self {
            tick_secs: env_or("JOB_TICK_SECS", DEFAULT_TICK_SECS),
            license_reminder_days: env_or("LICENSE_REMINDER_DAYS", EXPIRY_REMINDER_WINDOW_DAYS),
            follow_up_days: env_or("FOLLOW_UP_DAYS", FOLLOW_UP_AFTER_DAYS),
        }
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            tick_secs: DEFAULT_TICK_SECS,
            license_reminder_days: EXPIRY_REMINDER_WINDOW_DAYS,
            follow_up_days: FOLLOW_UP_AFTER_DAYS,
        }
    }
}

fn env_or<T: std::str::FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, default = %default, "Invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_registry_constants() {
        let config = WorkerConfig::default();
        assert_eq!(config.tick_secs, 300);
        assert_eq!(config.license_reminder_days, 90);
        assert_eq!(config.follow_up_days, 7);
    }

    #[test]
    fn unset_variable_uses_default() {
        assert_eq!(env_or("REGSUITE_TEST_UNSET_VARIABLE", 42u64), 42);
    }
}
