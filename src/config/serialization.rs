//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;
use crate::services::BuiltinService;

impl Config {
    /// Serialize `[services.X]` sections, one per builtin service
    pub(super) fn services_to_toml(&self) -> String {
        let mut output = String::new();
        for service in BuiltinService::ALL {
            output.push_str(&format!(
                "\n[services.{}]  # {} (matches \"{}\")\n",
                service.key(),
                service.name(),
                service.host_match()
            ));
            output.push_str(&format!(
                "enabled = {}\n",
                self.services.is_enabled(service)
            ));
            output.push_str(&format!(
                "min_duration_ms = {}\n",
                self.services.min_duration_ms(service)
            ));
        }
        output
    }

    fn icon_to_toml(&self) -> String {
        match &self.notification.icon {
            Some(icon) => format!("icon = {:?}\n", icon),
            None => "# icon = \"/path/to/icon.png\"\n".to_string(),
        }
    }

    /// Render the full config as a commented TOML document
    pub fn to_toml(&self) -> String {
        format!(
            r#"# turnbell configuration

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level:?}
# JSON file logging (in addition to stdout)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir:?}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix:?}

# Timers
[timing]
# Quiet period after the last long request before a tab is reported
debounce_ms = {debounce_ms}
# Sweep cadence for abandoned requests and unclicked notifications
gc_interval_secs = {gc_interval_secs}
stale_after_secs = {stale_after_secs}

[notification]
body = {body:?}
{icon}
# ─────────────────────────────────────────────────────────────────────────────
# SERVICES
# ─────────────────────────────────────────────────────────────────────────────
# Requests shorter than min_duration_ms are treated as metadata calls and
# never trigger a notification.
{services}"#,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display().to_string(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
            debounce_ms = self.timing.debounce_ms,
            gc_interval_secs = self.timing.gc_interval_secs,
            stale_after_secs = self.timing.stale_after_secs,
            body = self.notification.body,
            icon = self.icon_to_toml(),
            services = self.services_to_toml(),
        )
    }
}
