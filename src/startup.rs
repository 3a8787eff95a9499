// Startup module - displays banner and watched services
//
// Printed before the watcher starts so the user can see which services are
// active and with which thresholds.

use crate::cli::RunMode;
use crate::config::{Config, VERSION};
use crate::services::{BuiltinService, ServiceRegistry};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// One builtin service as shown in the banner
pub struct ServiceStatus {
    pub name: &'static str,
    pub enabled: bool,
    pub host_match: &'static str,
    pub min_duration_ms: u64,
}

/// Status of every builtin service, disabled ones included
pub fn service_status(config: &Config) -> Vec<ServiceStatus> {
    BuiltinService::ALL
        .into_iter()
        .map(|service| ServiceStatus {
            name: service.name(),
            enabled: config.services.is_enabled(service),
            host_match: service.host_match(),
            min_duration_ms: config.services.min_duration_ms(service),
        })
        .collect()
}

fn mode_label(mode: &RunMode) -> String {
    match mode {
        RunMode::Demo => "built-in demo scenario".to_string(),
        RunMode::Replay(path) => format!("replay of {}", path.display()),
    }
}

/// Print the startup banner and service table
pub fn print_startup(config: &Config, mode: &RunMode) {
    use colors::*;

    // Banner
    println!();
    println!("  {BOLD}{CYAN}turnbell{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Background tab completion notifier{RESET}");
    println!();

    // Config file status
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!();

    println!("  {DIM}Watching services...{RESET}");
    for status in service_status(config) {
        print_service_status(&status);
    }
    println!();

    println!(
        "  {MAGENTA}▸{RESET} Debounce {BOLD}{}ms{RESET} {DIM}(sweep every {}s, stale after {}s){RESET}",
        config.timing.debounce_ms, config.timing.gc_interval_secs, config.timing.stale_after_secs
    );
    println!(
        "  {YELLOW}▸{RESET} Driving a simulated browser: {}",
        mode_label(mode)
    );
    println!();
}

fn print_service_status(status: &ServiceStatus) {
    use colors::*;

    let (icon, style) = if status.enabled {
        (format!("{GREEN}✓{RESET}"), "")
    } else {
        (format!("{DIM}○{RESET}"), DIM)
    };

    println!(
        "    {icon} {style}{:<12}{RESET} {DIM}{:<20} ≥ {}ms{RESET}",
        status.name, status.host_match, status.min_duration_ms
    );
}

/// Mirror the banner into the log so file logs record the effective setup
pub fn log_startup(config: &Config, registry: &ServiceRegistry) {
    tracing::info!(version = VERSION, "turnbell starting");
    for service in registry.services() {
        tracing::info!(
            service = %service.name,
            host = %service.host_match,
            min_duration_ms = service.min_duration.as_millis() as u64,
            "Watching service"
        );
    }
    if registry.is_empty() {
        tracing::warn!("Every service is disabled; nothing will be watched");
    }
    tracing::info!(
        debounce_ms = config.timing.debounce_ms,
        gc_interval_secs = config.timing.gc_interval_secs,
        stale_after_secs = config.timing.stale_after_secs,
        "Timers configured"
    );
}
