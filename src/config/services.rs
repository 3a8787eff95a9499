//! Per-service overrides
//!
//! The service table itself is compiled in; config can only switch a service
//! off or move its duration threshold.

use crate::services::BuiltinService;
use serde::Deserialize;
use std::collections::HashMap;

/// Override for one builtin service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceOverride {
    pub enabled: bool,
    /// Replaces the builtin minimum duration when set
    pub min_duration_ms: Option<u64>,
}

impl Default for ServiceOverride {
    fn default() -> Self {
        Self {
            enabled: true,
            min_duration_ms: None,
        }
    }
}

/// Override as loaded from a `[services.<key>]` section
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FileServiceOverride {
    pub enabled: Option<bool>,
    pub min_duration_ms: Option<u64>,
}

/// Overrides keyed by `BuiltinService::key()`
#[derive(Debug, Clone, Default)]
pub struct ServicesConfig {
    pub overrides: HashMap<String, ServiceOverride>,
}

impl ServicesConfig {
    /// Create from file sections, skipping keys that name no builtin service
    pub fn from_file(file: HashMap<String, FileServiceOverride>) -> Self {
        let mut overrides = HashMap::new();
        for (key, section) in file {
            if BuiltinService::from_key(&key).is_none() {
                eprintln!("Warning: ignoring [services.{}] (unknown service)", key);
                continue;
            }
            overrides.insert(
                key,
                ServiceOverride {
                    enabled: section.enabled.unwrap_or(true),
                    min_duration_ms: section.min_duration_ms,
                },
            );
        }
        Self { overrides }
    }

    /// Effective threshold for a service after overrides
    pub fn min_duration_ms(&self, service: BuiltinService) -> u64 {
        self.overrides
            .get(service.key())
            .and_then(|o| o.min_duration_ms)
            .unwrap_or_else(|| service.default_min_duration_ms())
    }

    pub fn is_enabled(&self, service: BuiltinService) -> bool {
        self.overrides
            .get(service.key())
            .map(|o| o.enabled)
            .unwrap_or(true)
    }
}
