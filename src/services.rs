// Service registry - the fixed set of AI chat services we watch
//
// Each service is identified by a host fragment. Matching is a plain substring
// test on the full URL: permissive on purpose, since the duration threshold
// downstream is what filters out the noise (metadata calls, polling).

use crate::config::ServicesConfig;
use std::sync::Arc;
use std::time::Duration;

/// The supported services, in matching order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinService {
    ChatGpt,
    Claude,
    Gemini,
    Perplexity,
}

impl BuiltinService {
    pub const ALL: [BuiltinService; 4] = [
        BuiltinService::ChatGpt,
        BuiltinService::Claude,
        BuiltinService::Gemini,
        BuiltinService::Perplexity,
    ];

    /// Config key for `[services.<key>]`
    pub fn key(&self) -> &'static str {
        match self {
            Self::ChatGpt => "chatgpt",
            Self::Claude => "claude",
            Self::Gemini => "gemini",
            Self::Perplexity => "perplexity",
        }
    }

    /// Display name, used as the notification title
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChatGpt => "ChatGPT",
            Self::Claude => "Claude",
            Self::Gemini => "Gemini",
            Self::Perplexity => "Perplexity",
        }
    }

    pub fn host_match(&self) -> &'static str {
        match self {
            Self::ChatGpt => "chatgpt.com",
            Self::Claude => "claude.ai",
            Self::Gemini => "gemini.google.com",
            Self::Perplexity => "perplexity.ai",
        }
    }

    pub fn url_patterns(&self) -> &'static [&'static str] {
        match self {
            Self::ChatGpt => &["*://chatgpt.com/*", "*://*.chatgpt.com/*"],
            Self::Claude => &["*://claude.ai/*"],
            Self::Gemini => &["*://gemini.google.com/*"],
            Self::Perplexity => &["*://*.perplexity.ai/*"],
        }
    }

    /// Empirical cutoff between generation calls and ancillary API calls
    pub fn default_min_duration_ms(&self) -> u64 {
        match self {
            Self::ChatGpt => 2000,
            Self::Claude => 2000,
            Self::Gemini => 1500,
            Self::Perplexity => 2500,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

/// Immutable description of one watched service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDefinition {
    pub name: String,
    pub host_match: String,
    pub url_patterns: Vec<String>,
    pub min_duration: Duration,
}

impl From<BuiltinService> for ServiceDefinition {
    fn from(service: BuiltinService) -> Self {
        Self {
            name: service.name().to_string(),
            host_match: service.host_match().to_string(),
            url_patterns: service
                .url_patterns()
                .iter()
                .map(|p| p.to_string())
                .collect(),
            min_duration: Duration::from_millis(service.default_min_duration_ms()),
        }
    }
}

/// Ordered table of service definitions, fixed for the life of the process
#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    services: Vec<Arc<ServiceDefinition>>,
}

impl ServiceRegistry {
    pub fn new(services: Vec<ServiceDefinition>) -> Self {
        Self {
            services: services.into_iter().map(Arc::new).collect(),
        }
    }

    /// All builtin services with their default thresholds
    pub fn builtin() -> Self {
        Self::new(BuiltinService::ALL.into_iter().map(Into::into).collect())
    }

    /// Builtin services with `[services.<key>]` overrides applied
    pub fn from_config(config: &ServicesConfig) -> Self {
        let services = BuiltinService::ALL
            .into_iter()
            .filter_map(|service| {
                if !config.is_enabled(service) {
                    tracing::debug!(service = service.name(), "Service disabled in config");
                    return None;
                }
                let mut definition = ServiceDefinition::from(service);
                definition.min_duration = Duration::from_millis(config.min_duration_ms(service));
                Some(definition)
            })
            .collect();
        Self::new(services)
    }

    /// First service whose host fragment appears anywhere in the URL
    pub fn match_url(&self, url: &str) -> Option<Arc<ServiceDefinition>> {
        self.services
            .iter()
            .find(|s| url.contains(s.host_match.as_str()))
            .cloned()
    }

    /// Union of every service's URL patterns, first occurrence order
    pub fn url_patterns(&self) -> Vec<String> {
        let mut patterns: Vec<String> = Vec::new();
        for pattern in self.services.iter().flat_map(|s| s.url_patterns.iter()) {
            if !patterns.contains(pattern) {
                patterns.push(pattern.clone());
            }
        }
        patterns
    }

    pub fn services(&self) -> impl Iterator<Item = &Arc<ServiceDefinition>> {
        self.services.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
