//! Browser match patterns (`<scheme>://<host>/<path>`)
//!
//! The host only forwards network events whose URL matches one of the
//! registry's patterns, so unrelated traffic never reaches the tracker.
//!
//! Supported syntax:
//! - scheme: `*` (http or https), `http`, `https`
//! - host: `*`, `*.example.com` (the domain and any subdomain), or exact
//! - path: glob where `*` matches any run of characters

use regex::Regex;
use std::fmt;

/// Why a pattern string was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternError {
    pub pattern: String,
    pub reason: &'static str,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid match pattern {:?}: {}", self.pattern, self.reason)
    }
}

impl std::error::Error for PatternError {}

/// A single compiled match pattern
#[derive(Debug, Clone)]
pub struct MatchPattern {
    regex: Regex,
}

impl MatchPattern {
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let err = |reason| PatternError {
            pattern: pattern.to_string(),
            reason,
        };

        let (scheme, rest) = pattern
            .split_once("://")
            .ok_or_else(|| err("missing scheme separator"))?;
        let scheme_re = match scheme {
            "*" => "https?",
            "http" => "http",
            "https" => "https",
            _ => return Err(err("unsupported scheme")),
        };

        let (host, path) = match rest.find('/') {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => return Err(err("missing path")),
        };

        let host_re = if host == "*" {
            "[^/]+".to_string()
        } else if let Some(domain) = host.strip_prefix("*.") {
            if domain.contains('*') {
                return Err(err("wildcard only allowed as leading host label"));
            }
            format!(r"(?:[^/]+\.)?{}", regex::escape(domain))
        } else if host.contains('*') || host.is_empty() {
            return Err(err("invalid host"));
        } else {
            regex::escape(host)
        };

        let path_re = path
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");

        // Optional port sits between host and path
        let full = format!("^{}://{}(?::\\d+)?{}$", scheme_re, host_re, path_re);
        let regex = Regex::new(&full).map_err(|_| err("failed to compile"))?;

        Ok(Self { regex })
    }

    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }
}

/// Union of patterns; a URL is in scope if any member matches
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<MatchPattern>,
}

impl PatternSet {
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self, PatternError> {
        let patterns = patterns
            .iter()
            .map(|p| MatchPattern::parse(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn matches(&self, url: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(url))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_scheme_exact_host() {
        let p = MatchPattern::parse("*://chatgpt.com/*").unwrap();
        assert!(p.matches("https://chatgpt.com/backend-api/conversation"));
        assert!(p.matches("http://chatgpt.com/"));
        assert!(!p.matches("https://evil.com/chatgpt.com/"));
        assert!(!p.matches("wss://chatgpt.com/socket"));
    }

    #[test]
    fn test_subdomain_wildcard() {
        let p = MatchPattern::parse("https://*.openai.com/*").unwrap();
        assert!(p.matches("https://chat.openai.com/backend-api/conversation"));
        assert!(p.matches("https://openai.com/"));
        assert!(!p.matches("https://notopenai.com/"));
        assert!(!p.matches("http://chat.openai.com/"));
    }

    #[test]
    fn test_path_glob_is_anchored() {
        let p = MatchPattern::parse("*://claude.ai/api/*").unwrap();
        assert!(p.matches("https://claude.ai/api/organizations/x/completion"));
        assert!(!p.matches("https://claude.ai/chat/abc"));
    }

    #[test]
    fn test_port_is_tolerated() {
        let p = MatchPattern::parse("*://localhost/*").unwrap();
        assert!(p.matches("http://localhost:8080/v1/chat"));
    }

    #[test]
    fn test_rejects_malformed_patterns() {
        assert!(MatchPattern::parse("chatgpt.com/*").is_err());
        assert!(MatchPattern::parse("ftp://chatgpt.com/*").is_err());
        assert!(MatchPattern::parse("*://chatgpt.com").is_err());
        assert!(MatchPattern::parse("*://chat*.com/*").is_err());
    }

    #[test]
    fn test_pattern_set_union() {
        let set = PatternSet::compile(&["*://chatgpt.com/*", "*://claude.ai/*"]).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.matches("https://claude.ai/api/append_message"));
        assert!(set.matches("https://chatgpt.com/backend-api/conversation"));
        assert!(!set.matches("https://example.com/"));
    }
}
