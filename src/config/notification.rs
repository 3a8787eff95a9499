//! Notification appearance

use crate::notifier::DEFAULT_BODY;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    /// Body text shown under the service name
    pub body: String,
    /// Icon path or URL handed to the host, if any
    pub icon: Option<String>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            body: DEFAULT_BODY.to_string(),
            icon: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileNotification {
    pub body: Option<String>,
    pub icon: Option<String>,
}

impl NotificationConfig {
    pub fn from_file(file: Option<FileNotification>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            body: file.body.unwrap_or(defaults.body),
            icon: file.icon.or(defaults.icon),
        }
    }
}
