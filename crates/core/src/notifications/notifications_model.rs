//! Push notification models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Visible part of a push notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// A push message addressed to a single device token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    pub notification: Notification,
    /// Key/value payload delivered to the app alongside the notification.
    pub data: BTreeMap<String, String>,
    pub token: String,
}

impl PushMessage {
    pub fn new(token: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            notification: Notification {
                title: title.into(),
                body: body.into(),
            },
            data: BTreeMap::new(),
            token: token.into(),
        }
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}
