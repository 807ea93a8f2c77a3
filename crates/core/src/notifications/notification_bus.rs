use chrono::{DateTime, Duration, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::config::EngineConfig;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
    /// `None` for notifications that stay until dismissed
    pub expires_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

/// Shared bus carrying notifications from orchestration back to presentation.
///
/// Success notifications expire after the configured interval; errors stay
/// active until dismissed. Subscribers receive every published notification.
pub struct NotificationBus {
    ttl: Duration,
    active: RwLock<Vec<Notification>>,
    sender: broadcast::Sender<Notification>,
}

impl NotificationBus {
    pub fn new(config: &EngineConfig) -> Self {
        let (sender, _receiver) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            ttl: config.notification_ttl(),
            active: RwLock::new(Vec::new()),
            sender,
        }
    }

    pub fn publish_success(&self, message: impl Into<String>) -> Notification {
        let now = Utc::now();
        self.publish(Notification {
            id: Uuid::new_v4(),
            kind: NotificationKind::Success,
            message: message.into(),
            created_at: now,
            expires_at: Some(now + self.ttl),
        })
    }

    pub fn publish_error(&self, message: impl Into<String>) -> Notification {
        self.publish(Notification {
            id: Uuid::new_v4(),
            kind: NotificationKind::Error,
            message: message.into(),
            created_at: Utc::now(),
            expires_at: None,
        })
    }

    /// Notifications still visible now. Expired entries are dropped.
    pub fn active(&self) -> Vec<Notification> {
        self.active_at(Utc::now())
    }

    pub fn active_at(&self, now: DateTime<Utc>) -> Vec<Notification> {
        match self.active.write() {
            Ok(mut active) => {
                active.retain(|n| !n.is_expired(now));
                active.clone()
            }
            Err(_) => Vec::new(),
        }
    }

    /// Removes a notification. Returns whether it was still active.
    pub fn dismiss(&self, id: Uuid) -> bool {
        match self.active.write() {
            Ok(mut active) => {
                let before = active.len();
                active.retain(|n| n.id != id);
                active.len() != before
            }
            Err(_) => false,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    fn publish(&self, notification: Notification) -> Notification {
        debug!("{:?} notification: {}", notification.kind, notification.message);
        if let Ok(mut active) = self.active.write() {
            active.push(notification.clone());
        }
        // No subscribers is fine; the active list still holds the notification.
        let _ = self.sender.send(notification.clone());
        notification
    }
}
