//! Ephemeral success and persistent error signals for presentation.

mod notification_bus;

pub use notification_bus::{Notification, NotificationBus, NotificationKind};
