//! Notifications module - push message model and delivery trait.

mod notifications_model;
mod notifications_traits;

pub use notifications_model::{Notification, PushMessage};
pub use notifications_traits::PushSender;
