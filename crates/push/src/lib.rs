//! Push notification delivery for GèrTonArgent.
//!
//! Implements the core `PushSender` trait on top of the Firebase Cloud
//! Messaging HTTP v1 API. Requests are authorized with OAuth access tokens
//! minted from a Google service-account key.

mod client;
mod log_sender;
mod service_account;
mod token_provider;

pub use client::{FcmClient, DEFAULT_FCM_API_URL};
pub use log_sender::LogPushSender;
pub use service_account::ServiceAccountKey;
pub use token_provider::{AccessTokenProvider, FCM_SCOPE};
