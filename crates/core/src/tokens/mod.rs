//! Tokens module - device messaging token registration.

mod tokens_model;
mod tokens_service;

pub use tokens_model::{RegisterTokenRequest, RegisterTokenResponse};
pub use tokens_service::TokenRegistrar;
