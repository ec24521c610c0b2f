pub mod api;
pub mod auth;
pub mod config;
mod domain_events;
pub mod error;
mod main_lib;
pub mod scheduler;

pub use main_lib::{build_push_sender, build_state, build_state_with_push, init_tracing, AppState};
