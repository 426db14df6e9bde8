//! Typed client for the todo backend's REST surface.

mod chat;
mod client;
mod tasks;

pub use client::{ApiClient, ApiError, StatusCode, normalize_failure};
