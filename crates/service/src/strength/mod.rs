//! The strength record: auth gate, payload validation, and read-side rendering.

pub mod auth;
pub mod render;
pub mod service;

pub use auth::AuthGate;
pub use service::{StrengthService, StrengthView, UpdateAck};
