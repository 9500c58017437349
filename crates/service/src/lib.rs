//! Service layer for the daily strength record.
//! - Storage is reached only through the `StrengthStore` trait.
//! - Handlers in the `server` crate stay thin; gating, validation and
//!   rendering live here.

pub mod errors;
pub mod storage;
pub mod strength;
#[cfg(test)]
pub mod test_support;
