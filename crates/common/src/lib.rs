//! Pieces shared by the binary and the HTTP crate: logging setup, data file
//! location and small wire types.

pub mod env;
pub mod types;
pub mod utils;
