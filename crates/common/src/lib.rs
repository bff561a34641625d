//! Shared plumbing for the banner service crates: log setup, startup
//! environment checks and small wire types.

pub mod types;
pub mod utils;
pub mod env;
