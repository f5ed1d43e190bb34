//! CLI command handlers

pub mod profiles;
pub mod validate;
