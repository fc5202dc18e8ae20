//! Shared types for admin filters and AJAX plugins

pub mod errors;
pub mod responses;
