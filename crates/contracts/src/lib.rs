//! Shared contracts between the dashboard frontend and the backend, plus the
//! pure filtering/aggregation core the dashboard is built on.

pub mod auth;
pub mod filter;
pub mod payload;
pub mod summary;
