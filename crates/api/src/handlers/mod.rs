//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod password_reset;
pub mod work_logs;
