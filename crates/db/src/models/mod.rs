//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Create DTOs for inserts
//! - A safe response struct where the row carries secrets

pub mod password_reset;
pub mod session;
pub mod user;
pub mod work_log;
