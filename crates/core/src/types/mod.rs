//! Core types for Sugarbook.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod period;
pub mod status;
pub mod timestamp;

pub use email::{Email, EmailError};
pub use id::*;
pub use period::Period;
pub use status::OrderStatus;
pub use timestamp::{format_timestamp, now_timestamp, parse_timestamp};
