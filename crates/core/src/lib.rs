//! Sugarbook Core - Shared types library.
//!
//! This crate provides common types used across all Sugarbook components:
//! - `server` - JSON API for users, clients, ingredients, recipes and orders
//! - `cli` - Command-line tools for migrations and configuration checks
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Opaque string IDs, emails, order statuses, dashboard periods
//!   and timestamp helpers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
