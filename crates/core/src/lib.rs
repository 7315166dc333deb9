//! MonNgon Core - Shared types library.
//!
//! This crate provides common types used across all MonNgon components:
//! - `store` - Typed client for the remote document store
//! - `storefront` - Customer-facing ordering API
//! - `admin` - Internal administration API
//! - `cli` - Command-line tools for seeding and management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Every
//! entity the document store holds is referenced through a newtype id from
//! here, money is always a [`Price`], and order-status changes always go
//! through [`OrderStatus::transition`].
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, prices, emails, phone numbers, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
