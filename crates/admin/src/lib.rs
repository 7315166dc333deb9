//! MonNgon Admin library.
//!
//! This crate provides the admin console API as a library, allowing it to
//! be tested and reused.
//!
//! # Security
//!
//! This crate performs privileged operations: catalog writes, order status
//! administration, account blocking. Every route requires a bearer token
//! resolving to a profile with the admin role.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
