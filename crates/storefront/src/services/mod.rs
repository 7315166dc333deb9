//! External-service clients for the storefront.
//!
//! - `auth` - remote authentication service (sign-up, sign-in, tokens)

pub mod auth;
