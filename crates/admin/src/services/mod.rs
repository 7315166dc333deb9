//! External-service clients for the admin console.
//!
//! - `auth` - bearer-token verification against the remote auth service
//! - `assets` - image upload to the external asset host

pub mod assets;
pub mod auth;

pub use assets::{AssetClient, AssetError};
pub use auth::{AuthClient, AuthError};
