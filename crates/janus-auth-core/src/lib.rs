//! Janus Auth Core - Authentication business logic
//!
//! Core authentication functionality: credential verification, access token
//! issuance, refresh token rotation with reuse detection, and authorization
//! policy checks.

pub mod config;
pub mod crypto;
pub mod error;
pub mod policy;
pub mod service;
pub mod session;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use policy::{require_role, self_or_admin};
pub use service::AuthService;
pub use session::SessionManager;
pub use token::{AccessClaims, TokenIssuer};
