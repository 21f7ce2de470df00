//! Janus Types - Shared domain types
//!
//! This crate contains domain types used across Janus services:
//! - User identity and roles
//! - Token pairs returned after authentication

pub mod token;
pub mod user;

pub use token::*;
pub use user::*;
