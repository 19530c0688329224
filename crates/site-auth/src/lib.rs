//! # site-auth
//!
//! Session handling for sitelog.
//!
//! Provides the [`SessionGate`] (live session state over a `watch` channel),
//! the [`IdentityProvider`] boundary with its Identity Toolkit REST client,
//! and OS keychain / file credential storage (`keyring`).

pub mod claims;
pub mod error;
pub mod gate;
pub mod provider;
pub mod token_store;

pub use claims::SessionTokens;
pub use error::AuthError;
pub use gate::{SessionGate, SessionState};
pub use provider::{IdentityProvider, IdentityToolkit, Unconfigured};
pub use token_store::TokenStore;
