//! Quizdash API client library
//!
//! Async REST client plumbing for quizdash dashboard views: an HTTP client
//! that attaches the current session's bearer credential and surfaces
//! machine-readable error bodies, an explicit session context with a
//! login-to-logout lifecycle, and the server paging contract.

pub mod api;
pub mod error;
pub mod session;

mod client;

pub use client::*;
