//! Catalog Backend Library
//!
//! Exposes the auth core, catalog store, and router assembly for the
//! `catalogd` binary and integration tests.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod middleware;
