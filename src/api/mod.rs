//! API Module
//! Mission: Assemble the HTTP surface from the auth and catalog handlers

pub mod routes;

pub use routes::{create_router, AppState};
