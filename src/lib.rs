//! Task management REST service.
//!
//! Requests flow handler → use case → repository → MongoDB. Each layer is
//! reachable on its own so the HTTP surface can be exercised against the
//! in-memory repository.

pub mod config;
pub mod dependencies;
pub mod routes;
pub mod state;
pub mod storage;
pub mod tasks;
