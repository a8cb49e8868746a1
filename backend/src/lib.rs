//! GameHub Backend Library
//!
//! This library exposes the backend modules for use in tests and the
//! two server binaries.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod frontend;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod shutdown;
pub mod state;
