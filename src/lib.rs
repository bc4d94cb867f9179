// Library exports for Lido
// This allows integration tests and external code to use Lido modules

pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod reservations;
pub mod routes;
pub mod serde_helpers;
pub mod state;
