pub mod adapters;
pub mod bootstrap;
pub mod common;
pub mod config;
pub mod database;
pub mod dependencies;
pub mod domain;
mod routes;
pub mod services;

pub use crate::routes::create_routes;
