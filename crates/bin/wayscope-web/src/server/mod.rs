pub mod builder;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logger;
pub mod routes;
pub mod state;
