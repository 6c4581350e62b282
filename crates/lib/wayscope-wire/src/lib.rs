#![forbid(unsafe_code)]

pub use prost;

pub mod record;
pub mod schema;
