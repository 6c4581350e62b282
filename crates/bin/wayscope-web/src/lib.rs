#![forbid(unsafe_code)]

pub mod server;
