#![forbid(unsafe_code)]

pub mod decoder;
pub mod scenario;
pub mod signal;
