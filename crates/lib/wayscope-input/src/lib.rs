#![forbid(unsafe_code)]

pub mod catalog;
pub mod index;
pub mod session;
