//! Gateway domain: configuration and error mapping.

pub mod config;
pub mod error;
