//! # Ports
//!
//! The store itself is the `ObjectStore` port from `shared-store`.

pub mod inbound;
