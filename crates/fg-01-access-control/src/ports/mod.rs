//! # Ports
//!
//! - `inbound` - `AccessControlApi`, consumed by the gateway
//! - `outbound` - `CapabilityEvaluator`, supplied by the host

pub mod inbound;
pub mod outbound;
