//! # Shared Store
//!
//! Driven ports for the external object store plus an in-memory adapter used
//! by the runtime and by tests.
//!
//! ## Ports
//!
//! | Port | Purpose |
//! |------|---------|
//! | `ObjectStore` | Read forms, users, submissions and linked objects |
//! | `SubmissionWriter` | Create and patch submissions after the access gate passed |
//! | `ApiKeyDirectory` | Map a presented API key to a user |
//!
//! All reads are consistent snapshots; each write is a single atomic update.

pub mod memory;
pub mod ports;

pub use memory::{EntityRecord, FixtureError, InMemoryObjectStore, StoreFixture};
pub use ports::{ApiKeyDirectory, ObjectStore, SubmissionQuery, SubmissionWriter};
