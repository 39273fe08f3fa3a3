//! # Formgate Test Suite
//!
//! Unified test crate for behaviour that spans subsystems.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/           # Criterion benchmarks (policy chain, enrichment, routing)
//! └── src/integration/   # Cross-subsystem scenarios
//!     ├── fixtures.rs    # Shared store and gateway builders
//!     ├── access.rs      # Policy chain and form resolution
//!     ├── listing.rs     # Time-window listings
//!     ├── enrichment.rs  # linked / attachments shapes
//!     └── http.rs        # End-to-end requests through the router
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p fg-tests
//! cargo test -p fg-tests integration::http::
//!
//! # Benchmarks
//! cargo bench -p fg-tests
//! ```

pub mod integration;
