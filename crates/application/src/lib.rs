//! Ferrous CDN Application Layer
//!
//! Ports implemented by the infrastructure crate, plus the fetch-through
//! orchestration that sits between them.
pub mod ports;
pub mod services;
pub mod use_cases;
