//! dollm - DigitalOcean inference model catalog CLI
//!
//! Integration layer between the DigitalOcean inference API and an LLM host
//! framework: a disk-cached model catalog with stale fallback, a vision
//! capability heuristic, and the registration configuration the host
//! consumes. Exposed as a library for integration tests and embedding.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod registry;
