// Rust guideline compliant 2026-10-19

//! Adapters (secondary ports) for the adoption-report binary.
//!
//! Each sub-module implements one or more hexagonal port traits defined in the
//! `domain` crate.

pub mod in_memory_login_log;
