//! Shared test utilities for the curator workspace.
//!
//! Standardised git and folder fixtures used across crate test suites.
//! Dev-dependency only — never published.

pub mod git;
