//! # Sprint-Chain Test Suite
//!
//! Cross-crate integration tests exercising the real chain store, sprint
//! engine, milestone verifier and API backend over one shared bus.
//!
//! ```bash
//! cargo test -p sprint-tests
//! ```

#![allow(dead_code)]

pub mod integration;
