//! # Shared Types Crate
//!
//! Core chain entities shared by every Sprint-Chain subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: all cross-subsystem types are defined here.
//! - **Plain data**: entities carry no behavior beyond hashing and rendering;
//!   protocol logic lives in the subsystem crates.

pub mod entities;

pub use entities::*;
