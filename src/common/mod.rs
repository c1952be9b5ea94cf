//! Common types and utilities shared across scratchpool.
//!
//! This module contains the primitives the pool is built on:
//! - Configuration and size constants
//! - Error types
//! - Identifiers (SlotId)

pub mod config;
pub mod error;
mod slot_id;

pub use config::PoolConfig;
pub use error::{Error, Result};
pub use slot_id::SlotId;
