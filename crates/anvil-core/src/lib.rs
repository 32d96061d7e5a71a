//! Shared target configuration for the anvil compiler backend.

pub mod target;

pub use target::WordWidth;
