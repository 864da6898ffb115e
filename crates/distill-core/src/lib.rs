//! Distill Core - Shared domain types for the distill pipeline.

mod types;

pub use types::*;
