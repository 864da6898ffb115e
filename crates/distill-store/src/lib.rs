//! Distill Store - File-based knowledge store for validated documents.
//!
//! Accepted documents are written under a knowledge root, indexed
//! redundantly by document type and by product. Each index directory holds
//! an independent complete copy, not a symlink.

mod error;
mod manager;

pub use error::{StoreError, StoreResult};
pub use manager::{StorageManager, StoreReceipt};
