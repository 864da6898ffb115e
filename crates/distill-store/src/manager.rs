//! Storage manager for the knowledge file tree.

use crate::error::{StoreError, StoreResult};
use distill_core::Classification;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Maximum length of the sanitized base name, before the hash suffix.
const MAX_BASE_LEN: usize = 50;

/// Paths produced by one `store` call.
#[derive(Debug, Clone)]
pub struct StoreReceipt {
    /// The shared filename used in every index directory.
    pub filename: String,
    /// Every path written, in write order (by_type first).
    pub paths: Vec<PathBuf>,
}

/// Persists validated documents into the knowledge store.
///
/// Writes are plain blocking filesystem operations with no locking;
/// concurrent calls targeting the same filename are last-writer-wins and
/// callers must serialize per knowledge base if they need stronger
/// guarantees. A failed write aborts the call but keeps the files already
/// written (no rollback).
pub struct StorageManager {
    knowledge_path: PathBuf,
}

impl StorageManager {
    /// Create a manager rooted at `knowledge_path`, creating the index
    /// directories if needed.
    pub fn new(knowledge_path: impl Into<PathBuf>) -> StoreResult<Self> {
        let knowledge_path = knowledge_path.into();
        std::fs::create_dir_all(knowledge_path.join("by_type"))?;
        std::fs::create_dir_all(knowledge_path.join("by_product"))?;

        Ok(Self { knowledge_path })
    }

    /// Store a validated document under every index directory it belongs to.
    ///
    /// The document lands in `by_type/<type>/` always (`unknown` when the
    /// type is absent) and in `by_product/<product>/` once per non-empty
    /// product entry. Directory segments are sanitized, case preserved.
    pub fn store(
        &self,
        document: &str,
        source_file: &str,
        classification: &Classification,
    ) -> StoreResult<StoreReceipt> {
        let filename = self.build_filename(source_file)?;

        // The type string is used verbatim (the "Unknown" sentinel keeps its
        // casing); only an absent type falls back to the lowercase directory.
        let doc_type = if classification.doc_type.is_empty() {
            "unknown".to_string()
        } else {
            sanitize_dir_segment(&classification.doc_type)
        };

        let mut paths = Vec::new();

        let type_dir = self.knowledge_path.join("by_type").join(&doc_type);
        paths.push(self.write_copy(&type_dir, &filename, document)?);

        for product in &classification.products {
            let product = sanitize_dir_segment(product);
            if product.is_empty() {
                continue;
            }
            let product_dir = self.knowledge_path.join("by_product").join(&product);
            paths.push(self.write_copy(&product_dir, &filename, document)?);
        }

        info!(
            "stored {} as {} ({} copies)",
            source_file,
            filename,
            paths.len()
        );

        Ok(StoreReceipt { filename, paths })
    }

    /// `{sanitized-base}_{8-hex-hash}.md` derived from the source file name.
    fn build_filename(&self, source_file: &str) -> StoreResult<String> {
        if source_file.trim().is_empty() {
            return Err(StoreError::InvalidSourceName(source_file.to_string()));
        }

        let hash = Sha256::digest(source_file.as_bytes());
        let hash_short = hex_prefix(&hash, 8);

        let base = sanitize_base_name(source_file);
        Ok(format!("{}_{}.md", base, hash_short))
    }

    fn write_copy(&self, dir: &Path, filename: &str, document: &str) -> StoreResult<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(filename);

        std::fs::write(&path, document).map_err(|e| StoreError::WriteFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;

        debug!("wrote {}", path.display());
        Ok(path)
    }
}

/// Strip the extension, replace anything outside `[A-Za-z0-9_-]` with `_`,
/// truncate to 50 characters, lowercase.
fn sanitize_base_name(source_file: &str) -> String {
    let stem = Path::new(source_file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(source_file);

    stem.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(MAX_BASE_LEN)
        .collect::<String>()
        .to_lowercase()
}

/// Replace anything outside `[A-Za-z0-9_-]` with `_`, preserving case.
///
/// Type and product names come from the LLM; mapping separators away keeps
/// every index directory under the knowledge root.
fn sanitize_dir_segment(segment: &str) -> String {
    segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// First `n` hex characters of a digest.
fn hex_prefix(digest: &[u8], n: usize) -> String {
    digest
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<String>()
        .chars()
        .take(n)
        .collect()
}
