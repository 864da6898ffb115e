//! Pipeline orchestration: extract -> enrich -> validate -> store.

use crate::analyzer::Analyzer;
use crate::error::{IngestError, IngestResult};
use crate::extractors::{DocumentExtractor, DocxExtractor};
use distill_config::Config;
use distill_core::Classification;
use distill_dify::DifyClient;
use distill_quality::{QualityGate, ValidationResult};
use distill_store::{StorageManager, StoreReceipt};
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

/// What happened to one input file.
#[derive(Debug)]
pub enum FileOutcome {
    /// Passed the gate and was written to the knowledge store.
    Stored {
        receipt: StoreReceipt,
        score: f64,
    },
    /// Rejected by the quality gate.
    Rejected { validation: ValidationResult },
    /// A pipeline stage failed.
    Failed { message: String },
}

/// Sequential orchestrator over the pipeline stages.
///
/// One instance per batch; stages are plain synchronous calls, no
/// parallelism. A rejected or failed file never aborts the batch.
pub struct Pipeline {
    extractor: DocxExtractor,
    analyzer: Analyzer,
    gate: QualityGate,
    store: StorageManager,
    dify: Option<DifyClient>,
    rt: Runtime,
}

impl Pipeline {
    /// Build the full pipeline from configuration.
    ///
    /// Fails fast when Ollama is unreachable or the Dify forwarder is
    /// enabled but incomplete.
    pub fn from_config(config: &Config) -> IngestResult<Self> {
        let analyzer = Analyzer::from_config(&config.llm)?;
        let gate = QualityGate::from_config(&config.quality);
        let store = StorageManager::new(config.paths.knowledge.clone())?;

        let dify = if config.dify.enabled {
            Some(DifyClient::from_config(&config.dify)?)
        } else {
            None
        };

        let rt = Runtime::new().map_err(|e| IngestError::Runtime(e.to_string()))?;

        Ok(Self {
            extractor: DocxExtractor::new(),
            analyzer,
            gate,
            store,
            dify,
            rt,
        })
    }

    /// Run one file through every stage.
    ///
    /// Returns `Stored` or `Rejected`; stage failures surface as `Err` and
    /// are translated to `FileOutcome::Failed` by `process_file_report`.
    pub fn process_file(&self, path: &Path) -> IngestResult<FileOutcome> {
        info!("processing {}", path.display());

        let extracted = self.extractor.extract(path)?;
        debug!("extracted {} characters", extracted.text.len());

        let document = self.analyzer.analyze(&extracted.text, &extracted.metadata)?;

        let validation = self.gate.validate(&document);
        info!("quality score: {}", validation.score);

        if !validation.is_valid {
            return Ok(FileOutcome::Rejected { validation });
        }

        // Route storage by the classification the document actually carries,
        // not by the analyzer's in-memory value.
        let classification = classification_from_document(&document);
        let receipt =
            self.store
                .store(&document, &extracted.metadata.source_file, &classification)?;

        self.forward_to_dify(&receipt);

        Ok(FileOutcome::Stored {
            receipt,
            score: validation.score,
        })
    }

    /// Best-effort upload of the stored document's primary copy.
    fn forward_to_dify(&self, receipt: &StoreReceipt) {
        let Some(client) = &self.dify else {
            return;
        };
        let Some(path) = receipt.paths.first() else {
            return;
        };

        if let Err(e) = self.rt.block_on(client.upload_file(path)) {
            warn!("Dify upload failed for {}: {}", path.display(), e);
        }
    }

    /// Run one file through every stage, folding stage failures into the
    /// outcome so a batch caller never has to abort.
    pub fn process_file_report(&self, path: &Path) -> FileOutcome {
        match self.process_file(path) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("pipeline stage failed for {}: {}", path.display(), e);
                FileOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}

/// List the DOCX files directly inside the inbox, sorted by name.
pub fn scan_inbox(inbox: &Path) -> IngestResult<Vec<PathBuf>> {
    if !inbox.is_dir() {
        return Err(IngestError::FileNotFound(inbox.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(inbox)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("docx"))
                .unwrap_or(false)
        })
        .map(|e| e.into_path())
        .collect();

    files.sort();
    Ok(files)
}

/// Re-read the classification block from a validated document's header.
///
/// The document has already passed the gate, so the header is well-formed;
/// any residual parse gap degrades to the "Unknown" fallback, which routes
/// the file to `by_type/Unknown/`.
fn classification_from_document(document: &str) -> Classification {
    let parts: Vec<&str> = document.split("---").collect();
    if parts.len() < 3 {
        return Classification::default();
    }

    serde_yaml::from_str::<serde_yaml::Value>(parts[1])
        .ok()
        .and_then(|frontmatter| frontmatter.get("classification").cloned())
        .and_then(|block| serde_yaml::from_value::<Classification>(block).ok())
        .unwrap_or_default()
}
