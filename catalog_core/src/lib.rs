//! catalog_core - Quest and item catalogs
//!
//! Catalog files are sequences of blank-line-delimited blocks of `KEY: value`
//! lines. Quests form a prerequisite graph that is resolved and validated here;
//! per-character quest state lives in the engine.

mod config;
mod defaults;
mod quest;
mod registry;

pub use defaults::{write_default_data_files, DEFAULT_ITEMS, DEFAULT_QUESTS};
pub use quest::{Prerequisite, Quest, QuestId};
pub use registry::{ItemCatalog, QuestCatalog};

use item_core::EffectError;
use std::path::PathBuf;
use thiserror::Error;

/// Error loading a quest or item catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Data file not found: '{path:?}'")]
    MissingDataFile { path: PathBuf },
    #[error("Data file '{path:?}' could not be read: {reason}")]
    CorruptedData { reason: String, path: PathBuf },
    #[error("Invalid data in '{path:?}' (block at line {line}): {message}")]
    InvalidDataFormat {
        message: String,
        line: usize,
        path: PathBuf,
    },
    #[error("Item '{item_id}' in '{path:?}' has a malformed effect: {error}")]
    MalformedEffect {
        item_id: String,
        error: EffectError,
        path: PathBuf,
    },
    #[error("IO error writing '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: PathBuf,
    },
}

/// Error resolving the quest prerequisite graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestGraphError {
    #[error("Unknown quest: {0}")]
    QuestNotFound(QuestId),
    #[error("Quest '{quest}' requires unknown quest '{prerequisite}'")]
    MissingPrerequisite { quest: QuestId, prerequisite: QuestId },
    #[error("Cycle detected in quest prerequisites: {}", .0.join(" -> "))]
    CycleDetected(Vec<QuestId>),
}
