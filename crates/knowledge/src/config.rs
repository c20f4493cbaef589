//! Vector store layout and index manifest management.
//!
//! The store directory holds two files:
//! - `index.sqlite`: sources, chunks and embeddings
//! - `config.yaml`: the manifest written at build time

use crate::types::KnowledgeBaseConfig;
use ragassist_core::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the SQLite index path inside a store directory.
pub fn get_index_path(store_dir: &Path) -> PathBuf {
    store_dir.join("index.sqlite")
}

/// Get the manifest path inside a store directory.
pub fn get_manifest_path(store_dir: &Path) -> PathBuf {
    store_dir.join("config.yaml")
}

/// Load the index manifest, if one has been written.
pub fn load_manifest(store_dir: &Path) -> AppResult<Option<KnowledgeBaseConfig>> {
    let manifest_path = get_manifest_path(store_dir);

    if !manifest_path.exists() {
        tracing::debug!("No index manifest at {:?}", manifest_path);
        return Ok(None);
    }

    let content = fs::read_to_string(&manifest_path).map_err(|e| {
        AppError::Knowledge(format!(
            "Failed to read manifest at {:?}: {}",
            manifest_path, e
        ))
    })?;

    let manifest: KnowledgeBaseConfig = serde_yaml::from_str(&content).map_err(|e| {
        AppError::Knowledge(format!(
            "Failed to parse manifest at {:?}: {}",
            manifest_path, e
        ))
    })?;

    Ok(Some(manifest))
}

/// Save the index manifest.
pub fn save_manifest(store_dir: &Path, manifest: &KnowledgeBaseConfig) -> AppResult<()> {
    fs::create_dir_all(store_dir)
        .map_err(|e| AppError::Knowledge(format!("Failed to create store directory: {}", e)))?;

    let manifest_path = get_manifest_path(store_dir);
    let yaml = serde_yaml::to_string(manifest)
        .map_err(|e| AppError::Knowledge(format!("Failed to serialize manifest: {}", e)))?;

    fs::write(&manifest_path, yaml).map_err(|e| {
        AppError::Knowledge(format!(
            "Failed to write manifest to {:?}: {}",
            manifest_path, e
        ))
    })?;

    tracing::debug!("Saved index manifest to {:?}", manifest_path);
    Ok(())
}
