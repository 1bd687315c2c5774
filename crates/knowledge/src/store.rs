//! Knowledge base loading and index construction.
//!
//! Walks the knowledge directory for markdown guideline files, splits them
//! into chunks and embeds everything into a fresh in-memory index. Built
//! once per session; provider switches trigger an explicit rebuild.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use pedisafe_core::{AppError, AppResult};
use walkdir::WalkDir;

use crate::embeddings::EmbeddingProvider;
use crate::index::VectorIndex;
use crate::sources;
use crate::splitter::RecursiveSplitter;
use crate::types::{BuildStats, Chunk, Document};

/// A built knowledge base: the index plus build statistics.
pub struct KnowledgeBase {
    pub index: VectorIndex,
    pub stats: BuildStats,
}

/// Load all markdown documents under `dir`, sorted by path.
///
/// Sorted traversal keeps chunk positions and index order stable across
/// runs. A missing directory or an empty corpus is fatal: without
/// guidelines there is nothing to answer from.
pub fn load_documents(dir: &Path) -> AppResult<Vec<Document>> {
    if !dir.is_dir() {
        return Err(AppError::KnowledgeLoad(format!(
            "Knowledge directory not found: {}",
            dir.display()
        )));
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(AppError::KnowledgeLoad(format!(
            "No markdown guideline files found in {}",
            dir.display()
        )));
    }

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let raw_text = std::fs::read_to_string(&path).map_err(|e| {
            AppError::KnowledgeLoad(format!("Failed to read {}: {e}", path.display()))
        })?;

        let citation = sources::citation(&path);
        documents.push(Document {
            path,
            raw_text,
            source_title: citation.title,
            source_url: citation.url,
        });
    }

    tracing::info!(count = documents.len(), dir = %dir.display(), "Loaded guideline documents");

    Ok(documents)
}

/// List the guideline filenames available under `dir`.
pub fn list_sources(dir: &Path) -> AppResult<Vec<String>> {
    let documents = load_documents(dir)?;
    Ok(documents
        .iter()
        .map(|d| {
            d.path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| d.path.to_string_lossy().to_string())
        })
        .collect())
}

/// Build a fresh vector index over the knowledge directory.
pub async fn build_index(
    dir: &Path,
    embedder: Arc<dyn EmbeddingProvider>,
    splitter: &RecursiveSplitter,
) -> AppResult<KnowledgeBase> {
    let started = Instant::now();
    let documents = load_documents(dir)?;

    let mut chunks: Vec<Chunk> = Vec::new();
    let mut bytes_processed = 0u64;

    for document in &documents {
        bytes_processed += document.raw_text.len() as u64;
        for (position, text) in splitter.split(&document.raw_text).into_iter().enumerate() {
            chunks.push(Chunk {
                text,
                source_path: document.path.clone(),
                position: position as u32,
            });
        }
    }

    if chunks.is_empty() {
        return Err(AppError::KnowledgeLoad(
            "Guideline files contained no indexable text".to_string(),
        ));
    }

    let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
    let embeddings = embedder.embed_batch(&texts).await?;

    let mut index = VectorIndex::new(embedder.fingerprint(), embedder.dimensions());
    for (chunk, embedding) in chunks.into_iter().zip(embeddings) {
        index.insert(chunk, embedding)?;
    }

    let stats = BuildStats {
        documents_count: documents.len() as u32,
        chunks_count: index.len() as u32,
        bytes_processed,
        duration_secs: started.elapsed().as_secs_f64(),
    };

    tracing::info!(
        documents = stats.documents_count,
        chunks = stats.chunks_count,
        fingerprint = index.fingerprint(),
        "Knowledge index built"
    );

    Ok(KnowledgeBase { index, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::TrigramProvider;
    use std::fs;

    fn write_corpus(dir: &Path) {
        fs::write(
            dir.join("nhs_fever_children.md"),
            "## High temperature\nA fever is 38C or above. Give plenty of fluids.\n",
        )
        .unwrap();
        fs::write(
            dir.join("aap_fever_baby.md"),
            "## Babies under 3 months\nAny fever of 38.0C needs a same-day doctor visit.\n",
        )
        .unwrap();
        fs::write(dir.join("notes.txt"), "not markdown, must be ignored").unwrap();
    }

    #[test]
    fn test_load_documents_sorted_and_filtered() {
        let tmp = tempfile::tempdir().unwrap();
        write_corpus(tmp.path());

        let docs = load_documents(tmp.path()).unwrap();
        assert_eq!(docs.len(), 2);
        // Sorted by path: aap before nhs
        assert!(docs[0].path.ends_with("aap_fever_baby.md"));
        assert!(docs[1].path.ends_with("nhs_fever_children.md"));
        assert_eq!(docs[0].source_title, "Fever and Your Baby - AAP");
        assert!(docs[0].source_url.is_some());
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let result = load_documents(Path::new("/nonexistent/knowledge"));
        assert!(matches!(result, Err(AppError::KnowledgeLoad(_))));
    }

    #[test]
    fn test_empty_corpus_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let result = load_documents(tmp.path());
        assert!(matches!(result, Err(AppError::KnowledgeLoad(_))));
    }

    #[test]
    fn test_list_sources_returns_filenames() {
        let tmp = tempfile::tempdir().unwrap();
        write_corpus(tmp.path());

        let names = list_sources(tmp.path()).unwrap();
        assert_eq!(
            names,
            vec![
                "aap_fever_baby.md".to_string(),
                "nhs_fever_children.md".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_build_index_counts_and_fingerprint() {
        let tmp = tempfile::tempdir().unwrap();
        write_corpus(tmp.path());

        let embedder = Arc::new(TrigramProvider::new(384));
        let splitter = RecursiveSplitter::default();
        let kb = build_index(tmp.path(), embedder, &splitter).await.unwrap();

        assert_eq!(kb.stats.documents_count, 2);
        assert!(kb.stats.chunks_count >= 2);
        assert_eq!(kb.index.len() as u32, kb.stats.chunks_count);
        assert_eq!(kb.index.fingerprint(), "trigram/trigram-v1");
        assert!(kb.stats.bytes_processed > 0);
    }

    #[tokio::test]
    async fn test_build_index_deterministic_order() {
        let tmp = tempfile::tempdir().unwrap();
        write_corpus(tmp.path());

        let embedder = Arc::new(TrigramProvider::new(384));
        let splitter = RecursiveSplitter::default();
        let a = build_index(tmp.path(), embedder.clone(), &splitter)
            .await
            .unwrap();
        let b = build_index(tmp.path(), embedder, &splitter).await.unwrap();

        assert_eq!(a.stats.chunks_count, b.stats.chunks_count);
        let hits_a = a.index.search(&vec![0.1; 384], 3).unwrap();
        let hits_b = b.index.search(&vec![0.1; 384], 3).unwrap();
        for (x, y) in hits_a.iter().zip(hits_b.iter()) {
            assert_eq!(x.chunk, y.chunk);
        }
    }
}
