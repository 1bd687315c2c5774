//! Recursive character splitter for guideline markdown.
//!
//! Splits a document by trying separators in priority order (section
//! headers, paragraphs, lines, sentences, words), recursing into pieces
//! that are still oversized, then greedily merging small pieces back into
//! chunks with a sliding overlap window. Deterministic: the same input
//! always yields the same chunk sequence.

use pedisafe_core::{AppError, AppResult};

/// Separator priority for medical markdown. Headers first so sections
/// stay coherent; words are the last resort.
const SEPARATORS: [&str; 7] = ["\n## ", "\n### ", "\n#### ", "\n\n", "\n", ". ", " "];

/// Configurable recursive splitter.
#[derive(Debug, Clone)]
pub struct RecursiveSplitter {
    /// Target maximum chunk length in characters
    pub chunk_size: usize,

    /// Overlap carried between consecutive chunks of one document
    pub overlap: usize,
}

impl Default for RecursiveSplitter {
    fn default() -> Self {
        // 1000/200 works well for guideline text: sections fit in one or
        // two chunks and threshold tables survive the boundary.
        Self {
            chunk_size: 1000,
            overlap: 200,
        }
    }
}

impl RecursiveSplitter {
    pub fn new(chunk_size: usize, overlap: usize) -> AppResult<Self> {
        if overlap >= chunk_size {
            return Err(AppError::Config(format!(
                "Chunk overlap ({overlap}) must be smaller than chunk size ({chunk_size})"
            )));
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Split a document into chunk texts, in document order.
    pub fn split(&self, text: &str) -> Vec<String> {
        let chunks: Vec<String> = self
            .split_recursive(text, &SEPARATORS)
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        tracing::debug!(
            "Split {} chars into {} chunks (size: {}, overlap: {})",
            text.len(),
            chunks.len(),
            self.chunk_size,
            self.overlap
        );

        chunks
    }

    fn split_recursive(&self, text: &str, separators: &[&str]) -> Vec<String> {
        // Pick the first separator that actually occurs in this unit.
        let mut separator = *separators.last().unwrap_or(&" ");
        let mut remaining: &[&str] = &[];
        for (i, sep) in separators.iter().enumerate() {
            if text.contains(sep) {
                separator = sep;
                remaining = &separators[i + 1..];
                break;
            }
        }

        let splits = split_keeping_separator(text, separator);

        let mut final_chunks = Vec::new();
        let mut good_splits: Vec<String> = Vec::new();

        for piece in splits {
            if piece.chars().count() < self.chunk_size {
                good_splits.push(piece);
            } else {
                if !good_splits.is_empty() {
                    final_chunks.extend(self.merge_splits(&good_splits));
                    good_splits.clear();
                }
                if remaining.is_empty() {
                    // Nothing finer to try; keep the oversized piece whole.
                    final_chunks.push(piece);
                } else {
                    final_chunks.extend(self.split_recursive(&piece, remaining));
                }
            }
        }

        if !good_splits.is_empty() {
            final_chunks.extend(self.merge_splits(&good_splits));
        }

        final_chunks
    }

    /// Greedily pack pieces into chunks up to `chunk_size`, keeping a
    /// sliding window of trailing pieces (~`overlap` chars) as the start
    /// of the next chunk.
    fn merge_splits(&self, splits: &[String]) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut window: Vec<&String> = Vec::new();
        let mut total = 0usize;

        for piece in splits {
            let len = piece.chars().count();

            if total + len > self.chunk_size && !window.is_empty() {
                chunks.push(window.iter().map(|s| s.as_str()).collect::<String>());

                // Drop leading pieces until only the overlap tail remains.
                while total > self.overlap
                    || (total + len > self.chunk_size && total > 0)
                {
                    let dropped = window.remove(0);
                    total -= dropped.chars().count();
                }
            }

            window.push(piece);
            total += len;
        }

        if !window.is_empty() {
            chunks.push(window.iter().map(|s| s.as_str()).collect::<String>());
        }

        chunks
    }
}

/// Split `text` on `separator`, attaching each separator occurrence to the
/// piece that follows it (so "\n## Heading" stays with its section body).
fn split_keeping_separator(text: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        return vec![text.to_string()];
    }

    let mut pieces = Vec::new();
    let mut rest = text;
    let mut first = true;

    loop {
        match rest.find(separator) {
            Some(idx) if first && idx == 0 => {
                // Document starts with the separator; skip the empty lead.
                first = false;
                let split_at = match rest[separator.len()..].find(separator) {
                    Some(next) => separator.len() + next,
                    None => {
                        pieces.push(rest.to_string());
                        break;
                    }
                };
                pieces.push(rest[..split_at].to_string());
                rest = &rest[split_at..];
            }
            Some(idx) => {
                if first {
                    pieces.push(rest[..idx].to_string());
                    first = false;
                } else {
                    pieces.push(rest[..idx].to_string());
                }
                rest = &rest[idx..];
                // Find where the next piece (including this separator) ends.
                let split_at = match rest[separator.len()..].find(separator) {
                    Some(next) => separator.len() + next,
                    None => {
                        pieces.push(rest.to_string());
                        break;
                    }
                };
                pieces.push(rest[..split_at].to_string());
                rest = &rest[split_at..];
            }
            None => {
                pieces.push(rest.to_string());
                break;
            }
        }
    }

    pieces.retain(|p| !p.is_empty());
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_chunk() {
        let splitter = RecursiveSplitter::default();
        let chunks = splitter.split("A short guideline note.");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], "A short guideline note.");
    }

    #[test]
    fn test_empty_text_no_chunks() {
        let splitter = RecursiveSplitter::default();
        assert!(splitter.split("").is_empty());
        assert!(splitter.split("   \n\n  ").is_empty());
    }

    #[test]
    fn test_overlap_must_be_smaller_than_size() {
        assert!(RecursiveSplitter::new(100, 100).is_err());
        assert!(RecursiveSplitter::new(100, 20).is_ok());
    }

    #[test]
    fn test_splits_on_section_headers_first() {
        let splitter = RecursiveSplitter::new(200, 40).unwrap();
        let text = format!(
            "## Fever basics\n{}\n## When to call\n{}",
            "Normal temperature varies by age. ".repeat(8),
            "Call your pediatrician if fever persists. ".repeat(8),
        );

        let chunks = splitter.split(&text);
        assert!(chunks.len() >= 2);
        // Header lines stay attached to their section body.
        assert!(chunks.iter().any(|c| c.starts_with("## Fever basics")));
        assert!(chunks.iter().any(|c| c.starts_with("## When to call")));
    }

    #[test]
    fn test_chunks_within_size_budget() {
        let splitter = RecursiveSplitter::new(300, 60).unwrap();
        let text = "The fever threshold for infants is 38.0 degrees. ".repeat(40);

        let chunks = splitter.split(&text);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(!chunk.is_empty());
            // Small slack allowed when a sentence straddles the boundary.
            assert!(chunk.chars().count() <= 300 + 60);
        }
    }

    #[test]
    fn test_consecutive_chunks_share_overlap() {
        let splitter = RecursiveSplitter::new(200, 80).unwrap();
        let sentences: Vec<String> = (0..30)
            .map(|i| format!("Sentence number {i} about pediatric fever care. "))
            .collect();
        let text = sentences.concat();

        let chunks = splitter.split(&text);
        assert!(chunks.len() > 1);

        for pair in chunks.windows(2) {
            // The second chunk starts with material repeated from the
            // first chunk's tail.
            let head: String = pair[1].chars().take(20).collect();
            assert!(
                pair[0].contains(head.trim()),
                "no overlap between {:?} and {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_round_trip_covers_document() {
        let splitter = RecursiveSplitter::new(250, 50).unwrap();
        let lines: Vec<String> = (0..40)
            .map(|i| format!("Line {i}: guidance item about hydration and rest."))
            .collect();
        let text = lines.join("\n");

        let chunks = splitter.split(&text);
        let joined = chunks.join("\n");

        // Every original line appears in at least one chunk: no gaps.
        for line in &lines {
            assert!(joined.contains(line.as_str()), "missing line: {line}");
        }
    }

    #[test]
    fn test_deterministic() {
        let splitter = RecursiveSplitter::default();
        let text = "## A\npara one\n\npara two\n\n## B\npara three".repeat(20);
        assert_eq!(splitter.split(&text), splitter.split(&text));
    }

    #[test]
    fn test_oversized_unit_falls_back_to_next_separator() {
        let splitter = RecursiveSplitter::new(50, 10).unwrap();
        // One long paragraph with no headers: must fall through to
        // sentence and word separators.
        let text = "A very long single paragraph about fever thresholds. ".repeat(10);
        let chunks = splitter.split(&text);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 50 + 56);
        }
    }
}
