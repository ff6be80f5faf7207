//! Hunk chunking: splits one file's unified diff patch into reviewable
//! [`Chunk`] drafts (spec §4.2, step 3).

use git_context_engine::git_providers::types::{DiffHunk, DiffLine};
use git_context_engine::parser::parse_unified_diff_advanced;

use crate::model::{Chunk, ChunkStatus};

/// Default cap on hunks promoted to chunks per file, overridden by
/// `MAX_HUNK_CHANGES`.
pub const DEFAULT_MAX_HUNK_CHANGES: usize = 10;

/// Splits `patch` into at most `max_hunk_changes` chunk drafts, each
/// carrying the hunk text verbatim and its new-file line span.
///
/// An empty patch yields zero chunks. A patch with `k` hunks yields
/// `min(k, max_hunk_changes)` chunks, in source order.
pub fn chunk_file_diff(
    review_request_id: &str,
    filename: &str,
    patch: &str,
    max_hunk_changes: usize,
    new_chunk_id: impl Fn() -> String,
) -> Vec<Chunk> {
    if patch.trim().is_empty() {
        return Vec::new();
    }

    let hunks = parse_unified_diff_advanced(patch);

    hunks
        .into_iter()
        .take(max_hunk_changes)
        .map(|hunk| {
            let (start_line, end_line) = new_file_line_span(&hunk);
            Chunk {
                chunk_id: new_chunk_id(),
                review_request_id: review_request_id.to_string(),
                diff_snippet: render_hunk(&hunk),
                filename: filename.to_string(),
                start_line,
                end_line,
                context_level: 0,
                status: ChunkStatus::Pending,
                comment_body: None,
                line_number: None,
                idempotency_hash: None,
                metadata: Default::default(),
            }
        })
        .collect()
}

fn new_file_line_span(hunk: &DiffHunk) -> (u32, u32) {
    let new_lines: Vec<u32> = hunk
        .lines
        .iter()
        .filter_map(|l| match l {
            DiffLine::Added { new_line, .. } => Some(*new_line),
            DiffLine::Context { new_line, .. } => Some(*new_line),
            DiffLine::Removed { .. } => None,
        })
        .collect();

    match (new_lines.iter().min(), new_lines.iter().max()) {
        (Some(min), Some(max)) => (*min, *max),
        _ => (
            hunk.new_start,
            hunk.new_start + hunk.new_lines.saturating_sub(1),
        ),
    }
}

/// Reconstructs a minimal unified-diff rendering of a single hunk, used as
/// the chunk's verbatim `diff_snippet`.
fn render_hunk(hunk: &DiffHunk) -> String {
    let mut out = format!(
        "@@ -{},{} +{},{} @@\n",
        hunk.old_start, hunk.old_lines, hunk.new_start, hunk.new_lines
    );
    for line in &hunk.lines {
        match line {
            DiffLine::Added { content, .. } => out.push_str(&format!("+{content}\n")),
            DiffLine::Removed { content, .. } => out.push_str(&format!("-{content}\n")),
            DiffLine::Context { content, .. } => out.push_str(&format!(" {content}\n")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> impl Fn() -> String {
        let mut n = 0u32;
        move || {
            n += 1;
            format!("chunk-{n}")
        }
    }

    #[test]
    fn empty_patch_yields_no_chunks() {
        let chunks = chunk_file_diff("r1", "app.py", "", DEFAULT_MAX_HUNK_CHANGES, ids());
        assert!(chunks.is_empty());
    }

    #[test]
    fn one_hunk_yields_one_chunk_with_new_file_span() {
        let patch = "@@ -8,3 +10,3 @@\n context\n+added line\n context\n";
        let chunks = chunk_file_diff("r1", "app.py", patch, DEFAULT_MAX_HUNK_CHANGES, ids());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].start_line, 10);
        assert_eq!(chunks[0].end_line, 12);
        assert_eq!(chunks[0].status, ChunkStatus::Pending);
    }

    #[test]
    fn truncates_at_max_hunk_changes() {
        let mut patch = String::new();
        for i in 0..15u32 {
            patch.push_str(&format!("@@ -{0},1 +{0},1 @@\n+line{0}\n", i * 10 + 1));
        }
        let chunks = chunk_file_diff("r1", "app.py", &patch, DEFAULT_MAX_HUNK_CHANGES, ids());
        assert_eq!(chunks.len(), DEFAULT_MAX_HUNK_CHANGES);
    }
}
