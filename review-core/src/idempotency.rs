//! Idempotency hash for posted comments (spec §3, §4.4, §8).
//!
//! `idempotency_hash = SHA-256(filename || ":" || line_number || ":" || comment_body)`,
//! computed once a chunk reaches `COMMENT_READY` and checked against the
//! `posted:<repo_id>:<pr_id>:<hash>` marker before any provider call.

use sha2::{Digest, Sha256};

pub fn compute(filename: &str, line_number: u32, comment_body: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(filename.as_bytes());
    hasher.update(b":");
    hasher.update(line_number.to_string().as_bytes());
    hasher.update(b":");
    hasher.update(comment_body.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_deterministic() {
        let a = compute("app.py", 11, "Avoid blocking call here");
        let b = compute("app.py", 11, "Avoid blocking call here");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn differs_on_any_field() {
        let base = compute("app.py", 11, "comment");
        assert_ne!(base, compute("other.py", 11, "comment"));
        assert_ne!(base, compute("app.py", 12, "comment"));
        assert_ne!(base, compute("app.py", 11, "different"));
    }
}
