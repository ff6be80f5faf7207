//! Bit-exact key layout for the shared state store (spec §3).

pub fn review_request(review_request_id: &str) -> String {
    format!("review_request:{review_request_id}")
}

pub fn chunk(chunk_id: &str) -> String {
    format!("chunk:{chunk_id}")
}

pub fn review_request_chunks(review_request_id: &str) -> String {
    format!("review_request_chunks:{review_request_id}")
}

pub fn conversation(review_request_id: &str, chunk_id: &str) -> String {
    format!("conversation:{review_request_id}:{chunk_id}")
}

pub fn posted(repo_id: &str, pr_id: u64, hash: &str) -> String {
    format!("posted:{repo_id}:{pr_id}:{hash}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_match_bit_exact_layout() {
        assert_eq!(review_request("r1"), "review_request:r1");
        assert_eq!(chunk("c1"), "chunk:c1");
        assert_eq!(review_request_chunks("r1"), "review_request_chunks:r1");
        assert_eq!(conversation("r1", "c1"), "conversation:r1:c1");
        assert_eq!(posted("acme/repo", 5, "abcd"), "posted:acme/repo:5:abcd");
    }
}
