//! Webhook authentication: HMAC-SHA256 (GitHub) and constant-time token
//! compare (GitLab), per spec §4.1.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Verifies `X-Hub-Signature-256: sha256=<hex>` against `body` under `secret`.
///
/// `hmac::Mac::verify_slice` performs the constant-time comparison; any
/// malformed header (missing prefix, non-hex digest) is treated the same as
/// a genuine mismatch so callers cannot distinguish the two.
pub fn verify_github_signature(secret: &[u8], body: &[u8], header_value: &str) -> bool {
    let Some(hex_digest) = header_value.strip_prefix("sha256=") else {
        return false;
    };
    let Ok(expected) = hex::decode(hex_digest) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Verifies `X-Gitlab-Token` against the configured secret, constant-time.
///
/// A length mismatch short-circuits to `false` without a timing-sensitive
/// byte comparison; the length of a webhook secret is not itself a secret.
pub fn verify_gitlab_token(secret: &str, header_value: &str) -> bool {
    let secret = secret.as_bytes();
    let header = header_value.as_bytes();
    if secret.len() != header.len() {
        return false;
    }
    secret.ct_eq(header).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmac::Mac;

    fn sign(secret: &[u8], body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(secret).unwrap();
        mac.update(body);
        format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
    }

    #[test]
    fn github_signature_round_trips() {
        let secret = b"super-secret";
        let body = b"{\"action\":\"opened\"}";
        let header = sign(secret, body);
        assert!(verify_github_signature(secret, body, &header));
    }

    #[test]
    fn github_signature_rejects_flipped_byte() {
        let secret = b"super-secret";
        let body = b"{\"action\":\"opened\"}";
        let header = sign(secret, body);
        let mut tampered = body.to_vec();
        tampered[0] ^= 0x01;
        assert!(!verify_github_signature(secret, &tampered, &header));
    }

    #[test]
    fn github_signature_rejects_missing_prefix() {
        assert!(!verify_github_signature(b"s", b"body", "deadbeef"));
    }

    #[test]
    fn github_signature_rejects_bad_hex() {
        assert!(!verify_github_signature(b"s", b"body", "sha256=not-hex"));
    }

    #[test]
    fn gitlab_token_matches_equal_strings() {
        assert!(verify_gitlab_token("top-secret", "top-secret"));
    }

    #[test]
    fn gitlab_token_rejects_mismatch() {
        assert!(!verify_gitlab_token("top-secret", "wrong"));
        assert!(!verify_gitlab_token("top-secret", "top-secre"));
    }
}
