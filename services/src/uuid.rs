use uuid::Uuid;

/// Fresh, random identifier for a `review_request_id` or `chunk_id` (spec §3).
///
/// Opaque and unique per call; callers must not rely on any structure beyond
/// "parses as a UUID".
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
