//! System prompt registry keyed by `SYSTEM_PROMPT_NAME` (spec §4.3, §6).
//!
//! Concrete prompt text is out of scope for this system (spec §1); a single
//! built-in entry is provided as the default.

const PERFORMANCE: &str = "You are a meticulous performance-focused code reviewer. \
Given a single diff hunk, either answer with inline review comments or request \
one more piece of repository context via a tool call. Always respond with a \
single JSON object and nothing else.";

/// Looks up `name` in the registry, falling back to the default
/// `"performance"` entry for any unrecognized name.
pub fn lookup(name: &str) -> &'static str {
    match name {
        "performance" => PERFORMANCE,
        _ => PERFORMANCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_falls_back_to_default() {
        assert_eq!(lookup("does-not-exist"), lookup("performance"));
    }
}
