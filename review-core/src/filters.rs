//! Relevancy and semantic-change filters applied to each file in a diff
//! before it is chunked (spec §4.2, steps 1-2).

/// Filter configuration, driven by `IGNORED_EXTENSIONS` / `IGNORED_FILES` /
/// `IGNORED_DIRECTORIES` (comma-separated) with the spec's defaults.
#[derive(Debug, Clone)]
pub struct RelevancyFilter {
    ignored_extensions: Vec<String>,
    ignored_files: Vec<String>,
    ignored_dirs: Vec<String>,
}

impl Default for RelevancyFilter {
    fn default() -> Self {
        Self {
            ignored_extensions: [
                "lock", "json", "map", "svg", "png", "jpg", "jpeg", "pyc", "yml", "toml", "pyd",
                "md", "dockerignore",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            ignored_files: [".gitignore", ".env", "LICENSE", "CONTRIBUTING.md"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            ignored_dirs: ["__pycache__", "node_modules", ".venv", "tests", "migrations"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl RelevancyFilter {
    pub fn from_env_lists(extensions: &str, files: &str, dirs: &str) -> Self {
        let split = |s: &str| -> Vec<String> {
            s.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        };
        let defaults = Self::default();
        Self {
            ignored_extensions: if extensions.trim().is_empty() {
                defaults.ignored_extensions
            } else {
                split(extensions)
            },
            ignored_files: if files.trim().is_empty() {
                defaults.ignored_files
            } else {
                split(files)
            },
            ignored_dirs: if dirs.trim().is_empty() {
                defaults.ignored_dirs
            } else {
                split(dirs)
            },
        }
    }

    /// Returns `true` if the file should be skipped (is not relevant).
    ///
    /// `has_patch` is `false` when the provider reported no patch for the
    /// file (e.g. pure rename, binary diff).
    pub fn should_skip(&self, filename: &str, has_patch: bool) -> bool {
        if !has_patch {
            return true;
        }

        if let Some(ext) = filename.rsplit('.').next() {
            if filename.contains('.') && self.ignored_extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
                return true;
            }
        }

        let base = filename.rsplit('/').next().unwrap_or(filename);
        if self.ignored_files.iter().any(|f| f == base) {
            return true;
        }

        filename
            .split('/')
            .any(|segment| self.ignored_dirs.iter().any(|d| d == segment))
    }
}

/// Returns `true` when the only differences between `old` and `new` are
/// whitespace, pure comment edits, or trivially reordered imports — in
/// which case the file is skipped as semantic noise.
///
/// Fetch failures upstream are fail-open: callers should treat a missing
/// `old`/`new` pair as "proceed", not as "skip".
pub fn is_semantic_noise(old: &str, new: &str) -> bool {
    normalize_for_semantic_compare(old) == normalize_for_semantic_compare(new)
}

fn normalize_for_semantic_compare(text: &str) -> Vec<String> {
    let mut significant: Vec<String> = text
        .lines()
        .map(strip_line_comment)
        .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|l| !l.is_empty())
        .collect();

    // Imports/use statements are order-insensitive for this comparison;
    // every other line keeps its relative order.
    let mut import_block: Vec<String> = Vec::new();
    let mut rest: Vec<String> = Vec::new();
    for line in significant.drain(..) {
        if is_import_line(&line) {
            import_block.push(line);
        } else {
            rest.push(line);
        }
    }
    import_block.sort();

    let mut out = import_block;
    out.extend(rest);
    out
}

fn is_import_line(line: &str) -> bool {
    line.starts_with("import ")
        || line.starts_with("from ")
        || line.starts_with("use ")
        || line.starts_with("require(")
}

/// Strips a trailing `#`/`//` line comment. Does not attempt to understand
/// string literals containing comment markers; good enough for a
/// comment-only-edit heuristic, not a full lexer.
fn strip_line_comment(line: &str) -> &str {
    if let Some(idx) = line.find("//") {
        return &line[..idx];
    }
    if let Some(idx) = line.find('#') {
        return &line[..idx];
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_ignored_extension_case_insensitive() {
        let f = RelevancyFilter::default();
        assert!(f.should_skip("package.JSON", true));
        assert!(f.should_skip("notes.md", true));
    }

    #[test]
    fn skips_ignored_exact_filename() {
        let f = RelevancyFilter::default();
        assert!(f.should_skip(".gitignore", true));
        assert!(f.should_skip("backend/.env", true));
    }

    #[test]
    fn skips_ignored_directory_component() {
        let f = RelevancyFilter::default();
        assert!(f.should_skip("src/tests/test_app.py", true));
        assert!(f.should_skip("node_modules/left-pad/index.js", true));
    }

    #[test]
    fn keeps_relevant_source_file() {
        let f = RelevancyFilter::default();
        assert!(!f.should_skip("app.py", true));
    }

    #[test]
    fn skips_files_without_a_patch() {
        let f = RelevancyFilter::default();
        assert!(f.should_skip("app.py", false));
    }

    #[test]
    fn filter_is_idempotent() {
        let f = RelevancyFilter::default();
        let files = ["app.py", "package-lock.json", "src/tests/foo.py", ".env"];
        let first: Vec<bool> = files.iter().map(|f2| f.should_skip(f2, true)).collect();
        let second: Vec<bool> = files.iter().map(|f2| f.should_skip(f2, true)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn whitespace_only_change_is_noise() {
        let old = "def f():\n    return 1\n";
        let new = "def f():\n  return 1\n";
        assert!(is_semantic_noise(old, new));
    }

    #[test]
    fn comment_only_change_is_noise() {
        let old = "x = 1  # original note\n";
        let new = "x = 1  # updated note\n";
        assert!(is_semantic_noise(old, new));
    }

    #[test]
    fn reordered_imports_are_noise() {
        let old = "import os\nimport sys\nprint(os.getcwd())\n";
        let new = "import sys\nimport os\nprint(os.getcwd())\n";
        assert!(is_semantic_noise(old, new));
    }

    #[test]
    fn real_logic_change_is_not_noise() {
        let old = "def f():\n    return 1\n";
        let new = "def f():\n    return 2\n";
        assert!(!is_semantic_noise(old, new));
    }
}
