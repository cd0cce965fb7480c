//! Path equivalence.
//! Two spellings name the same directory when, once made absolute and stripped of
//! trailing separators, they are equal ignoring case.

use std::path::{Path, PathBuf};

/// Locale-invariant case folding (Unicode lowercase mapping, no locale tables).
pub(crate) fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

fn normalized(p: &Path) -> String {
    let abs: PathBuf = std::path::absolute(p).unwrap_or_else(|_| p.to_path_buf());
    let text = dunce::simplified(&abs).to_string_lossy().into_owned();
    fold_case(text.trim_end_matches(['/', '\\']))
}

/// True if `a` and `b` denote the same directory modulo trailing separators
/// and letter case. Purely lexical: links are not resolved.
pub fn same_path(a: impl AsRef<Path>, b: impl AsRef<Path>) -> bool {
    normalized(a.as_ref()) == normalized(b.as_ref())
}
