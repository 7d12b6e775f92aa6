/// Strip a single trailing dot, if present.
///
/// This is the only normalization the checker applies: target matching is
/// otherwise exact and case-sensitive.
pub fn strip_root_dot(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Dot-separated labels of `name` after stripping one trailing dot.
///
/// Never returns an empty vec: splitting an empty string yields one empty
/// label, so callers can index the first label safely.
pub fn labels(name: &str) -> Vec<&str> {
    strip_root_dot(name).split('.').collect()
}
