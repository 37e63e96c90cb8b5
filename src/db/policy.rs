//! Read-only policy enforcement.
//!
//! Statement legality is judged by a syntactic prefix check against a fixed
//! allow-list, not by semantic analysis. A statement is either allowed or
//! denied before any execution attempt; nothing is rewritten.
//!
//! Note that the check is prefix-based: `CREATE TABLE t AS SELECT ...`
//! passes under the `CREATE` prefix even though it writes. Callers rely on
//! `CREATE` being permitted for schema-setup flows in read-only mode, so the
//! prefix semantics are load-bearing.

/// Statement prefixes permitted when the server runs in read-only mode.
pub const READ_ALLOWED_PREFIXES: [&str; 7] = [
    "SELECT", "SHOW", "DESC", "DESCRIBE", "USE", "CREATE", "EXPLAIN",
];

/// Decide whether a statement may execute under the given read-only mode.
///
/// When `read_only` is false every statement is allowed. When true, the
/// trimmed, uppercase-normalized statement must start with one of
/// [`READ_ALLOWED_PREFIXES`].
pub fn is_allowed(sql: &str, read_only: bool) -> bool {
    if !read_only {
        return true;
    }
    let normalized = sql.trim().to_uppercase();
    READ_ALLOWED_PREFIXES
        .iter()
        .any(|prefix| normalized.starts_with(prefix))
}
