//! Integration tests for the read-only policy gate.
//!
//! These tests verify the allow/deny decision for statements under both
//! policy modes, including the deliberate prefix-check behavior.

use mariadb_mcp_server::db::policy::{READ_ALLOWED_PREFIXES, is_allowed};

/// Every statement whose first token is outside the allow-list is denied
/// under read-only mode.
#[test]
fn test_read_only_denies_non_allowlisted_statements() {
    let blocked = [
        "INSERT INTO t (a) VALUES (1)",
        "UPDATE t SET a = 2",
        "DELETE FROM t",
        "DROP TABLE t",
        "ALTER TABLE t ADD COLUMN b INT",
        "TRUNCATE TABLE t",
        "REPLACE INTO t VALUES (1)",
        "GRANT SELECT ON *.* TO 'x'",
        "SET GLOBAL max_connections = 1",
        "CALL cleanup()",
        "LOCK TABLES t WRITE",
    ];
    for sql in blocked {
        assert!(!is_allowed(sql, true), "{sql} should be denied");
    }
}

/// When read-only mode is disabled, no statement is ever blocked.
#[test]
fn test_writes_allowed_when_read_only_disabled() {
    let statements = [
        "INSERT INTO t (a) VALUES (1)",
        "DELETE FROM t",
        "DROP DATABASE prod",
        "SELECT 1",
        "whatever this is",
    ];
    for sql in statements {
        assert!(is_allowed(sql, false), "{sql} should be allowed");
    }
}

/// Each allow-list prefix admits a representative statement.
#[test]
fn test_allowlist_prefixes_admit_statements() {
    let samples = [
        "SELECT id FROM users",
        "SHOW DATABASES",
        "DESC users",
        "DESCRIBE users",
        "USE analytics",
        "CREATE DATABASE staging",
        "EXPLAIN SELECT 1",
    ];
    assert_eq!(samples.len(), READ_ALLOWED_PREFIXES.len());
    for sql in samples {
        assert!(is_allowed(sql, true), "{sql} should be allowed");
    }
}

/// The decision normalizes case and leading whitespace.
#[test]
fn test_decision_is_case_and_whitespace_insensitive() {
    assert!(is_allowed("\n  select 1", true));
    assert!(is_allowed("\t\tSHOW tables", true));
    assert!(!is_allowed("  insert into t values (1)", true));
    assert!(!is_allowed("Delete FROM t", true));
}

/// The gate is a prefix check, not semantic analysis: CREATE ... AS SELECT
/// passes even though it writes. This behavior is relied upon by schema
/// setup flows under read-only mode.
#[test]
fn test_create_as_select_passes_in_read_only_mode() {
    assert!(is_allowed(
        "CREATE TABLE archive AS SELECT * FROM events",
        true
    ));
}

/// The decision is binary; multi-statement text is judged by its first
/// prefix only.
#[test]
fn test_decision_judges_leading_prefix_only() {
    assert!(is_allowed("SELECT 1; DELETE FROM t", true));
    assert!(!is_allowed("DELETE FROM t; SELECT 1", true));
}
