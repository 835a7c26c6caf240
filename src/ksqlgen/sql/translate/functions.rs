//! Method-name and aggregate-function mapping tables.
//!
//! Host method names are resolved here to their SQL function names. The
//! HAVING allow-list is a separate, case-insensitive membership check:
//! HAVING predicates may only reference aggregate functions, and the set of
//! accepted names is fixed.

/// SQL function for a host scalar method (string functions), if mapped.
pub fn scalar_function(method: &str) -> Option<&'static str> {
    match method {
        "ToUpper" => Some("UCASE"),
        "ToLower" => Some("LCASE"),
        "Trim" => Some("TRIM"),
        "Substring" => Some("SUBSTRING"),
        "Replace" => Some("REPLACE"),
        "Length" => Some("LEN"),
        "Concat" => Some("CONCAT"),
        _ => None,
    }
}

/// SQL aggregate function for a host aggregate accessor, if mapped.
///
/// Accepts the host method name exactly, or the SQL name itself in any
/// case, so trees built directly against SQL names resolve too.
pub fn aggregate_function(method: &str) -> Option<&'static str> {
    match method {
        "Count" | "LongCount" => return Some("COUNT"),
        "Sum" => return Some("SUM"),
        "Min" => return Some("MIN"),
        "Max" => return Some("MAX"),
        "Average" => return Some("AVG"),
        "EarliestByOffset" => return Some("EARLIEST_BY_OFFSET"),
        "LatestByOffset" => return Some("LATEST_BY_OFFSET"),
        "CollectSet" => return Some("COLLECT_SET"),
        "CollectList" => return Some("COLLECT_LIST"),
        _ => {}
    }
    const SQL_NAMES: &[&str] = &[
        "COUNT",
        "SUM",
        "MIN",
        "MAX",
        "AVG",
        "EARLIEST_BY_OFFSET",
        "LATEST_BY_OFFSET",
        "COLLECT_SET",
        "COLLECT_LIST",
    ];
    SQL_NAMES
        .iter()
        .find(|n| n.eq_ignore_ascii_case(method))
        .copied()
}

/// Window-boundary accessor names, rendered without parentheses.
pub fn window_bound(name: &str) -> Option<&'static str> {
    match name {
        "WindowStart" | "WINDOWSTART" => Some("WINDOWSTART"),
        "WindowEnd" | "WINDOWEND" => Some("WINDOWEND"),
        _ => None,
    }
}

/// Aggregate-function allow-list for HAVING predicates, case-insensitive.
///
/// Note the fixed membership: AVG and AVERAGE are both accepted, COUNT is
/// accepted, SUM is not. This mirrors the compatibility surface of the
/// original dialect client and is intentionally not widened.
pub fn is_aggregate_function(name: &str) -> bool {
    const ALLOWED: &[&str] = &[
        "MAX",
        "MIN",
        "AVG",
        "AVERAGE",
        "EARLIEST_BY_OFFSET",
        "LATEST_BY_OFFSET",
        "COLLECT_SET",
        "COUNT",
    ];
    ALLOWED.iter().any(|a| a.eq_ignore_ascii_case(name))
}
