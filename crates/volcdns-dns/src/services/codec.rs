//! TXT record value normalization
//!
//! Volcengine rejects double quotes inside TXT values, and may hand a value
//! back wrapped in quotes. `escape` is applied before writing; `unescape` is
//! only used to compare a stored value during cleanup. They are deliberately
//! not inverses: `escape` drops every quote, `unescape` only one surrounding
//! pair.

/// Normalize a value for writing to a TXT record
pub fn escape(value: &str) -> String {
    let mut v = value.trim();
    if v.starts_with("\"heritage=") {
        v = v.trim_matches('"');
    }
    v.replace('"', "")
}

/// Strip whitespace and one layer of surrounding quotes from a stored value
pub fn unescape(value: &str) -> String {
    let v = value.trim();
    let v = v.strip_prefix('"').unwrap_or(v);
    let v = v.strip_suffix('"').unwrap_or(v);
    v.to_string()
}

/// Whether a stored TXT value is the record written for `escaped`
pub fn stored_value_matches(stored: &str, escaped: &str) -> bool {
    stored == escaped || unescape(stored) == escaped
}
