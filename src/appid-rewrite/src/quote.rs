//! Quote handling for application id values.

/// Strip all leading and trailing single and double quote characters.
///
/// Idempotent; used when exporting the final value as a plain string.
pub fn strip_quotation_marks(value: &str) -> &str {
    value.trim_matches(|c| c == '"' || c == '\'')
}

/// Normalize a new application id into a double-quoted form.
///
/// A value that already starts and ends with `"` is used as-is. Otherwise at
/// most one stray leading and one stray trailing `"` is removed and the
/// result wrapped in double quotes. Single quotes are not treated as
/// delimiters here: a caller passing a single-quoted value ends up with that
/// value nested inside double quotes.
pub fn ensure_double_quoted(value: &str) -> String {
    if value.starts_with('"') && value.ends_with('"') {
        return value.to_string();
    }
    let stripped = value.strip_prefix('"').unwrap_or(value);
    let stripped = stripped.strip_suffix('"').unwrap_or(stripped);
    format!("\"{stripped}\"")
}
