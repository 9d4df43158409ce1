/// Extension of the rendered report
pub const REPORT_EXTENSION: &str = "md";

/// Stands in for the first name when the subject has no name
const FIRST_NAME_FALLBACK: &str = "user";

/// Filesystem-safe report name: `{first}_{last}_{cycle}.md`
pub fn output_file_name(subject: &str, cycle: &str) -> String {
    let parts: Vec<&str> = subject.split_whitespace().collect();
    let first = parts.first().copied().unwrap_or(FIRST_NAME_FALLBACK);
    let last = if parts.len() > 1 {
        parts[parts.len() - 1]
    } else {
        ""
    };

    format!(
        "{}_{}_{}.{}",
        slugify(first),
        slugify(last),
        slugify(cycle),
        REPORT_EXTENSION
    )
}

/// Lowercase ASCII letters and digits; separators become `_`, the rest is dropped
pub fn slugify(value: &str) -> String {
    let slug: String = value
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            'a'..='z' | '0'..='9' => Some(c),
            ' ' | '-' | '/' | '\\' => Some('_'),
            _ => None,
        })
        .collect();
    slug.trim_matches('_').to_string()
}
