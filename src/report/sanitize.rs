//! Markup-to-plain-text cleanup for question bodies and review comments

/// Tag rewrites applied after entity decoding, in order
const TAG_REWRITES: [(&str, &str); 5] = [
    ("<br>", "\n"),
    ("<br/>", "\n"),
    ("<br />", "\n"),
    ("</p>", "\n"),
    ("<p>", ""),
];

/// Convert markup-bearing text to plain text with normalized line breaks.
///
/// The cleanup pass is repeated until it no longer changes the text, so
/// doubly-escaped markup is fully removed and `sanitize` is idempotent. Every
/// pass either shortens the text or leaves it untouched, which bounds the loop.
pub fn sanitize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut current = sanitize_pass(text);
    loop {
        let next = sanitize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Sanitize and fold onto a single line, for headings
pub fn single_line(text: &str) -> String {
    sanitize(text.trim()).replace('\n', " ")
}

fn sanitize_pass(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut decoded = html_escape::decode_html_entities(text).into_owned();
    for (tag, replacement) in TAG_REWRITES {
        decoded = decoded.replace(tag, replacement);
    }

    let stripped = strip_tags(&decoded);

    let mut lines: Vec<&str> = Vec::new();
    let mut prev_blank = false;
    for line in stripped.split('\n') {
        let line = line.trim_end();
        let blank = line.is_empty();
        if blank && prev_blank {
            continue;
        }
        lines.push(line);
        prev_blank = blank;
    }

    lines.join("\n").trim().to_string()
}

/// Drop `<...>` spans. The first `>` closes a tag; angle brackets never survive.
fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
