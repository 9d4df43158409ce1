//! TUI module for tess
//!
//! Provides the interactive part of an export:
//! - Picking a direct report and one of their review cycles
//! - Showing progress while data is fetched and the report is built

mod app;
mod views;
mod widgets;

pub use app::Tui;

/// Ellipsize text to fit within max_chars
pub fn ellipsize(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else if max_chars == 0 {
        String::new()
    } else {
        let take = max_chars.saturating_sub(1);
        let mut result = value.chars().take(take).collect::<String>();
        result.push('…');
        result
    }
}

/// Print finished step labels once the terminal is back to normal
pub fn print_completed(labels: &[String]) {
    for label in labels {
        eprintln!("✓ {}", label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipsize() {
        assert_eq!(ellipsize("short", 10), "short");
        assert_eq!(ellipsize("Quarterly Review", 8), "Quarter…");
        assert_eq!(ellipsize("anything", 0), "");
    }
}
