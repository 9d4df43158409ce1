/// Replacement for every visible character when censoring
pub const MASK_GLYPH: char = '▒';

/// Hide visible characters, keeping whitespace so layout is unchanged
pub fn mask(text: &str, censor: bool) -> String {
    if !censor {
        return text.to_string();
    }
    text.chars()
        .map(|c| if c.is_whitespace() { c } else { MASK_GLYPH })
        .collect()
}
