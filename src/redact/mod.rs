//! In-place redaction of message text
//!
//! Redaction keeps the shape of a message (whitespace and punctuation) and
//! replaces every other character with a marker glyph.

use anyhow::{Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;

static REDACTABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\s\p{P}]").expect("redaction pattern is valid"));

/// Replace every non-whitespace, non-punctuation character with `marker`
pub fn redact_text(text: &str, marker: char) -> String {
    let mut buf = [0u8; 4];
    let marker: &str = marker.encode_utf8(&mut buf);
    REDACTABLE.replace_all(text, marker).into_owned()
}

/// Whether redacting `text` would change it
pub fn needs_redaction(text: &str, marker: char) -> bool {
    !text.is_empty() && redact_text(text, marker) != text
}

/// Parse a replacement character given as `U+2588`, `0x2588`, `9608`, or `█`
pub fn parse_replacement_char(input: &str) -> Result<char> {
    let input = input.trim();
    if input.is_empty() {
        bail!("replacement character is empty");
    }

    let mut chars = input.chars();
    let code_point = match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_ascii_digit() => c as u32,
        _ => parse_code_point(input)?,
    };

    let marker = char::from_u32(code_point)
        .ok_or_else(|| anyhow::anyhow!("U+{:04X} is not a valid Unicode scalar value", code_point))?;
    if marker.is_control() || marker.is_whitespace() {
        bail!(
            "U+{:04X} cannot be used as a replacement character (control or whitespace)",
            code_point
        );
    }
    Ok(marker)
}

fn parse_code_point(input: &str) -> Result<u32> {
    let hex = ["U+", "u+", "0x", "0X"]
        .iter()
        .find_map(|prefix| input.strip_prefix(prefix));

    let parsed = match hex {
        Some(digits) => u32::from_str_radix(digits, 16),
        None => input.parse::<u32>(),
    };
    parsed.map_err(|_| anyhow::anyhow!("invalid replacement character: {:?}", input))
}
