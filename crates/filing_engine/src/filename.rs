use std::fmt::Write;

use sha2::{Digest, Sha256};

const MAX_STEM_CHARS: usize = 120;
const FALLBACK_STEM: &str = "report";

/// Deterministic file name for a downloaded report:
/// `{sanitized_title}--{short_hash(url)}.{extension}`.
///
/// Filings often share a title, so the hash of the download URL (which
/// carries the bulletin id) keeps them apart while a repeated download of
/// the same report still lands on the same file.
pub fn report_filename(title: &str, url: &str, extension: &str) -> String {
    format!("{}--{}.{extension}", sanitize_title(title), short_hash(url))
}

/// Replaces characters that are not allowed in Windows file names with
/// spaces, collapses whitespace and caps the length.
pub fn sanitize_title(input: &str) -> String {
    let replaced: String = input
        .chars()
        .map(|c| if is_forbidden(c) { ' ' } else { c })
        .collect();
    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut stem: String = collapsed.chars().take(MAX_STEM_CHARS).collect();
    stem = stem.trim_end_matches([' ', '.']).to_string();
    if stem.is_empty() {
        return FALLBACK_STEM.to_string();
    }
    if is_reserved_windows_name(&stem) {
        stem.push('_');
    }
    stem
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
