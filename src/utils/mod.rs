//! Utility functions that are shared by the readers and writers
pub mod errors;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

/// Number of amino acids per line of a `/translation` qualifier
pub const TRANSLATION_LINE_WIDTH: usize = 60;

/// Column at which GenBank qualifiers start (zero-based)
pub const QUALIFIER_INDENT: usize = 21;

/// Opens a file for buffered line reading
///
/// Files ending in `.gz` are decompressed on the fly.
pub fn open_reader<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>, std::io::Error> {
    let path = path.as_ref();
    let file = File::open(path)?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Returns true if the path has a `.gz` extension
pub fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

/// Wraps a protein sequence for the `/translation` qualifier
///
/// Every line holds at most 60 amino acids, continuation lines are
/// prefixed with the 21 spaces of the GenBank qualifier column.
///
/// # Examples
/// ```rust
/// use gbconvert::utils::wrap_translation;
///
/// let protein = "M".repeat(70);
/// let wrapped = wrap_translation(&protein);
/// let lines: Vec<&str> = wrapped.split('\n').collect();
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[0].len(), 60);
/// assert_eq!(lines[1], format!("{}{}", " ".repeat(21), "M".repeat(10)));
/// ```
pub fn wrap_translation(protein: &str) -> String {
    let indent = " ".repeat(QUALIFIER_INDENT);
    protein
        .as_bytes()
        .chunks(TRANSLATION_LINE_WIDTH)
        // the protein is ASCII, so every chunk is valid UTF-8
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<String>>()
        .join(&format!("\n{}", indent))
}

/// Splits text into lines of at most `max_chars` characters
///
/// Lines are broken at spaces whenever possible, words that are longer
/// than `max_chars` are split hard.
pub fn wrap_text(input: &str, max_chars: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for token in input.split(' ') {
        let next_len = if current.is_empty() {
            token.chars().count()
        } else {
            current.chars().count() + 1 + token.chars().count()
        };
        if next_len <= max_chars {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(token);
            continue;
        }
        if !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
        let mut chars: Vec<char> = token.chars().collect();
        while chars.len() > max_chars {
            let rest = chars.split_off(max_chars);
            out.push(chars.into_iter().collect());
            chars = rest;
        }
        current = chars.into_iter().collect();
    }
    if !current.is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}
