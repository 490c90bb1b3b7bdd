//! CSV tokenizer with encoding and delimiter auto-detection.
//!
//! Turns file bytes into raw rows. No header interpretation happens here:
//! every line, including the first, comes back as a plain row of text
//! cells. Blank lines are skipped and rows may have differing widths.

use csv::ReaderBuilder;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::normalize::RawRow;

/// Delimiters tried by [`detect_delimiter`], in tie-break order.
pub const CANDIDATE_DELIMITERS: [char; 4] = [',', ';', '\t', '|'];

/// Output of the tokenizer with detection metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Tokenized {
    /// Rows in file order
    pub rows: Vec<RawRow>,
    /// Detected encoding
    pub encoding: String,
    /// Detected or requested delimiter
    pub delimiter: char,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding.
///
/// Unknown encodings fall back to lossy UTF-8. A leading UTF-8 BOM is
/// removed.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let decoded = match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.into_owned()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    };

    match decoded.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => decoded,
    }
}

/// Detect the delimiter by counting occurrences in the first non-blank line.
///
/// Falls back to `,` when no candidate occurs.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content
        .lines()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("");

    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &CANDIDATE_DELIMITERS {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Tokenize decoded text with an explicit delimiter.
///
/// Rows whose every cell is empty are skipped, matching a line made only
/// of delimiters.
pub fn tokenize_str(content: &str, delimiter: char) -> CsvResult<Vec<RawRow>> {
    if content.contains('\0') {
        return Err(CsvError::TokenizerFailure);
    }

    let delimiter = u8::try_from(delimiter)
        .map_err(|_| CsvError::ParseFailed(format!("unsupported delimiter '{}'", delimiter)))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(rows)
}

/// Tokenize bytes with auto-detection of encoding and, unless given,
/// delimiter.
pub fn tokenize_bytes(bytes: &[u8], delimiter: Option<char>) -> CsvResult<Tokenized> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&content));
    let rows = tokenize_str(&content, delimiter)?;

    Ok(Tokenized {
        rows,
        encoding,
        delimiter,
    })
}

/// Tokenize a file on disk.
pub fn tokenize_file<P: AsRef<Path>>(path: P, delimiter: Option<char>) -> CsvResult<Tokenized> {
    let bytes = std::fs::read(path.as_ref())?;
    tokenize_bytes(&bytes, delimiter)
}

/// Render a delimiter for display (`\t` for tabs).
pub fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}
