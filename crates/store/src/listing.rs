//! Extracts generated component text from numbered COBOL compiler
//! listings. The generator brackets its output with `* +---` / `* ---`
//! comment markers; everything in between is the component body, carrying
//! a line number and `*` sigil per line that must be stripped.

use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

static REGION_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+\s*\*\s*\+-+").expect("region open regex"));
static REGION_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+\s*\*\s*--+").expect("region close regex"));
static LINE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+\s*\*\s*").expect("line prefix regex"));
static TIMESTAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{2}/\d{2}/\d{4}\s+\d{2}:\d{2}").expect("timestamp regex"));
static COMPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[<>]=?").expect("comparator regex"));

/// Clean raw listing lines: keep only the marker-bracketed regions, strip
/// the line-number prefix and the generation timestamp, and drop the
/// comparison operators the listing escapes.
pub fn clean_listing_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    // First pass: collect the marker-bracketed regions, markers included.
    let mut region = Vec::new();
    let mut in_region = false;
    for line in lines {
        if REGION_OPEN.is_match(line) {
            in_region = true;
        }
        if in_region {
            region.push(line);
        }
        if REGION_CLOSE.is_match(line) {
            in_region = false;
        }
    }

    // Second pass: strip the per-line prefixes, drop the close markers.
    let mut cleaned = Vec::new();
    for (i, line) in region.iter().enumerate() {
        let stripped = if i == 0 {
            let no_marker = REGION_OPEN.replace(line, "");
            TIMESTAMP.replace(&no_marker, "").into_owned()
        } else if REGION_CLOSE.is_match(line) {
            continue;
        } else {
            let no_prefix = LINE_PREFIX.replace(line, "");
            COMPARATOR.replace_all(&no_prefix, "").into_owned()
        };
        cleaned.push(stripped.trim_end().to_string());
    }
    cleaned
}

/// Clean a listing file and write the result as `<stem>_cleaned.txt`
/// inside `output_dir`. Returns the path of the written file.
pub fn clean_listing(input: &Path, output_dir: &Path) -> Result<PathBuf> {
    let raw = fs::read_to_string(input)?;
    let cleaned = clean_listing_lines(raw.lines());

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("listing");
    fs::create_dir_all(output_dir)?;
    let out_path = output_dir.join(format!("{stem}_cleaned.txt"));
    fs::write(&out_path, cleaned.join("\n"))?;

    log::info!("Cleaned listing {} -> {}", input.display(), out_path.display());
    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_only_marked_region() {
        let listing = [
            "000100 IDENTIFICATION DIVISION.",
            "000200 * +------- 01/02/2024 13:45",
            "000300 *     MOVE A TO B",
            "000400 *         IF X >= Y",
            "000500 * -------",
            "000600 PROCEDURE DIVISION.",
        ];
        let cleaned = clean_listing_lines(listing);
        assert_eq!(
            cleaned,
            vec![
                "".to_string(),
                "MOVE A TO B".to_string(),
                "IF X  Y".to_string(),
            ]
        );
    }

    #[test]
    fn handles_multiple_regions() {
        let listing = [
            "0001 * +--",
            "0002 * FIRST",
            "0003 * --",
            "0004 ignored",
            "0005 * SECOND OUTSIDE REGION",
        ];
        let cleaned = clean_listing_lines(listing);
        assert_eq!(cleaned, vec!["".to_string(), "FIRST".to_string()]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(clean_listing_lines([]).is_empty());
    }
}
