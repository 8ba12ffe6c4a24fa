//! Field splitting and parsing helpers shared by the line parsers.

use std::path::Path;
use std::str::FromStr;

use crate::error::GenPlayError;
use crate::Position;

/// Get the *base* extension to help infer filetype, which ignores compression-related
/// extensions (`.gz` and `.bgz`).
pub fn get_base_extension<P: AsRef<Path>>(filepath: P) -> Option<String> {
    let path = filepath.as_ref();

    // get the filename and split by '.'
    let parts: Vec<&str> = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("")
        .split('.')
        .collect();

    let ignore_extensions = ["gz", "bgz"];

    let has_ignore_extension = parts
        .last()
        .map_or(false, |ext| ignore_extensions.contains(ext));

    if parts.len() > 2 && has_ignore_extension {
        // e.g. path/foo.bed.gz would return bed
        Some(parts[parts.len() - 2].to_string())
    } else if parts.len() > 1 {
        Some(parts[parts.len() - 1].to_string())
    } else {
        None
    }
}

/// Split a line on tabs only. Empty fields are kept.
pub fn split_tabs(line: &str) -> Vec<&str> {
    line.split('\t').collect()
}

/// Split a line on runs of tabs and spaces.
pub fn split_tabs_and_spaces(line: &str) -> Vec<&str> {
    line.split(|c| c == '\t' || c == ' ')
        .filter(|field| !field.is_empty())
        .collect()
}

/// Parse a field, rejecting the whole line if it does not parse.
pub fn parse_column<T: FromStr>(field: &str, line: &str) -> Result<T, GenPlayError> {
    field
        .trim()
        .parse::<T>()
        .map_err(|_| GenPlayError::MalformedLine(line.to_string()))
}

/// Parse a non-negative position field.
pub fn parse_position(field: &str, line: &str) -> Result<Position, GenPlayError> {
    parse_column::<Position>(field, line)
}

/// Parse a 1-based position field to a 0-based position.
pub fn parse_one_based(field: &str, line: &str) -> Result<Position, GenPlayError> {
    let position = parse_position(field, line)?;
    position
        .checked_sub(1)
        .ok_or_else(|| GenPlayError::MalformedLine(line.to_string()))
}

/// Parse an optional score: `.` means no score.
pub fn parse_optional_score(field: &str, line: &str) -> Result<Option<f64>, GenPlayError> {
    let field = field.trim();
    if field == "." || field.is_empty() {
        return Ok(None);
    }
    parse_column::<f64>(field, line).map(Some)
}

/// Parse a comma-separated list, e.g. BED12 block sizes. Empty tokens (such
/// as the customary trailing comma) are ignored.
pub fn parse_comma_list<T: FromStr>(field: &str, line: &str) -> Result<Vec<T>, GenPlayError> {
    field
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| parse_column::<T>(token, line))
        .collect()
}

/// Strip one pair of surrounding double quotes, if present.
pub fn unquote(value: &str) -> &str {
    let value = value.trim();
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Parse the `searchURL=` metadata header of BED and GdpGene files.
pub fn parse_search_url(line: &str) -> Option<String> {
    let line = line.trim();
    let prefix = "searchurl=";
    match line.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => {
            Some(unquote(&line[prefix.len()..]).to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_base_extension() {
        assert_eq!(get_base_extension("test.bed.gz").unwrap(), "bed");
        assert_eq!(get_base_extension("path/to/test.bed").unwrap(), "bed");
        assert_eq!(get_base_extension("test.gtf.bgz").unwrap(), "gtf");
        assert_eq!(get_base_extension("test"), None);
    }

    #[test]
    fn test_split() {
        assert_eq!(split_tabs("a\t\tb"), vec!["a", "", "b"]);
        assert_eq!(split_tabs_and_spaces("a \t b  c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_comma_list() {
        let values: Vec<Position> = parse_comma_list("5,5,", "line").unwrap();
        assert_eq!(values, vec![5, 5]);
        let values: Vec<Position> = parse_comma_list("", "line").unwrap();
        assert!(values.is_empty());
        assert!(parse_comma_list::<Position>("5,x", "line").is_err());
    }

    #[test]
    fn test_parse_positions() {
        assert_eq!(parse_position(" 12 ", "l").unwrap(), 12);
        assert!(parse_position("-1", "l").is_err());
        assert_eq!(parse_one_based("1", "l").unwrap(), 0);
        assert!(parse_one_based("0", "l").is_err());
    }

    #[test]
    fn test_optional_score() {
        assert_eq!(parse_optional_score(".", "l").unwrap(), None);
        assert_eq!(parse_optional_score("2.5", "l").unwrap(), Some(2.5));
        assert!(parse_optional_score("x", "l").is_err());
    }

    #[test]
    fn test_search_url() {
        assert_eq!(
            parse_search_url("searchURL=\"http://genome.ucsc.edu/?q=\""),
            Some("http://genome.ucsc.edu/?q=".to_string())
        );
        assert_eq!(parse_search_url("chr1\t0\t10"), None);
    }
}
