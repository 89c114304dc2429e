//! Line-level parsing of the six-column input.
//!
//! Layout: `sequence, disease, param1, param2, param3, location`. The first
//! line is always dropped as a header. Quotes carry no meaning, so a comma
//! inside a field shifts every field after it.

use csv::{ReaderBuilder, StringRecord, Terminator, Trim};
use itertools::Itertools;
use log::{debug, warn};

use super::AggregateError;

pub const FIELD_COUNT: usize = 6;

const PARAM_FIELDS: [&str; 3] = ["param1", "param2", "param3"];

/// A well-formed data row.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    /// 1-based position among non-blank data lines; drives the `SEQ<n>` id.
    pub index: usize,
    pub sequence: String,
    pub disease: String,
    pub params: [f64; 3],
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRows {
    pub rows: Vec<CsvRow>,
    /// Non-blank data lines dropped for missing or empty fields.
    pub skipped: usize,
}

/// Parses every data line of `raw`.
///
/// Malformed rows are skipped with a warning. With `strict_numbers`, a
/// parameter that does not parse as a float fails the whole call; without
/// it the value becomes `NaN`.
pub fn parse_rows(raw: &str, strict_numbers: bool) -> Result<ParsedRows, AggregateError> {
    let body = match raw.split_once('\n') {
        Some((_header, rest)) => rest,
        None => return Ok(ParsedRows::default()),
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .terminator(Terminator::Any(b'\n'))
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let mut parsed = ParsedRows::default();
    let mut index = 0usize;

    for result in reader.records() {
        let record = result?;
        if is_blank(&record) {
            continue;
        }
        index += 1;

        // Record lines are counted within the body; +1 for the header.
        let line = record.position().map_or(0, |p| p.line() as usize + 1);

        match row_from_record(index, line, &record, strict_numbers)? {
            Some(row) => parsed.rows.push(row),
            None => {
                warn!(
                    "Skipping invalid row at line {}: {}",
                    line,
                    record.iter().join(",")
                );
                parsed.skipped += 1;
            }
        }
    }

    debug!(
        "Parsed {} rows ({} skipped)",
        parsed.rows.len(),
        parsed.skipped
    );
    Ok(parsed)
}

/// A whitespace-only line comes through as a single empty field.
fn is_blank(record: &StringRecord) -> bool {
    record.len() <= 1 && record.get(0).map_or(true, str::is_empty)
}

fn row_from_record(
    index: usize,
    line: usize,
    record: &StringRecord,
    strict_numbers: bool,
) -> Result<Option<CsvRow>, AggregateError> {
    let fields: Vec<&str> = record.iter().take(FIELD_COUNT).collect();
    if fields.len() < FIELD_COUNT || fields.iter().any(|f| f.is_empty()) {
        return Ok(None);
    }

    let mut params = [0.0f64; 3];
    for (slot, (name, raw)) in params
        .iter_mut()
        .zip(PARAM_FIELDS.iter().zip(&fields[2..5]))
    {
        *slot = parse_number(raw, line, *name, strict_numbers)?;
    }

    Ok(Some(CsvRow {
        index,
        sequence: fields[0].to_string(),
        disease: fields[1].to_string(),
        params,
        location: fields[5].to_string(),
    }))
}

fn parse_number(
    raw: &str,
    line: usize,
    field: &'static str,
    strict: bool,
) -> Result<f64, AggregateError> {
    match parse_float(raw) {
        Some(value) => Ok(value),
        None if strict => Err(AggregateError::InvalidNumber {
            line,
            field,
            value: raw.to_string(),
        }),
        None => {
            debug!("Non-numeric {} '{}' at line {}, using NaN", field, raw, line);
            Ok(f64::NAN)
        }
    }
}

/// Decimal and exponent forms plus the exact spellings `Infinity`,
/// `+Infinity` and `-Infinity`. Other words (`inf`, `nan`, ...) are not
/// numbers here even though `f64::from_str` takes them.
fn parse_float(raw: &str) -> Option<f64> {
    match raw {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    if raw
        .bytes()
        .any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E')
    {
        return None;
    }
    raw.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "DNA_Sequence,Disease,Param1,Param2,Param3,Location\n";

    fn parse(body: &str) -> ParsedRows {
        parse_rows(&format!("{}{}", HEADER, body), false).unwrap()
    }

    #[test]
    fn test_header_only_and_empty() {
        assert_eq!(parse_rows("", false).unwrap(), ParsedRows::default());
        assert_eq!(parse_rows(HEADER, false).unwrap(), ParsedRows::default());
        assert_eq!(
            parse_rows("no newline at all", false).unwrap(),
            ParsedRows::default()
        );
    }

    #[test]
    fn test_fields_are_trimmed() {
        let parsed = parse(" ATCG , Cancer , 0.5 ,2, 3.5 ,  Delhi \n");
        assert_eq!(parsed.rows.len(), 1);
        let row = &parsed.rows[0];
        assert_eq!(row.sequence, "ATCG");
        assert_eq!(row.disease, "Cancer");
        assert_eq!(row.params, [0.5, 2.0, 3.5]);
        assert_eq!(row.location, "Delhi");
    }

    #[test]
    fn test_blank_lines_do_not_consume_index() {
        let parsed = parse("\n   \nGCGC,Cancer,1,1,1,Delhi\n\nATAT,Other,1,1,1,Mumbai\n");
        let indices: Vec<usize> = parsed.rows.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2]);
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn test_malformed_rows_consume_index() {
        let parsed = parse("GCGC,Cancer,1,1,1\nATAT,Other,1,1,1,Mumbai\n,,,,,\n");
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].index, 2);
        assert_eq!(parsed.skipped, 2);
    }

    #[test]
    fn test_empty_field_skips_row() {
        let parsed = parse("GCGC,,1,1,1,Delhi\nGCGC,Cancer,1,1,1,   \n");
        assert!(parsed.rows.is_empty());
        assert_eq!(parsed.skipped, 2);
    }

    #[test]
    fn test_extra_fields_ignored() {
        let parsed = parse("GCGC,Cancer,1,2,3,Delhi,extra,more\n");
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].location, "Delhi");
    }

    #[test]
    fn test_quotes_are_literal() {
        let parsed = parse("GCGC,Cancer,1,2,3,\"New Delhi, India\"\n");
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].location, "\"New Delhi");
    }

    #[test]
    fn test_crlf_line_endings() {
        let raw = "h1,h2,h3,h4,h5,h6\r\nGCGC,Cancer,1,2,3,Delhi\r\n";
        let parsed = parse_rows(raw, false).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].location, "Delhi");
    }

    #[test]
    fn test_lone_carriage_return_stays_in_line() {
        let parsed = parse("GCGC,Cancer,1,2,3,Delhi\rATAT,Flu,1,2,3,Pune\nCCCC,Cancer,1,2,3,Goa\n");
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0].location, "Delhi\rATAT");
        assert_eq!(parsed.rows[1].index, 2);
        assert_eq!(parsed.rows[1].location, "Goa");
    }

    #[test]
    fn test_float_spellings() {
        assert_eq!(parse_float("1e3"), Some(1000.0));
        assert_eq!(parse_float("-2.5E-1"), Some(-0.25));
        assert_eq!(parse_float("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_float("-Infinity"), Some(f64::NEG_INFINITY));
        for word in ["inf", "-inf", "infinity", "INF", "nan", "NaN", "0x10"] {
            assert_eq!(parse_float(word), None, "{}", word);
        }
    }

    #[test]
    fn test_inf_word_becomes_nan() {
        let parsed = parse("GCGC,Cancer,inf,nan,Infinity,Delhi\n");
        let params = parsed.rows[0].params;
        assert!(params[0].is_nan());
        assert!(params[1].is_nan());
        assert_eq!(params[2], f64::INFINITY);
    }

    #[test]
    fn test_strict_rejects_inf_word() {
        let raw = format!("{}GCGC,Cancer,inf,2,3,Delhi\n", HEADER);
        assert!(matches!(
            parse_rows(&raw, true),
            Err(AggregateError::InvalidNumber { field: "param1", .. })
        ));
    }

    #[test]
    fn test_non_numeric_becomes_nan() {
        let parsed = parse("GCGC,Cancer,abc,2,3,Delhi\n");
        assert!(parsed.rows[0].params[0].is_nan());
        assert_eq!(parsed.rows[0].params[1], 2.0);
    }

    #[test]
    fn test_strict_rejects_non_numeric() {
        let raw = format!("{}GCGC,Cancer,1,oops,3,Delhi\n", HEADER);
        match parse_rows(&raw, true) {
            Err(AggregateError::InvalidNumber { line, field, value }) => {
                assert_eq!(line, 2);
                assert_eq!(field, "param2");
                assert_eq!(value, "oops");
            }
            other => panic!("expected InvalidNumber, got {:?}", other),
        }
    }
}
