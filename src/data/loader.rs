use std::io::ErrorKind;
use std::path::Path;

use super::model::{NurseryDataset, NurseryRecord, AGE_GROUPS};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read and parse the nursery CSV at `path`.
///
/// Only the read can fail. Once the text is in hand, malformed rows are
/// dropped and never reported as errors.
pub fn load_file(path: &Path) -> Result<NurseryDataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::InvalidData {
            LoadError::Encoding {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let records = parse_csv(&text);
    log::info!(
        "Loaded {} nurseries from {}",
        records.len(),
        path.display()
    );
    Ok(NurseryDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// CSV parser
// ---------------------------------------------------------------------------

/// Column layout of the municipal availability file.
mod col {
    pub const DATE: usize = 0;
    pub const NAME: usize = 1;
    pub const TYPE: usize = 2;
    pub const AGE_GROUP: usize = 3;
    pub const AGE0: usize = 4;
    pub const EXTENDED_CARE: usize = 10;
    pub const LATITUDE: usize = 11;
    pub const LONGITUDE: usize = 12;
}

/// Parse the raw CSV text into validated records.
///
/// The first line is a header whose content is ignored; only its comma count
/// matters. Rows with fewer fields than the header, or without usable
/// coordinates, are skipped. Every data line consumes an id whether or not
/// it survives, so ids match the line position in the file.
pub fn parse_csv(text: &str) -> Vec<NurseryRecord> {
    let mut lines = text.trim().split('\n');
    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let header_len = header.split(',').count();

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (line_no, line) in (1u32..).zip(lines) {
        let fields = split_line(line);
        if fields.len() < header_len {
            log::debug!("Line {line_no}: {} fields, expected {header_len}; skipped", fields.len());
            skipped += 1;
            continue;
        }

        let record = record_from_fields(line_no, &fields);
        if !record.has_valid_coordinates() {
            log::debug!("Line {line_no}: missing coordinates; skipped");
            skipped += 1;
            continue;
        }
        records.push(record);
    }

    if skipped > 0 {
        log::info!("Skipped {skipped} rows without complete data");
    }
    records
}

/// Split one line on commas that are not inside double quotes.
///
/// Quote characters toggle the quoted state and are dropped from the output.
/// An unbalanced quote leaves the rest of the line quoted. Fields are trimmed.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

fn record_from_fields(id: u32, fields: &[String]) -> NurseryRecord {
    let text = |i: usize| fields.get(i).cloned().unwrap_or_default();
    let field = |i: usize| fields.get(i).map(String::as_str).unwrap_or("");

    let mut age_slots = [0u32; AGE_GROUPS];
    for (age, slot) in age_slots.iter_mut().enumerate() {
        *slot = parse_count(field(col::AGE0 + age));
    }

    NurseryRecord::new(
        id,
        text(col::DATE),
        text(col::NAME),
        text(col::TYPE),
        text(col::AGE_GROUP),
        age_slots,
        text(col::EXTENDED_CARE),
        parse_coordinate(field(col::LATITUDE)),
        parse_coordinate(field(col::LONGITUDE)),
    )
}

/// Leading decimal digits as a count. Anything else (empty, text, a minus
/// sign) is 0; overflow saturates.
fn parse_count(s: &str) -> u32 {
    let s = s.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if end == 0 {
        return 0;
    }
    s[..end].parse::<u32>().unwrap_or(u32::MAX)
}

/// Longest leading numeric prefix as a float, NaN when there is none.
fn parse_coordinate(s: &str) -> f64 {
    let s = s.trim_start();
    let end = s
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(s.len());
    let candidate = &s[..end];
    (1..=candidate.len())
        .rev()
        .find_map(|n| candidate[..n].parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "date,name,type,age_group,age0,age1,age2,age3,age4,age5,extended_care,lat,lng";

    fn csv(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn test_split_line_quoted_comma() {
        assert_eq!(split_line(r#"a,"b,c",d"#), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn test_split_line_trims_and_strips_quotes() {
        assert_eq!(split_line(r#"  a , "b" ,c"#), vec!["a", "b", "c"]);
        assert_eq!(split_line(r#"x""y,z"#), vec!["xy", "z"]);
    }

    #[test]
    fn test_split_line_unbalanced_quote_runs_to_end() {
        assert_eq!(split_line(r#"a,"b,c,d"#), vec!["a", "b,c,d"]);
    }

    #[test]
    fn test_parse_sample_row() {
        let records = parse_csv(&csv(&[
            "2025-06-01,Sample Nursery,Private,0-5,2,0,1,0,0,0,Yes,35.64,139.69",
        ]));
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id, 1);
        assert_eq!(r.name, "Sample Nursery");
        assert_eq!(r.facility_type, "Private");
        assert_eq!(r.age_group, "0-5");
        assert_eq!(r.age_slots, [2, 0, 1, 0, 0, 0]);
        assert_eq!(r.total_available(), 3);
        assert_eq!(r.extended_care, "Yes");
        assert_eq!(r.latitude, 35.64);
        assert_eq!(r.longitude, 139.69);
    }

    #[test]
    fn test_short_rows_skipped_without_shifting_ids() {
        let records = parse_csv(&csv(&[
            "2025-06-01,A,Public,0-5,1,1,1,1,1,1,,35.6,139.7",
            "2025-06-01,broken,Public",
            "",
            "2025-06-01,D,Public,0-5,0,0,0,0,0,0,,35.6,139.7",
        ]));
        let ids: Vec<u32> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_rows_without_coordinates_dropped() {
        let records = parse_csv(&csv(&[
            "2025-06-01,zero lat,Public,0-5,1,0,0,0,0,0,,0,139.7",
            "2025-06-01,empty lng,Public,0-5,1,0,0,0,0,0,,35.6,",
            "2025-06-01,text lat,Public,0-5,1,0,0,0,0,0,,n/a,139.7",
            "2025-06-01,ok,Public,0-5,1,2,3,4,5,6,,35.6,139.7",
        ]));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 4);
        assert_eq!(records[0].total_available(), 21);
    }

    #[test]
    fn test_quoted_name_with_comma() {
        let records = parse_csv(&csv(&[
            r#"2025-06-01,"Sakura, Annex",Certified,1-5,0,3,0,0,0,0,"7:00-20:00",35.63,139.69"#,
        ]));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Sakura, Annex");
        assert_eq!(records[0].extended_care, "7:00-20:00");
    }

    #[test]
    fn test_non_numeric_counts_default_to_zero() {
        let records = parse_csv(&csv(&[
            "2025-06-01,A,Public,0-5,-,abc,3人,,-2,4.7,,35.6,139.7",
        ]));
        assert_eq!(records[0].age_slots, [0, 0, 3, 0, 0, 4]);
        assert_eq!(records[0].total_available(), 7);
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = format!("{HEADER}\r\n2025-06-01,A,Public,0-5,1,0,0,0,0,0,,35.6,139.7\r\n");
        let records = parse_csv(&text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].longitude, 139.7);
    }

    #[test]
    fn test_header_only_and_empty_input() {
        assert!(parse_csv(HEADER).is_empty());
        assert!(parse_csv("").is_empty());
    }

    #[test]
    fn test_numeric_prefix_parsing() {
        assert_eq!(parse_count("12"), 12);
        assert_eq!(parse_count("99999999999"), u32::MAX);
        assert_eq!(parse_coordinate("35.6abc"), 35.6);
        assert_eq!(parse_coordinate("1e"), 1.0);
        assert!(parse_coordinate("").is_nan());
        assert!(parse_coordinate("north").is_nan());
    }

    #[test]
    fn test_load_missing_file_is_fatal() {
        let err = load_file(Path::new("/nonexistent/nursery.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }
}
