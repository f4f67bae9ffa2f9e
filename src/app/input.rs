//! Reading candidate records from line-oriented input.

use std::io::{self, BufRead};

use crate::record::CandidateRecord;

/// Parses one input line into a candidate record.
///
/// Blank lines and `#` comments are skipped. A line starting with `{` is read as
/// a JSON record, so output of a previous run can be fed back in; anything else
/// is taken as a bare hostname (lowercased, trailing dot removed).
///
/// Returns `None` for lines that carry no record, including malformed JSON.
pub fn parse_candidate_line(line: &str) -> Option<CandidateRecord> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    if trimmed.starts_with('{') {
        return match serde_json::from_str::<CandidateRecord>(trimmed) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Skipping malformed record line '{trimmed}': {e}");
                None
            }
        };
    }

    let host = trimmed.trim_end_matches('.').to_ascii_lowercase();
    if host.is_empty() {
        return None;
    }
    Some(CandidateRecord::new(host))
}

/// Reads every candidate record from `reader`, in order.
///
/// # Errors
///
/// Returns the underlying I/O error if a line cannot be read.
pub fn read_candidates<R: BufRead>(reader: R) -> io::Result<Vec<CandidateRecord>> {
    let mut records = Vec::new();
    for line in reader.lines() {
        if let Some(record) = parse_candidate_line(&line?) {
            records.push(record);
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert!(parse_candidate_line("").is_none());
        assert!(parse_candidate_line("   ").is_none());
        assert!(parse_candidate_line("# www.example.com").is_none());
        assert!(parse_candidate_line(".").is_none());
    }

    #[test]
    fn test_parse_bare_hostname_normalizes() {
        let record = parse_candidate_line("  WWW.Example.COM.  ").unwrap();
        assert_eq!(record, CandidateRecord::new("www.example.com"));
    }

    #[test]
    fn test_parse_json_record() {
        let record =
            parse_candidate_line(r#"{"subdomain":"a.example.com","ips":"1.2.3.4","valid":1}"#)
                .unwrap();
        assert_eq!(record, CandidateRecord::with_ips("a.example.com", "1.2.3.4"));
    }

    #[test]
    fn test_parse_malformed_json_is_skipped() {
        assert!(parse_candidate_line(r#"{"subdomain": "#).is_none());
    }

    #[test]
    fn test_read_candidates_keeps_order() {
        let input = "b.example.com\n\n# comment\na.example.com\n{\"subdomain\":\"c.example.com\"}\n";
        let records = read_candidates(Cursor::new(input)).unwrap();
        let names: Vec<_> = records.iter().map(|r| r.subdomain.as_str()).collect();
        assert_eq!(names, vec!["b.example.com", "a.example.com", "c.example.com"]);
    }
}
