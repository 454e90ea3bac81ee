//! Parse global translation table dump lines into [`TtEntry`] using PEST.

use crate::entry::{MacAddr, TtEntry, VID_UNTAGGED};
use crate::error::AuditError;
use crate::flags::TtFlags;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser as PestParser;
use std::path::Path;
use tracing::debug;

#[derive(PestParser)]
#[grammar = "grammar.pest"]
struct RecordParser;

/// Parse a single dump line. Errors report it as line 1.
pub fn parse_record(line: &str) -> Result<TtEntry, AuditError> {
    parse_record_at(1, line)
}

/// Parse a single dump line, attaching `line_no` to any error.
pub fn parse_record_at(line_no: usize, line: &str) -> Result<TtEntry, AuditError> {
    let malformed = |reason: String| AuditError::MalformedRecord {
        line: line_no,
        reason,
    };
    let pairs = RecordParser::parse(Rule::record, line).map_err(|e| {
        let col = match e.line_col {
            pest::error::LineColLocation::Pos((_, c)) => c,
            pest::error::LineColLocation::Span((_, c), _) => c,
        };
        malformed(format!("column {}: {}", col, e.variant.message()))
    })?;
    let record = pairs
        .into_iter()
        .next()
        .ok_or_else(|| malformed("empty parse".to_string()))?;
    build_entry(line_no, record)
}

fn build_entry(line_no: usize, record: Pair<Rule>) -> Result<TtEntry, AuditError> {
    let mut client = None;
    let mut vid = None;
    let mut flags = None;
    let mut originator = None;
    let mut reported_crc = None;

    for inner in record.into_inner() {
        match inner.as_rule() {
            Rule::client => client = Some(build_mac(line_no, inner)?),
            Rule::originator => originator = Some(build_mac(line_no, inner)?),
            Rule::vid => vid = Some(build_vid(line_no, inner.as_str())?),
            Rule::flags => {
                let field = inner.as_str();
                flags = Some(TtFlags::from_field(field).map_err(|source| {
                    AuditError::InvalidFlagField {
                        line: line_no,
                        field: field.to_string(),
                        source,
                    }
                })?);
            }
            Rule::crc => {
                reported_crc = Some(u32::from_str_radix(inner.as_str(), 16).map_err(|e| {
                    AuditError::MalformedRecord {
                        line: line_no,
                        reason: format!("crc {:?}: {}", inner.as_str(), e),
                    }
                })?)
            }
            // marker and ttvn fields are not covered by the checksum
            _ => {}
        }
    }

    let missing = |what: &str| AuditError::MalformedRecord {
        line: line_no,
        reason: format!("missing {}", what),
    };
    let entry = TtEntry {
        client: client.ok_or_else(|| missing("client"))?,
        vid: vid.ok_or_else(|| missing("vid"))?,
        flags: flags.ok_or_else(|| missing("flags"))?,
        originator: originator.ok_or_else(|| missing("originator"))?,
        reported_crc: reported_crc.ok_or_else(|| missing("crc"))?,
    };
    debug!(
        line = line_no,
        client = %entry.client,
        vid = entry.vid,
        flags = %entry.flags,
        originator = %entry.originator,
        "parsed entry"
    );
    Ok(entry)
}

fn build_mac(line_no: usize, pair: Pair<Rule>) -> Result<MacAddr, AuditError> {
    pair.as_str()
        .parse()
        .map_err(|e: crate::entry::MacParseError| AuditError::MalformedRecord {
            line: line_no,
            reason: e.to_string(),
        })
}

fn build_vid(line_no: usize, text: &str) -> Result<i16, AuditError> {
    let invalid = || AuditError::InvalidVid {
        line: line_no,
        value: text.to_string(),
    };
    let vid: i16 = text.parse().map_err(|_| invalid())?;
    if vid < VID_UNTAGGED {
        return Err(invalid());
    }
    Ok(vid)
}

/// Parse a whole dump. Blank lines are skipped; the first bad line aborts.
pub fn parse_dump(text: &str) -> Result<Vec<TtEntry>, AuditError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_record_at(i + 1, line))
        .collect()
}

/// Read and parse a dump file.
pub fn parse_dump_file(path: &Path) -> Result<Vec<TtEntry>, AuditError> {
    let text = std::fs::read_to_string(path).map_err(|source| AuditError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_dump(&text)
}
