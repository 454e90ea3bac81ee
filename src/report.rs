//! Compare computed and reported checksums per group and format the report.
//!
//! One line per group:
//!
//! ```text
//! o: 5e:1c:3b:6c:a1:3b   -1 records: 3 ok 0xce93f3f0
//! o: 02:00:00:00:00:0a   -1 records: 1 fail 0x7828981f , 0xce93f3f0
//! ```

use crate::checksum::entry_crc;
use crate::entry::{GroupKey, TtEntry};
use crate::group::GroupTable;
use std::fmt;
use std::io::{self, Write};
use tracing::{info, warn};

/// Output toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Drop the `records: <n>` field.
    pub omit_count: bool,
    /// Only print groups whose checksum does not match.
    pub fail_only: bool,
    /// Print each entry's contribution below its group line.
    pub show_entries: bool,
}

/// Per-entry line of the breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryResult {
    pub entry: TtEntry,
    /// `None` when the entry is excluded.
    pub contribution: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupResult {
    pub key: GroupKey,
    pub computed_crc: u32,
    pub reported_crc: u32,
    pub included_count: usize,
    pub entries: Vec<EntryResult>,
}

impl GroupResult {
    pub fn is_ok(&self) -> bool {
        self.computed_crc == self.reported_crc
    }
}

/// Totals over a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub groups: usize,
    pub ok: usize,
    pub fail: usize,
}

impl Summary {
    pub fn from_results(results: &[GroupResult]) -> Self {
        let ok = results.iter().filter(|r| r.is_ok()).count();
        Summary {
            groups: results.len(),
            ok,
            fail: results.len() - ok,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "groups: {} ok: {} fail: {}", self.groups, self.ok, self.fail)
    }
}

/// Fold every group of the table.
pub fn audit(table: &GroupTable) -> Vec<GroupResult> {
    let results: Vec<GroupResult> = table
        .iter()
        .map(|group| {
            let key = group.key();
            if !group.reported_crc_consistent() {
                warn!(
                    originator = %key.originator,
                    vid = key.vid,
                    "entries disagree on the reported checksum, using the last one"
                );
            }
            let entries: Vec<EntryResult> = group
                .entries()
                .iter()
                .map(|&entry| EntryResult {
                    entry,
                    contribution: entry_crc(&entry),
                })
                .collect();
            let sum = group.checksum();
            GroupResult {
                key,
                computed_crc: sum.computed_crc,
                reported_crc: group.reported_crc(),
                included_count: sum.included_count,
                entries,
            }
        })
        .collect();
    let summary = Summary::from_results(&results);
    info!(groups = summary.groups, ok = summary.ok, fail = summary.fail, "audit done");
    results
}

/// The group's report line, without trailing newline.
pub fn format_group_line(result: &GroupResult, opts: &ReportOptions) -> String {
    let mut line = format!("o: {} {:>4}", result.key.originator, result.key.vid);
    if !opts.omit_count {
        line.push_str(&format!(" records: {}", result.included_count));
    }
    if result.is_ok() {
        line.push_str(&format!(" ok {:#010x}", result.computed_crc));
    } else {
        line.push_str(&format!(
            " fail {:#010x} , {:#010x}",
            result.computed_crc, result.reported_crc
        ));
    }
    line
}

fn format_entry_line(e: &EntryResult) -> String {
    let contribution = match e.contribution {
        Some(crc) => format!("{:#010x}", crc),
        None => "excluded".to_string(),
    };
    format!("    c: {} [{}] {}", e.entry.client, e.entry.flags, contribution)
}

/// Write the report and return its totals. Suppressed groups still count.
pub fn write_report(
    w: &mut dyn Write,
    results: &[GroupResult],
    opts: &ReportOptions,
) -> io::Result<Summary> {
    for result in results {
        if opts.fail_only && result.is_ok() {
            continue;
        }
        writeln!(w, "{}", format_group_line(result, opts))?;
        if opts.show_entries {
            for e in &result.entries {
                writeln!(w, "{}", format_entry_line(e))?;
            }
        }
    }
    Ok(Summary::from_results(results))
}
