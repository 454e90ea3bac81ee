//! # ttcrc — batman-adv global translation table checksum auditor
//!
//! Every originator in a batman-adv mesh announces, per VLAN, a CRC32-C
//! summary of the clients it serves. Other nodes keep a copy of those
//! clients in their global translation table (TT) and compare checksums to
//! detect that they fell out of sync. This crate reads the textual dump of
//! a node's global TT, recomputes the checksum each originator should have
//! announced, and reports where it differs from the one recorded.
//!
//! ## Pipeline
//!
//! - [`parser`]: dump lines to [`TtEntry`] (PEST grammar in `grammar.pest`)
//! - [`flags`]: the `[RWIT]` flag column
//! - [`checksum`]: 9-byte entry image and its CRC32-C
//! - [`group`]: XOR-fold per (originator, vid)
//! - [`report`]: compare and print
//!
//! ## Example
//!
//! ```
//! use ttcrc::{audit, parse_dump, GroupTable};
//!
//! let dump = "   33:33:00:00:00:01   -1 [.W..] (  4) 5e:1c:3b:6c:a1:3b (  4) (0x7828981f)\n";
//! let table = GroupTable::build(parse_dump(dump).unwrap());
//! let results = audit(&table);
//! assert!(results[0].is_ok());
//! ```

pub mod checksum;
pub mod entry;
pub mod error;
pub mod flags;
pub mod group;
pub mod parser;
pub mod report;

pub use checksum::{crc32c, encode_vid, entry_crc, serialize_entry};
pub use entry::{GroupKey, MacAddr, TtEntry, VID_UNTAGGED};
pub use error::{AuditError, FlagError};
pub use flags::TtFlags;
pub use group::{fold_entries, Group, GroupChecksum, GroupTable};
pub use parser::{parse_dump, parse_dump_file, parse_record};
pub use report::{audit, write_report, GroupResult, ReportOptions, Summary};
