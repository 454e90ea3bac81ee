//! Data model: hardware addresses and global translation table entries.

use crate::flags::TtFlags;
use std::fmt;
use std::str::FromStr;

/// VLAN id used by the debug interface for untagged clients.
pub const VID_UNTAGGED: i16 = -1;

/// 6-byte hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddr([u8; 6]);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hardware address {0:?}")]
pub struct MacParseError(pub String);

impl MacAddr {
    pub const fn new(octets: [u8; 6]) -> Self {
        MacAddr(octets)
    }

    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl FromStr for MacAddr {
    type Err = MacParseError;

    /// Parses `xx:xx:xx:xx:xx:xx` (either case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || MacParseError(s.to_string());
        let mut octets = [0u8; 6];
        let mut parts = s.split(':');
        for octet in octets.iter_mut() {
            let part = parts.next().ok_or_else(err)?;
            if part.len() != 2 {
                return Err(err());
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| err())?;
        }
        if parts.next().is_some() {
            return Err(err());
        }
        Ok(MacAddr(octets))
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}", a, b, c, d, e, g)
    }
}

/// One line of the global translation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtEntry {
    pub client: MacAddr,
    /// `-1` for untagged clients.
    pub vid: i16,
    pub flags: TtFlags,
    pub originator: MacAddr,
    /// Checksum the originator announced for this (originator, vid).
    pub reported_crc: u32,
}

impl TtEntry {
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            originator: self.originator,
            vid: self.vid,
        }
    }
}

/// Identifies the set of entries one announced checksum covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    pub originator: MacAddr,
    pub vid: i16,
}
