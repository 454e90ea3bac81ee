//! TT client flags as shown in the 4-character `[RWIT]` column of the global table.
//!
//! Only the four flags visible in that column are modelled. Bit values match
//! the batman-adv `BATADV_TT_CLIENT_*` constants so the synchronized subset
//! can be copied into the checksum byte unchanged.

use crate::error::FlagError;
use std::fmt;
use std::ops::BitOr;

/// Placeholder for an unset position.
pub const UNSET: char = '.';

/// Flag bitmask of a translation table entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TtFlags(u16);

/// (display letter, flag) per column position.
const COLUMNS: [(char, TtFlags); 4] = [
    ('R', TtFlags::ROAM),
    ('W', TtFlags::WIFI),
    ('I', TtFlags::ISOLATION),
    ('T', TtFlags::TEMP),
];

impl TtFlags {
    pub const ROAM: TtFlags = TtFlags(1 << 1);
    pub const WIFI: TtFlags = TtFlags(1 << 4);
    pub const ISOLATION: TtFlags = TtFlags(1 << 5);
    pub const TEMP: TtFlags = TtFlags(1 << 11);

    /// Flags kept in sync among nodes and covered by the checksum.
    pub const SYNC_MASK: TtFlags = TtFlags(Self::WIFI.0 | Self::ISOLATION.0);
    /// Entries carrying any of these are left out of the checksum.
    pub const NO_CRC_MASK: TtFlags = TtFlags(Self::ROAM.0 | Self::TEMP.0);

    const ALL: u16 = Self::ROAM.0 | Self::WIFI.0 | Self::ISOLATION.0 | Self::TEMP.0;

    pub const fn empty() -> Self {
        TtFlags(0)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Keeps only the bits this model knows about.
    pub const fn from_bits_truncate(bits: u16) -> Self {
        TtFlags(bits & Self::ALL)
    }

    pub const fn contains(self, other: TtFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: TtFlags) -> bool {
        self.0 & other.0 != 0
    }

    /// Roaming or temporary clients never contribute to the checksum.
    pub const fn is_excluded(self) -> bool {
        self.intersects(Self::NO_CRC_MASK)
    }

    /// The byte fed to the checksum: flags restricted to [`Self::SYNC_MASK`].
    pub const fn synced(self) -> u8 {
        (self.0 & Self::SYNC_MASK.0) as u8
    }

    /// Decode a flag column such as `.W..` or `RW.T`.
    pub fn from_field(field: &str) -> Result<Self, FlagError> {
        let count = field.chars().count();
        if count != COLUMNS.len() {
            return Err(FlagError::Length(count));
        }
        let mut flags = TtFlags::empty();
        for (position, (c, (letter, flag))) in field.chars().zip(COLUMNS).enumerate() {
            if c == letter {
                flags = flags | flag;
            } else if c != UNSET {
                return Err(FlagError::Character {
                    position,
                    found: c,
                    expected: letter,
                });
            }
        }
        Ok(flags)
    }

    /// Inverse of [`Self::from_field`].
    pub fn to_field(self) -> String {
        COLUMNS
            .iter()
            .map(|&(letter, flag)| if self.contains(flag) { letter } else { UNSET })
            .collect()
    }
}

impl BitOr for TtFlags {
    type Output = TtFlags;

    fn bitor(self, rhs: TtFlags) -> TtFlags {
        TtFlags(self.0 | rhs.0)
    }
}

impl fmt::Display for TtFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_field())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_each_position() {
        assert_eq!(TtFlags::from_field("....").unwrap(), TtFlags::empty());
        assert_eq!(TtFlags::from_field("R...").unwrap(), TtFlags::ROAM);
        assert_eq!(TtFlags::from_field(".W..").unwrap(), TtFlags::WIFI);
        assert_eq!(TtFlags::from_field("..I.").unwrap(), TtFlags::ISOLATION);
        assert_eq!(TtFlags::from_field("...T").unwrap(), TtFlags::TEMP);
    }

    #[test]
    fn round_trip_all_sixteen_masks() {
        for bits in 0u8..16 {
            let field: String = "RWIT"
                .chars()
                .enumerate()
                .map(|(i, c)| if bits & (1 << i) != 0 { c } else { '.' })
                .collect();
            let flags = TtFlags::from_field(&field).unwrap();
            assert_eq!(flags.to_field(), field);
            assert_eq!(TtFlags::from_field(&flags.to_field()).unwrap(), flags);
        }
    }

    #[test]
    fn letter_in_wrong_position_is_rejected() {
        let err = TtFlags::from_field("W...").unwrap_err();
        assert_eq!(
            err,
            FlagError::Character {
                position: 0,
                found: 'W',
                expected: 'R'
            }
        );
        assert!(TtFlags::from_field("..x.").is_err());
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert_eq!(TtFlags::from_field(".W."), Err(FlagError::Length(3)));
        assert_eq!(TtFlags::from_field(".W..."), Err(FlagError::Length(5)));
    }

    #[test]
    fn synced_byte_keeps_wifi_and_isolation_only() {
        let all = TtFlags::from_field("RWIT").unwrap();
        assert_eq!(all.synced(), 0x30);
        assert_eq!(TtFlags::WIFI.synced(), 0x10);
        assert_eq!((TtFlags::ROAM | TtFlags::TEMP).synced(), 0);
    }

    #[test]
    fn exclusion() {
        assert!(TtFlags::ROAM.is_excluded());
        assert!(TtFlags::TEMP.is_excluded());
        assert!(!(TtFlags::WIFI | TtFlags::ISOLATION).is_excluded());
    }

    #[test]
    fn truncate_drops_unknown_bits() {
        assert_eq!(TtFlags::from_bits_truncate(0xffff).to_field(), "RWIT");
        assert_eq!(TtFlags::from_bits_truncate(1 << 8), TtFlags::empty());
    }
}
