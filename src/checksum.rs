//! Per-entry checksum contribution.
//!
//! An originator announces, per VLAN, the XOR of one CRC32-C per client it
//! serves. Each CRC covers a 9-byte image of the entry laid out exactly as
//! the node's own structures hold it:
//!
//! | offset | size | content                                            |
//! |--------|------|----------------------------------------------------|
//! | 0      | 2    | vid, network order, `0x8000` set for tagged VLANs  |
//! | 2      | 1    | flags & (WIFI \| ISOLATION)                        |
//! | 3      | 6    | client hardware address                            |
//!
//! Roaming and temporary entries are not part of the table the originator
//! checksums, so they yield no contribution at all.

use crate::entry::{TtEntry, VID_UNTAGGED};
use byteorder::{BigEndian, ByteOrder};
use crc::{Crc, CRC_32_ISCSI};
use tracing::trace;

/// Marks a vid as carrying a real VLAN tag.
pub const VLAN_HAS_TAG: u16 = 0x8000;

/// Length of the serialized entry image.
pub const ENTRY_IMAGE_LEN: usize = 9;

/// CRC-32C (Castagnoli), standard init and xor-out.
static CASTAGNOLI: Crc<u32> = Crc::<u32>::new(&CRC_32_ISCSI);

/// One-shot CRC-32C over `data`.
pub fn crc32c(data: &[u8]) -> u32 {
    CASTAGNOLI.checksum(data)
}

/// Canonical on-node encoding of a vid: untagged collapses to 0, anything
/// else is biased by [`VLAN_HAS_TAG`].
pub fn encode_vid(vid: i16) -> u16 {
    if vid == VID_UNTAGGED {
        0
    } else {
        (vid as u16).wrapping_add(VLAN_HAS_TAG)
    }
}

/// The bytes covered by the entry's CRC, in feed order.
pub fn serialize_entry(entry: &TtEntry) -> [u8; ENTRY_IMAGE_LEN] {
    let mut image = [0u8; ENTRY_IMAGE_LEN];
    BigEndian::write_u16(&mut image[0..2], encode_vid(entry.vid));
    image[2] = entry.flags.synced();
    image[3..].copy_from_slice(&entry.client.octets());
    image
}

/// CRC contribution of a single entry, or `None` if the entry is excluded.
pub fn entry_crc(entry: &TtEntry) -> Option<u32> {
    if entry.flags.is_excluded() {
        trace!(client = %entry.client, flags = %entry.flags, "excluded from checksum");
        return None;
    }
    let image = serialize_entry(entry);
    let mut digest = CASTAGNOLI.digest();
    digest.update(&image[0..2]);
    digest.update(&image[2..3]);
    digest.update(&image[3..]);
    let crc = digest.finalize();
    trace!(
        client = %entry.client,
        image = ?image,
        crc = %format!("{:#010x}", crc),
        "entry checksum"
    );
    Some(crc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::MacAddr;
    use crate::flags::TtFlags;

    fn entry(vid: i16, flags: TtFlags) -> TtEntry {
        TtEntry {
            client: MacAddr::new([0x33, 0x33, 0x00, 0x00, 0x00, 0x01]),
            vid,
            flags,
            originator: MacAddr::new([0x5e, 0x1c, 0x3b, 0x6c, 0xa1, 0x3b]),
            reported_crc: 0xce93f3f0,
        }
    }

    #[test]
    fn crc32c_check_value() {
        assert_eq!(crc32c(b"123456789"), 0xe3069283);
    }

    #[test]
    fn vid_encoding() {
        assert_eq!(encode_vid(-1), 0x0000);
        assert_eq!(encode_vid(0), 0x8000);
        assert_eq!(encode_vid(5), 0x8005);
        assert_eq!(encode_vid(4095), 0x8fff);
    }

    #[test]
    fn image_layout() {
        let image = serialize_entry(&entry(-1, TtFlags::WIFI));
        assert_eq!(image, [0x00, 0x00, 0x10, 0x33, 0x33, 0x00, 0x00, 0x00, 0x01]);

        let image = serialize_entry(&entry(5, TtFlags::WIFI | TtFlags::ISOLATION));
        assert_eq!(&image[..3], &[0x80, 0x05, 0x30]);
    }

    #[test]
    fn incremental_matches_one_shot() {
        let e = entry(-1, TtFlags::WIFI);
        assert_eq!(entry_crc(&e), Some(crc32c(&serialize_entry(&e))));
        assert_eq!(entry_crc(&e), Some(0x7828981f));
    }

    #[test]
    fn deterministic() {
        let e = entry(12, TtFlags::ISOLATION);
        assert_eq!(entry_crc(&e), entry_crc(&e));
    }

    #[test]
    fn roam_and_temp_are_excluded() {
        assert_eq!(entry_crc(&entry(-1, TtFlags::ROAM)), None);
        assert_eq!(entry_crc(&entry(-1, TtFlags::TEMP | TtFlags::WIFI)), None);
    }

    #[test]
    fn vid_and_flags_change_the_checksum() {
        let base = entry_crc(&entry(-1, TtFlags::empty()));
        assert_ne!(base, entry_crc(&entry(0, TtFlags::empty())));
        assert_ne!(base, entry_crc(&entry(-1, TtFlags::WIFI)));
    }
}
