//! Group entries by (originator, vid) and fold their checksums.

use crate::checksum::entry_crc;
use crate::entry::{GroupKey, TtEntry};
use std::collections::HashMap;

/// Result of folding a set of entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupChecksum {
    /// XOR of every included entry's CRC.
    pub computed_crc: u32,
    /// Entries that contributed (roaming/temporary ones do not).
    pub included_count: usize,
}

impl GroupChecksum {
    /// Add one entry. Excluded entries leave the accumulator untouched.
    pub fn push(self, entry: &TtEntry) -> Self {
        match entry_crc(entry) {
            Some(crc) => GroupChecksum {
                computed_crc: self.computed_crc ^ crc,
                included_count: self.included_count + 1,
            },
            None => self,
        }
    }
}

/// XOR-fold entries; order does not matter.
pub fn fold_entries<'a, I>(entries: I) -> GroupChecksum
where
    I: IntoIterator<Item = &'a TtEntry>,
{
    entries
        .into_iter()
        .fold(GroupChecksum::default(), GroupChecksum::push)
}

/// All entries announced by one originator for one vid.
#[derive(Debug, Clone)]
pub struct Group {
    key: GroupKey,
    entries: Vec<TtEntry>,
}

impl Group {
    fn new(first: TtEntry) -> Self {
        Group {
            key: first.group_key(),
            entries: vec![first],
        }
    }

    pub fn key(&self) -> GroupKey {
        self.key
    }

    /// Entries in dump order.
    pub fn entries(&self) -> &[TtEntry] {
        &self.entries
    }

    pub fn checksum(&self) -> GroupChecksum {
        fold_entries(&self.entries)
    }

    /// Last-seen reported checksum.
    pub fn reported_crc(&self) -> u32 {
        // never empty: a group is created with its first entry
        self.entries.last().map_or(0, |e| e.reported_crc)
    }

    /// Whether every entry carries the same reported checksum.
    pub fn reported_crc_consistent(&self) -> bool {
        let reported = self.reported_crc();
        self.entries.iter().all(|e| e.reported_crc == reported)
    }
}

/// Groups in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct GroupTable {
    groups: Vec<Group>,
    index: HashMap<GroupKey, usize>,
}

impl GroupTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = TtEntry>,
    {
        let mut table = Self::new();
        for entry in entries {
            table.insert(entry);
        }
        table
    }

    /// Every instance is kept, duplicates included.
    pub fn insert(&mut self, entry: TtEntry) {
        let key = entry.group_key();
        match self.index.get(&key) {
            Some(&i) => self.groups[i].entries.push(entry),
            None => {
                self.index.insert(key, self.groups.len());
                self.groups.push(Group::new(entry));
            }
        }
    }

    pub fn get(&self, key: &GroupKey) -> Option<&Group> {
        self.index.get(key).map(|&i| &self.groups[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for &'a GroupTable {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::MacAddr;
    use crate::flags::TtFlags;

    const ORIG_A: MacAddr = MacAddr::new([0x02, 0, 0, 0, 0, 0x0a]);
    const ORIG_B: MacAddr = MacAddr::new([0x02, 0, 0, 0, 0, 0x0b]);

    fn entry(client: u8, vid: i16, flags: TtFlags, originator: MacAddr) -> TtEntry {
        TtEntry {
            client: MacAddr::new([0x33, 0x33, 0, 0, 0, client]),
            vid,
            flags,
            originator,
            reported_crc: 0x1234_5678,
        }
    }

    #[test]
    fn empty_fold_is_identity() {
        let sum = fold_entries(std::iter::empty());
        assert_eq!(sum, GroupChecksum { computed_crc: 0, included_count: 0 });
    }

    #[test]
    fn order_independent() {
        let mut entries: Vec<TtEntry> = (1..=6)
            .map(|c| entry(c, -1, TtFlags::WIFI, ORIG_A))
            .collect();
        let forward = fold_entries(&entries);
        entries.reverse();
        assert_eq!(fold_entries(&entries), forward);
        entries.rotate_left(2);
        entries.swap(0, 3);
        assert_eq!(fold_entries(&entries), forward);
        assert_eq!(forward.included_count, 6);
    }

    #[test]
    fn roaming_entry_changes_nothing() {
        let plain = entry(1, -1, TtFlags::WIFI, ORIG_A);
        let roaming = entry(2, -1, TtFlags::ROAM | TtFlags::WIFI, ORIG_A);
        let temp = entry(3, -1, TtFlags::TEMP, ORIG_A);

        let with = fold_entries(&[plain, roaming, temp]);
        let without = fold_entries(&[plain]);
        assert_eq!(with, without);
        assert_eq!(with.included_count, 1);
        assert_eq!(Some(with.computed_crc), entry_crc(&plain));
    }

    #[test]
    fn duplicates_fold_independently() {
        let e = entry(1, -1, TtFlags::empty(), ORIG_A);
        let sum = fold_entries(&[e, e]);
        assert_eq!(sum.computed_crc, 0);
        assert_eq!(sum.included_count, 2);
    }

    #[test]
    fn table_groups_by_originator_and_vid() {
        let table = GroupTable::build(vec![
            entry(1, -1, TtFlags::empty(), ORIG_A),
            entry(2, 1, TtFlags::empty(), ORIG_A),
            entry(3, -1, TtFlags::empty(), ORIG_B),
            entry(4, -1, TtFlags::empty(), ORIG_A),
        ]);
        assert_eq!(table.len(), 3);
        let keys: Vec<_> = table.iter().map(|g| g.key()).collect();
        assert_eq!(
            keys,
            vec![
                GroupKey { originator: ORIG_A, vid: -1 },
                GroupKey { originator: ORIG_A, vid: 1 },
                GroupKey { originator: ORIG_B, vid: -1 },
            ]
        );
        let a = table
            .get(&GroupKey { originator: ORIG_A, vid: -1 })
            .expect("group");
        assert_eq!(a.entries().len(), 2);
        assert_eq!(a.checksum().included_count, 2);
    }

    #[test]
    fn reported_crc_is_last_seen() {
        let mut first = entry(1, -1, TtFlags::empty(), ORIG_A);
        first.reported_crc = 1;
        let mut second = entry(2, -1, TtFlags::empty(), ORIG_A);
        second.reported_crc = 2;
        let table = GroupTable::build(vec![first, second]);
        let g = table.iter().next().expect("group");
        assert_eq!(g.reported_crc(), 2);
        assert!(!g.reported_crc_consistent());
    }
}
