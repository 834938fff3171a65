//! Staged change for a single file
//!
//! Entries are stored with 8-byte alignment; the name is followed by at
//! least one NUL byte.

use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::anyhow;
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

/// Block size for entry alignment (8 bytes)
pub const ENTRY_BLOCK: usize = 8;

/// Kind byte, blob id and name length
pub const ENTRY_FIXED_SIZE: usize = 1 + 20 + 2;

const ADDITION_MARKER: u8 = b'+';
const REMOVAL_MARKER: u8 = b'-';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedChange {
    /// The file will point to this blob in the next commit
    Addition(ObjectId),
    /// The file will be dropped from the next commit
    Removal,
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    pub name: String,
    pub change: StagedChange,
}

impl IndexEntry {
    /// On-disk size of an entry whose name is `name_len` bytes long
    pub fn padded_size(name_len: usize) -> usize {
        (ENTRY_FIXED_SIZE + name_len + 1).next_multiple_of(ENTRY_BLOCK)
    }
}

impl Packable for IndexEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let name_len = u16::try_from(self.name.len())
            .map_err(|_| anyhow!("Entry name too long: {}", self.name))?;

        let mut entry_bytes = Vec::with_capacity(Self::padded_size(self.name.len()));
        match &self.change {
            StagedChange::Addition(oid) => {
                entry_bytes.push(ADDITION_MARKER);
                oid.write_h40_to(&mut entry_bytes)?;
            }
            StagedChange::Removal => {
                entry_bytes.push(REMOVAL_MARKER);
                entry_bytes.write_all(&[0u8; 20])?;
            }
        }
        entry_bytes.write_u16::<byteorder::NetworkEndian>(name_len)?;
        entry_bytes.write_all(self.name.as_bytes())?;

        entry_bytes.resize(Self::padded_size(self.name.len()), 0);

        Ok(Bytes::from(entry_bytes))
    }
}

impl Unpackable for IndexEntry {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let bytes = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        if bytes.len() < ENTRY_FIXED_SIZE {
            return Err(anyhow!("Invalid index entry size"));
        }

        let name_len = byteorder::NetworkEndian::read_u16(&bytes[21..23]) as usize;
        let name_bytes = bytes
            .get(ENTRY_FIXED_SIZE..ENTRY_FIXED_SIZE + name_len)
            .ok_or_else(|| anyhow!("Truncated entry name"))?;
        let name = std::str::from_utf8(name_bytes)
            .map_err(|_| anyhow!("Invalid UTF-8 in entry name"))?
            .to_string();

        let change = match bytes[0] {
            ADDITION_MARKER => {
                let mut oid_bytes = std::io::Cursor::new(&bytes[1..21]);
                StagedChange::Addition(ObjectId::read_h40_from(&mut oid_bytes)?)
            }
            REMOVAL_MARKER => StagedChange::Removal,
            other => return Err(anyhow!("Unknown index entry kind {other:#04x}")),
        };

        Ok(IndexEntry { name, change })
    }
}
