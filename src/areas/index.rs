//! Staging area
//!
//! Two disjoint sets of pending changes relative to HEAD: files staged for
//! addition (name to blob id) and files staged for removal. Staging a name on
//! one side drops it from the other.
//!
//! The index is persisted to `.bitlet/index` with a trailing checksum (see
//! [`crate::artifacts::index`]) and rewritten through a temporary file.

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::{ENTRY_FIXED_SIZE, IndexEntry, StagedChange};
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::{Context, anyhow};
use byteorder::ByteOrder;
use fake::rand;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (`.bitlet/index`)
    path: Box<Path>,
    additions: BTreeMap<String, ObjectId>,
    removals: BTreeSet<String>,
    /// Set when the in-memory state differs from what was loaded
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            additions: BTreeMap::new(),
            removals: BTreeSet::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index from disk
    ///
    /// A missing or empty file is an empty index. The checksum is verified.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.additions.clear();
        self.removals.clear();
        self.changed = false;

        if !self.path.exists() {
            return Ok(());
        }

        let mut index_file = std::fs::File::open(&self.path)
            .with_context(|| format!("Unable to open index file {}", self.path.display()))?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(std::io::BufReader::new(lock.deref_mut()));
        let entries_count = Self::parse_header(&mut reader)?;
        self.parse_entries(entries_count, &mut reader)?;

        reader.verify()
    }

    fn parse_header<R: std::io::Read>(reader: &mut Checksum<R>) -> anyhow::Result<u32> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = IndexHeader::deserialize(std::io::Cursor::new(header_bytes))?;

        if header.marker != SIGNATURE {
            return Err(anyhow!("Invalid index file signature"));
        }

        if header.version != VERSION {
            return Err(anyhow!(
                "Unsupported index file version: {}",
                header.version
            ));
        }

        Ok(header.entries_count)
    }

    fn parse_entries<R: std::io::Read>(
        &mut self,
        entries_count: u32,
        reader: &mut Checksum<R>,
    ) -> anyhow::Result<()> {
        for _ in 0..entries_count {
            let fixed = reader.read(ENTRY_FIXED_SIZE)?;
            let name_len = byteorder::NetworkEndian::read_u16(&fixed[21..23]) as usize;
            let rest = reader.read(IndexEntry::padded_size(name_len) - ENTRY_FIXED_SIZE)?;

            let entry_bytes = [fixed.as_ref(), rest.as_ref()].concat();
            let entry = IndexEntry::deserialize(std::io::Cursor::new(entry_bytes))?;

            match entry.change {
                StagedChange::Addition(oid) => {
                    self.additions.insert(entry.name, oid);
                }
                StagedChange::Removal => {
                    self.removals.insert(entry.name);
                }
            }
        }

        Ok(())
    }

    pub fn stage_addition(&mut self, name: &str, oid: ObjectId) {
        self.removals.remove(name);
        self.additions.insert(name.to_string(), oid);
        self.changed = true;
    }

    pub fn stage_removal(&mut self, name: &str) {
        self.additions.remove(name);
        self.removals.insert(name.to_string());
        self.changed = true;
    }

    /// Drop any staged change for `name`; returns whether there was one
    pub fn unstage(&mut self, name: &str) -> bool {
        let removed = self.additions.remove(name).is_some() | self.removals.remove(name);
        self.changed |= removed;
        removed
    }

    pub fn clear(&mut self) {
        if !self.is_empty() {
            self.changed = true;
        }
        self.additions.clear();
        self.removals.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn staged_blob(&self, name: &str) -> Option<&ObjectId> {
        self.additions.get(name)
    }

    pub fn is_staged_for_addition(&self, name: &str) -> bool {
        self.additions.contains_key(name)
    }

    pub fn is_staged_for_removal(&self, name: &str) -> bool {
        self.removals.contains(name)
    }

    pub fn additions(&self) -> &BTreeMap<String, ObjectId> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<String> {
        &self.removals
    }

    pub fn entries(&self) -> impl Iterator<Item = IndexEntry> + '_ {
        let additions = self
            .additions
            .iter()
            .map(|(name, oid)| IndexEntry::new(name.clone(), StagedChange::Addition(oid.clone())));
        let removals = self
            .removals
            .iter()
            .map(|name| IndexEntry::new(name.clone(), StagedChange::Removal));

        additions.chain(removals)
    }

    /// Persist the index through a temporary file renamed into place
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let index_dir = self
            .path
            .parent()
            .context(format!("Invalid index path {}", self.path.display()))?;
        let temp_path = index_dir.join(format!("index-{}.tmp", rand::random::<u32>()));

        let temp_file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .with_context(|| format!("Unable to create {}", temp_path.display()))?;
        let mut writer = Checksum::new(temp_file);

        let header = IndexHeader {
            entries_count: (self.additions.len() + self.removals.len()) as u32,
            ..IndexHeader::empty()
        };
        writer.write(&header.serialize()?)?;

        for entry in self.entries() {
            writer.write(&entry.serialize()?)?;
        }

        writer.write_checksum()?;
        writer.into_inner().sync_all()?;

        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Unable to replace {}", self.path.display()))?;
        self.changed = false;

        tracing::debug!(
            additions = self.additions.len(),
            removals = self.removals.len(),
            "wrote staging index"
        );

        Ok(())
    }
}
