//! Three-way per-file resolution
//!
//! For every file name in the split point, the current commit or the target
//! commit, compare the two sides against the split point (a missing file
//! counts as a version of its own, so deletions are changes too):
//!
//! | current vs base | target vs base | outcome                         |
//! |-----------------|----------------|---------------------------------|
//! | unchanged       | changed        | take target (write or delete)   |
//! | changed         | unchanged      | keep current                    |
//! | changed         | changed, same  | keep current                    |
//! | changed         | changed, other | conflict                        |

use crate::artifacts::objects::commit::Contents;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileResolution {
    /// Write the target's blob and stage it
    TakeTarget(ObjectId),
    /// Delete the file and stage its removal
    Remove,
    /// Both sides changed the file differently; `None` means deleted
    Conflict {
        current: Option<ObjectId>,
        target: Option<ObjectId>,
    },
}

/// Decisions for every file a merge has to touch, by name
#[derive(Debug, Default)]
pub struct MergeResolution {
    resolutions: BTreeMap<String, FileResolution>,
}

impl MergeResolution {
    pub fn resolve(base: &Contents, current: &Contents, target: &Contents) -> Self {
        let names = base
            .keys()
            .chain(current.keys())
            .chain(target.keys())
            .collect::<BTreeSet<_>>();

        let resolutions = names
            .into_iter()
            .filter_map(|name| {
                let base_oid = base.get(name);
                let current_oid = current.get(name);
                let target_oid = target.get(name);

                Self::resolve_file(base_oid, current_oid, target_oid)
                    .map(|resolution| (name.clone(), resolution))
            })
            .collect();

        MergeResolution { resolutions }
    }

    fn resolve_file(
        base: Option<&ObjectId>,
        current: Option<&ObjectId>,
        target: Option<&ObjectId>,
    ) -> Option<FileResolution> {
        if current == target || base == target {
            return None;
        }

        if base == current {
            return Some(match target {
                Some(oid) => FileResolution::TakeTarget(oid.clone()),
                None => FileResolution::Remove,
            });
        }

        Some(FileResolution::Conflict {
            current: current.cloned(),
            target: target.cloned(),
        })
    }

    pub fn resolutions(&self) -> &BTreeMap<String, FileResolution> {
        &self.resolutions
    }

    /// Names of the files the merge will write or delete
    pub fn touched(&self) -> impl Iterator<Item = &String> {
        self.resolutions.keys()
    }

    pub fn has_conflicts(&self) -> bool {
        self.conflicts().next().is_some()
    }

    pub fn conflicts(&self) -> impl Iterator<Item = &String> {
        self.resolutions
            .iter()
            .filter(|(_, resolution)| matches!(resolution, FileResolution::Conflict { .. }))
            .map(|(name, _)| name)
    }
}
