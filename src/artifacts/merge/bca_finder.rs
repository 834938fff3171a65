//! Best common ancestor search for merges
//!
//! The split point of a merge is a lowest common ancestor of the current
//! HEAD and the target branch tip, computed over the full parent sets (both
//! parents of merge commits are followed).
//!
//! ## Algorithm
//!
//! 1. Breadth-first walks from the source and from the target record the
//!    shortest distance to every reachable commit and mark it as visited from
//!    that side.
//! 2. Commits visited from both sides are common ancestors.
//! 3. **Best Common Ancestor invariant**: a best common ancestor is a common
//!    ancestor that is not an ancestor of any other common ancestor. Every
//!    commit strictly behind a common ancestor is marked stale.
//! 4. Among the remaining candidates, pick the one minimizing
//!    `(i + j, i)` where `i` and `j` are the distances from source and target;
//!    remaining ties go to the smaller id.
//!
//! On a linear history the result is the commit a walk along first parents
//! would find.

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, VecDeque};
use std::fmt;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_SOURCE = 0b01;
        const VISITED_FROM_TARGET = 0b10;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_SOURCE.bits() | Self::VISITED_FROM_TARGET.bits();
        const STALE = 0b100; // strictly behind some common ancestor
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_SOURCE) {
            flags.push("SOURCE");
        }
        if self.contains(VisitState::VISITED_FROM_TARGET) {
            flags.push("TARGET");
        }
        if self.contains(VisitState::STALE) {
            flags.push("STALE");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

/// Finds the best common ancestor of two commits
///
/// The commit loader abstracts over where commits come from (the object
/// store, or an in-memory graph in tests). It returns the parents of a
/// commit.
pub struct BCAFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> BCAFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Returns `None` only when the two histories share no commit
    pub fn find_best_common_ancestor(
        &self,
        source_commit_id: &ObjectId,
        target_commit_id: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        if source_commit_id == target_commit_id {
            return Ok(Some(source_commit_id.clone()));
        }

        let source_distances = self.distances_from(source_commit_id)?;
        let target_distances = self.distances_from(target_commit_id)?;

        let mut ancestors_states = HashMap::<ObjectId, VisitState>::new();
        for oid in source_distances.keys() {
            *ancestors_states.entry(oid.clone()).or_insert(VisitState::NONE) |=
                VisitState::VISITED_FROM_SOURCE;
        }
        for oid in target_distances.keys() {
            *ancestors_states.entry(oid.clone()).or_insert(VisitState::NONE) |=
                VisitState::VISITED_FROM_TARGET;
        }

        let mut common_ancestors = ancestors_states
            .iter()
            .filter(|(_, state)| state.contains(VisitState::VISITED_FROM_BOTH))
            .map(|(oid, _)| oid.clone())
            .collect::<Vec<_>>();
        common_ancestors.sort();

        tracing::trace!(count = common_ancestors.len(), "found common ancestors");

        self.mark_stale(&common_ancestors, &mut ancestors_states)?;

        let best_common_ancestor = common_ancestors
            .into_iter()
            .filter(|oid| {
                ancestors_states
                    .get(oid)
                    .is_some_and(|state| !state.contains(VisitState::STALE))
            })
            .filter_map(|oid| {
                let i = *source_distances.get(&oid)?;
                let j = *target_distances.get(&oid)?;
                Some(((i + j, i), oid))
            })
            .min()
            .map(|(_, oid)| oid);

        if let Some(oid) = &best_common_ancestor {
            tracing::trace!(
                source = %source_commit_id.to_short_oid(),
                target = %target_commit_id.to_short_oid(),
                base = %oid.to_short_oid(),
                "best common ancestor"
            );
        }

        Ok(best_common_ancestor)
    }

    /// Shortest number of parent links from `start` to every reachable commit
    fn distances_from(&self, start: &ObjectId) -> anyhow::Result<HashMap<ObjectId, usize>> {
        let mut distances = HashMap::from([(start.clone(), 0)]);
        let mut queue = VecDeque::from([(start.clone(), 0)]);

        while let Some((commit_id, distance)) = queue.pop_front() {
            let commit = (self.commit_loader)(&commit_id)?;

            for parent_id in commit.parents {
                if !distances.contains_key(&parent_id) {
                    distances.insert(parent_id.clone(), distance + 1);
                    queue.push_back((parent_id, distance + 1));
                }
            }
        }

        Ok(distances)
    }

    /// Mark every commit strictly behind a common ancestor as stale
    fn mark_stale(
        &self,
        common_ancestors: &[ObjectId],
        ancestors_states: &mut HashMap<ObjectId, VisitState>,
    ) -> anyhow::Result<()> {
        let mut queue = VecDeque::new();
        for commit_id in common_ancestors {
            queue.extend((self.commit_loader)(commit_id)?.parents);
        }

        while let Some(commit_id) = queue.pop_front() {
            let state = ancestors_states
                .entry(commit_id.clone())
                .or_insert(VisitState::NONE);
            if state.contains(VisitState::STALE) {
                continue;
            }

            tracing::trace!(commit = %commit_id.to_short_oid(), state = ?*state, "marking stale");
            *state |= VisitState::STALE;
            queue.extend((self.commit_loader)(&commit_id)?.parents);
        }

        Ok(())
    }
}
