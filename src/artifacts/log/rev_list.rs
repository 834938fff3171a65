use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashSet, VecDeque};

/// First-parent history walk over several starting points
///
/// Each seed is followed along parent1 until the root or until a commit seen
/// from an earlier seed is reached. The visited set is shared, so the union of
/// several histories comes out without duplicates.
pub struct RevList<'d> {
    database: &'d Database,
    seeds: VecDeque<ObjectId>,
    visited: HashSet<ObjectId>,
    current: Option<ObjectId>,
}

impl<'d> RevList<'d> {
    pub fn new(database: &'d Database, seeds: impl IntoIterator<Item = ObjectId>) -> Self {
        RevList {
            database,
            seeds: seeds.into_iter().collect(),
            visited: HashSet::new(),
            current: None,
        }
    }

    /// Queue another starting point behind the existing ones
    pub fn push_seed(&mut self, oid: ObjectId) {
        self.seeds.push_back(oid);
    }

    fn next_unvisited(&mut self) -> Option<ObjectId> {
        if let Some(oid) = self.current.take()
            && !self.visited.contains(&oid)
        {
            return Some(oid);
        }

        while let Some(seed) = self.seeds.pop_front() {
            if !self.visited.contains(&seed) {
                return Some(seed);
            }
        }

        None
    }
}

impl Iterator for RevList<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = self.next_unvisited()?;
        self.visited.insert(oid.clone());

        match self.database.load_commit(&oid) {
            Ok(commit) => {
                self.current = commit.parent().cloned();
                Some(Ok((oid, commit)))
            }
            Err(error) => {
                self.current = None;
                Some(Err(error))
            }
        }
    }
}
