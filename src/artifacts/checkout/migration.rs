use crate::artifacts::checkout::conflict::UntrackedConflicts;
use crate::artifacts::objects::commit::Contents;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};

/// Type of file system action required for checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionType {
    /// Create a file the current commit does not track
    Add,
    /// Delete a file the target commit does not track
    Delete,
    /// Rewrite a file both commits track
    Modify,
}

/// Planned actions grouped by type; deletions carry no blob
pub type ActionsSet = BTreeMap<ActionType, Vec<(String, Option<ObjectId>)>>;

/// Plan for moving the working directory from one commit to another
#[derive(Debug)]
pub struct Migration {
    actions: ActionsSet,
    conflicts: UntrackedConflicts,
}

impl Migration {
    /// Plan the move from `current` to `target`
    ///
    /// Every file of the target is (re)written, even when its blob did not
    /// change, so that local edits to tracked files are discarded.
    pub fn plan(current: &Contents, target: &Contents, working_files: &BTreeSet<String>) -> Self {
        let mut actions = ActionsSet::from([
            (ActionType::Add, Vec::new()),
            (ActionType::Delete, Vec::new()),
            (ActionType::Modify, Vec::new()),
        ]);

        for name in current.keys().filter(|name| !target.contains_key(*name)) {
            actions
                .entry(ActionType::Delete)
                .or_default()
                .push((name.clone(), None));
        }

        for (name, oid) in target {
            let action = if current.contains_key(name) {
                ActionType::Modify
            } else {
                ActionType::Add
            };
            actions
                .entry(action)
                .or_default()
                .push((name.clone(), Some(oid.clone())));
        }

        let conflicts = UntrackedConflicts::detect(current, working_files, target.keys());

        Migration { actions, conflicts }
    }

    pub fn actions_of(&self, action: ActionType) -> &[(String, Option<ObjectId>)] {
        self.actions.get(&action).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn conflicts(&self) -> &UntrackedConflicts {
        &self.conflicts
    }

    /// Refuse the migration if it would clobber untracked work
    pub fn ensure_safe(&self) -> anyhow::Result<()> {
        self.conflicts.ensure_none()
    }
}
