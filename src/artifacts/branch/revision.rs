use crate::areas::database::Database;
use crate::artifacts::branch::{ANCESTOR_REGEX, PARENT_REGEX};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::BitletError;
use anyhow::Context;

/// Shortest abbreviated id accepted for a commit
pub const MIN_PREFIX_LENGTH: usize = 4;

const NO_SUCH_COMMIT: &str = "No commit with that id exists.";

/// A commit named on the command line
///
/// - Full ids: 40 hexadecimal characters
/// - Abbreviated ids: at least 4 hexadecimal characters, unique in the store
/// - Parent notation: `<revision>^`
/// - Ancestor notation: `<revision>~<n>`, following first parents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    Oid(String),
    Parent(Box<Revision>),
    Ancestor(Box<Revision>, usize),
}

impl Revision {
    pub fn try_parse(revision: &str) -> anyhow::Result<Revision> {
        let parent_re = regex::Regex::new(PARENT_REGEX)
            .with_context(|| format!("invalid parent regex: {PARENT_REGEX}"))?;
        let ancestor_re = regex::Regex::new(ANCESTOR_REGEX)
            .with_context(|| format!("invalid ancestor regex: {ANCESTOR_REGEX}"))?;

        if let Some(caps) = parent_re.captures(revision) {
            let base_revision = Self::try_parse(&caps[1])?;
            Ok(Revision::Parent(Box::new(base_revision)))
        } else if let Some(caps) = ancestor_re.captures(revision) {
            let generations: usize = caps[2]
                .parse()
                .map_err(|_| BitletError::not_found(NO_SUCH_COMMIT))?;
            let base_revision = Self::try_parse(&caps[1])?;
            Ok(Revision::Ancestor(Box::new(base_revision), generations))
        } else if Self::looks_like_oid(revision) {
            Ok(Revision::Oid(revision.to_ascii_lowercase()))
        } else {
            Err(BitletError::not_found(NO_SUCH_COMMIT).into())
        }
    }

    /// Resolve to the id of an existing commit
    pub fn resolve(&self, database: &Database) -> anyhow::Result<ObjectId> {
        match self {
            Revision::Oid(prefix) => {
                let oid = database.resolve_prefix(prefix).map_err(|error| {
                    match BitletError::from(error) {
                        BitletError::NotFound(_) => BitletError::not_found(NO_SUCH_COMMIT),
                        other => other,
                    }
                })?;

                if database.get_object_type(&oid)? != ObjectType::Commit {
                    return Err(BitletError::not_found(NO_SUCH_COMMIT).into());
                }

                Ok(oid)
            }
            Revision::Parent(base_revision) => {
                Self::commit_parent(&base_revision.resolve(database)?, database)
            }
            Revision::Ancestor(base_revision, generations) => {
                let mut oid = base_revision.resolve(database)?;
                for _ in 0..*generations {
                    oid = Self::commit_parent(&oid, database)?;
                }

                Ok(oid)
            }
        }
    }

    fn commit_parent(oid: &ObjectId, database: &Database) -> anyhow::Result<ObjectId> {
        database
            .load_commit(oid)?
            .parent()
            .cloned()
            .ok_or_else(|| BitletError::not_found(NO_SUCH_COMMIT).into())
    }

    fn looks_like_oid(s: &str) -> bool {
        (MIN_PREFIX_LENGTH..=40).contains(&s.len()) && s.chars().all(|c| c.is_ascii_hexdigit())
    }
}
