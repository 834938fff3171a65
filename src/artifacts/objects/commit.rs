//! Commit object
//!
//! A commit is an immutable snapshot of the tracked files plus metadata:
//! - the mapping from file name to blob id
//! - parent commit id(s): none for the root, two for a merge
//! - a timestamp with its UTC offset
//! - the commit message
//!
//! ## Format
//!
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! timestamp <unix-seconds> <+hhmm>
//! file <blob-sha> <name>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::BTreeMap;
use std::io::BufRead;

/// Message of the commit created by `init`
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Environment variable overriding the timestamp of new commits
pub const DATE_ENV: &str = "BITLET_DATE";

/// File name to blob id, sorted by file name
pub type Contents = BTreeMap<String, ObjectId>;

/// Slim representation of a commit
///
/// Holds only what graph walks need, so the merge base search does not keep
/// whole snapshots around.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    pub oid: ObjectId,
    pub parents: Vec<ObjectId>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit ids; the first one is the mainline parent
    parents: Vec<ObjectId>,
    contents: Contents,
    timestamp: DateTime<FixedOffset>,
    message: String,
}

impl Commit {
    pub fn new(
        parents: Vec<ObjectId>,
        contents: Contents,
        timestamp: DateTime<FixedOffset>,
        message: String,
    ) -> Self {
        Commit {
            parents,
            contents,
            timestamp,
            message,
        }
    }

    /// The commit every repository starts from
    pub fn root() -> Self {
        let epoch = DateTime::<Utc>::UNIX_EPOCH.fixed_offset();
        Commit::new(
            Vec::new(),
            Contents::new(),
            epoch,
            INITIAL_COMMIT_MESSAGE.to_string(),
        )
    }

    /// Read the commit timestamp from `BITLET_DATE`, falling back to the clock
    ///
    /// Accepts RFC 2822 or `%Y-%m-%d %H:%M:%S %z`.
    pub fn timestamp_from_env() -> DateTime<FixedOffset> {
        std::env::var(DATE_ENV)
            .ok()
            .and_then(|date_str| {
                DateTime::parse_from_rfc2822(&date_str)
                    .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                    .ok()
            })
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
    }

    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn contents(&self) -> &Contents {
        &self.contents
    }

    pub fn blob_for(&self, name: &str) -> Option<&ObjectId> {
        self.contents.get(name)
    }

    pub fn tracks(&self, name: &str) -> bool {
        self.contents.contains_key(name)
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn second_parent(&self) -> Option<&ObjectId> {
        self.parents.get(1)
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Format timestamp like "Thu Jan 1 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub fn to_slim(&self, oid: ObjectId) -> SlimCommit {
        SlimCommit {
            oid,
            parents: self.parents.clone(),
        }
    }

    fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
        let (seconds, offset) = value
            .split_once(' ')
            .context("Invalid commit object: malformed timestamp")?;
        let seconds = seconds
            .parse::<i64>()
            .context("Invalid commit object: timestamp is not a number")?;

        let datetime = DateTime::<Utc>::from_timestamp(seconds, 0)
            .context("Invalid commit object: timestamp out of range")?;

        let (sign, digits) = match offset.split_at_checked(1) {
            Some(("+", digits)) => (1, digits),
            Some(("-", digits)) => (-1, digits),
            _ => anyhow::bail!("Invalid commit object: invalid timezone {offset:?}"),
        };
        let hours = digits.get(..2).and_then(|h| h.parse::<i32>().ok());
        let minutes = digits.get(2..4).and_then(|m| m.parse::<i32>().ok());
        let offset = match (hours, minutes) {
            (Some(hours), Some(minutes)) if digits.len() == 4 => {
                FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            }
            _ => None,
        }
        .context("Invalid commit object: invalid timezone")?;

        Ok(datetime.with_timezone(&offset))
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut lines = vec![];

        for parent in &self.parents {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        lines.push(format!(
            "timestamp {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for (name, oid) in &self.contents {
            if name.contains(['\n', '\r']) {
                anyhow::bail!("Invalid file name {name:?}: line breaks cannot be committed");
            }
            lines.push(format!("file {} {}", oid.as_ref(), name));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        let payload = lines.join("\n");

        Ok(frame(self.object_type(), payload.as_bytes()))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .context("Invalid commit object: payload is not UTF-8")?;

        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut parents = Vec::new();
        let mut contents = Contents::new();
        let mut timestamp = None;

        for line in header.lines() {
            if let Some(parent_oid) = line.strip_prefix("parent ") {
                parents.push(ObjectId::try_parse(parent_oid.to_string())?);
            } else if let Some(value) = line.strip_prefix("timestamp ") {
                timestamp = Some(Self::parse_timestamp(value)?);
            } else if let Some(entry) = line.strip_prefix("file ") {
                let (oid, name) = entry
                    .split_once(' ')
                    .context("Invalid commit object: malformed file line")?;
                contents.insert(name.to_string(), ObjectId::try_parse(oid.to_string())?);
            } else {
                anyhow::bail!("Invalid commit object: unexpected line {line:?}");
            }
        }

        let timestamp = timestamp.context("Invalid commit object: missing timestamp line")?;

        Ok(Self::new(parents, contents, timestamp, message.to_string()))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
