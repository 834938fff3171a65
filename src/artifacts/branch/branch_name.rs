use crate::artifacts::branch::INVALID_BRANCH_NAME_REGEX;
use crate::errors::BitletError;
use anyhow::Context;

/// Prefix of the symbolic reference stored in HEAD
pub const REF_PREFIX: &str = "refs/heads/";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    /// Validate a branch name against Git's ref-name rules
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if name.is_empty() || re.is_match(&name) {
            Err(BitletError::usage(format!("Invalid branch name: {name}")).into())
        } else {
            Ok(Self(name))
        }
    }

    /// Parse the `ref: refs/heads/<name>` content of HEAD
    pub fn try_parse_sym_ref(content: &str) -> anyhow::Result<Self> {
        let ref_path = content
            .trim()
            .strip_prefix("ref: ")
            .and_then(|target| target.strip_prefix(REF_PREFIX))
            .with_context(|| format!("HEAD is not a branch reference: {content:?}"))?;

        Self::try_parse(ref_path.to_string())
    }

    pub fn to_sym_ref(&self) -> String {
        format!("ref: {REF_PREFIX}{}", self.0)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
