use crate::branch;
use crate::config::Config;
use crate::message::CommitMessage;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Why git invoked the prepare-commit-msg hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookSource {
    Message,
    Template,
    Merge,
    Squash,
    Commit,
}

impl HookSource {
    /// Parse git's source argument. Unknown values map to `None` so a future
    /// git version never makes the hook fail.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "message" => Some(HookSource::Message),
            "template" => Some(HookSource::Template),
            "merge" => Some(HookSource::Merge),
            "squash" => Some(HookSource::Squash),
            "commit" => Some(HookSource::Commit),
            _ => None,
        }
    }
}

/// Where the current branch name comes from. The real implementation asks
/// git; tests substitute a stub.
pub trait BranchNames {
    /// The checked-out branch name, or `None` when it cannot be determined
    /// (detached HEAD, not a repository). Failures here mean "no story",
    /// never a fatal error.
    fn current(&self) -> Option<String>;
}

/// Read and write the commit message file.
pub trait MessageStore {
    fn read(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}

impl<S: MessageStore + ?Sized> MessageStore for &S {
    fn read(&self, path: &Path) -> Result<String> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        (**self).write(path, content)
    }
}

/// What a single hook run did. Every variant exits 0; errors are only I/O
/// failures on the message file.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The message belongs to an existing commit being reused; left alone.
    ExistingCommit,
    /// No branch, or no story number in the branch name.
    NoStory,
    /// The story is already referenced in the message.
    AlreadyMentioned,
    /// The trailer token that was appended and written back.
    Appended(String),
}

pub struct PrepareCommitMessage<B, S> {
    file: PathBuf,
    source: Option<HookSource>,
    commit_sha: Option<String>,
    branches: B,
    store: S,
    config: Config,
}

impl<B: BranchNames, S: MessageStore> PrepareCommitMessage<B, S> {
    pub fn new(
        file: PathBuf,
        source: Option<HookSource>,
        commit_sha: Option<String>,
        branches: B,
        store: S,
        config: Config,
    ) -> Self {
        Self {
            file,
            source,
            commit_sha,
            branches,
            store,
            config,
        }
    }

    /// Decide whether to mutate the commit message, and do it. At most one
    /// file write per invocation.
    pub fn run(&self) -> Result<Outcome> {
        // An existing commit's message is being reused (`--amend`, `-c`,
        // `-C`, cherry-pick). git signals this with source "commit" plus the
        // commit's SHA; either alone is enough to leave the message alone.
        if self.source == Some(HookSource::Commit) || self.commit_sha.is_some() {
            return Ok(Outcome::ExistingCommit);
        }

        let Some(branch) = self.branches.current() else {
            return Ok(Outcome::NoStory);
        };
        let Some(story) = branch::resolve(&branch, &self.config) else {
            return Ok(Outcome::NoStory);
        };

        let mut message = CommitMessage::new(self.store.read(&self.file)?);
        if message.mentions_story(&story.number) {
            return Ok(Outcome::AlreadyMentioned);
        }

        let token = match &story.keyword {
            Some(keyword) => format!("[{keyword} #{}]", story.number),
            None => format!("[#{}]", story.number),
        };
        message.append(&token);
        self.store.write(&self.file, message.text())?;
        Ok(Outcome::Appended(token))
    }
}

#[cfg(test)]
mod tests;
