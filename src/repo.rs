use crate::hook::{BranchNames, MessageStore};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Branch names straight from the local repository.
pub struct GitBranches {
    repo: Option<git2::Repository>,
}

impl GitBranches {
    /// Discover the repository from `cwd` (git runs hooks from the worktree
    /// root). A missing repository is not an error; `current` will simply
    /// report no branch.
    pub fn discover(cwd: &str) -> Self {
        Self {
            repo: git2::Repository::discover(cwd).ok(),
        }
    }

    pub fn workdir(&self) -> Option<&Path> {
        self.repo.as_ref().and_then(|r| r.workdir())
    }
}

impl BranchNames for GitBranches {
    fn current(&self) -> Option<String> {
        let repo = self.repo.as_ref()?;
        match repo.head() {
            Ok(head) if head.is_branch() => head.shorthand().map(str::to_string),
            // Detached HEAD: no branch name to resolve a story from.
            Ok(_) => None,
            // Unborn branch: HEAD is symbolic but its target has no commits
            // yet. The first commit on a story branch still gets its trailer.
            Err(_) => repo
                .find_reference("HEAD")
                .ok()?
                .symbolic_target()
                .and_then(|target| target.strip_prefix("refs/heads/"))
                .map(str::to_string),
        }
    }
}

/// Commit message file access. Writes go through a sibling temp file and a
/// rename, so an interrupted run leaves the original message intact rather
/// than a truncated file.
pub struct FileStore;

impl MessageStore for FileStore {
    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        let mut tmp_name = path.as_os_str().to_os_string();
        tmp_name.push(".storyhook");
        let tmp = PathBuf::from(tmp_name);
        fs::write(&tmp, content).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))
    }
}
