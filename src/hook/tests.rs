use super::*;
use crate::config::Config;
use anyhow::anyhow;
use std::cell::RefCell;

struct StubBranches(Option<&'static str>);

impl BranchNames for StubBranches {
    fn current(&self) -> Option<String> {
        self.0.map(str::to_string)
    }
}

/// In-memory message file that records every read and write.
struct MemoryStore {
    contents: RefCell<String>,
    reads: RefCell<usize>,
    writes: RefCell<Vec<String>>,
}

impl MemoryStore {
    fn new(contents: &str) -> Self {
        Self {
            contents: RefCell::new(contents.to_string()),
            reads: RefCell::new(0),
            writes: RefCell::new(Vec::new()),
        }
    }

    fn contents(&self) -> String {
        self.contents.borrow().clone()
    }

    fn reads(&self) -> usize {
        *self.reads.borrow()
    }

    fn writes(&self) -> usize {
        self.writes.borrow().len()
    }
}

impl MessageStore for MemoryStore {
    fn read(&self, _path: &Path) -> Result<String> {
        *self.reads.borrow_mut() += 1;
        Ok(self.contents())
    }

    fn write(&self, _path: &Path, content: &str) -> Result<()> {
        *self.contents.borrow_mut() = content.to_string();
        self.writes.borrow_mut().push(content.to_string());
        Ok(())
    }
}

struct FailingStore;

impl MessageStore for FailingStore {
    fn read(&self, _path: &Path) -> Result<String> {
        Err(anyhow!("disk on fire"))
    }

    fn write(&self, _path: &Path, _content: &str) -> Result<()> {
        Err(anyhow!("disk still on fire"))
    }
}

fn hook<'a, S: MessageStore>(
    branch: Option<&'static str>,
    source: Option<HookSource>,
    commit_sha: Option<&str>,
    store: &'a S,
) -> PrepareCommitMessage<StubBranches, &'a S> {
    PrepareCommitMessage::new(
        PathBuf::from("COMMIT_EDITMSG"),
        source,
        commit_sha.map(String::from),
        StubBranches(branch),
        store,
        Config::default(),
    )
}

#[test]
fn existing_commit_is_left_alone() {
    let store = MemoryStore::new("reused message");
    let hook = hook(
        Some("feature/8675309-thing"),
        Some(HookSource::Commit),
        Some("60a086f3"),
        &store,
    );
    assert_eq!(hook.run().unwrap(), Outcome::ExistingCommit);
    assert_eq!(store.reads(), 0);
    assert_eq!(store.writes(), 0);
}

#[test]
fn a_commit_sha_alone_means_an_existing_commit() {
    let store = MemoryStore::new("reused message");
    let hook = hook(Some("feature/8675309"), None, Some("60a086f3"), &store);
    assert_eq!(hook.run().unwrap(), Outcome::ExistingCommit);
    assert_eq!(store.writes(), 0);
}

#[test]
fn no_branch_means_no_story() {
    let store = MemoryStore::new("Fix bug");
    let hook = hook(None, None, None, &store);
    assert_eq!(hook.run().unwrap(), Outcome::NoStory);
    assert_eq!(store.reads(), 0);
}

#[test]
fn branch_without_a_story_skips_without_touching_the_file() {
    let store = MemoryStore::new("Fix bug");
    let hook = hook(Some("no-story-branch"), None, None, &store);
    assert_eq!(hook.run().unwrap(), Outcome::NoStory);
    assert_eq!(store.reads(), 0);
    assert_eq!(store.writes(), 0);
    assert_eq!(store.contents(), "Fix bug");
}

#[test]
fn appends_the_story_number() {
    let store = MemoryStore::new("Fix bug");
    let hook = hook(Some("feature/8675309-thing"), None, None, &store);
    assert_eq!(
        hook.run().unwrap(),
        Outcome::Appended("[#8675309]".into())
    );
    assert_eq!(store.contents(), "Fix bug\n[#8675309]\n");
    assert_eq!(store.writes(), 1);
}

#[test]
fn appends_the_keyword_and_the_story_number() {
    let store = MemoryStore::new("Fix bug");
    let hook = hook(Some("deliver/8675309-ship-it"), None, None, &store);
    assert_eq!(
        hook.run().unwrap(),
        Outcome::Appended("[Delivers #8675309]".into())
    );
    assert_eq!(store.contents(), "Fix bug\n[Delivers #8675309]\n");
}

#[test]
fn a_mentioned_story_is_not_appended_again() {
    let store = MemoryStore::new("Fix bug [#8675309]");
    let hook = hook(Some("feature/8675309-thing"), None, None, &store);
    assert_eq!(hook.run().unwrap(), Outcome::AlreadyMentioned);
    assert_eq!(store.writes(), 0);
}

#[test]
fn running_twice_appends_once() {
    let store = MemoryStore::new("Fix bug");
    let hook = hook(Some("feature/8675309-thing"), None, None, &store);
    assert!(matches!(hook.run().unwrap(), Outcome::Appended(_)));
    assert_eq!(hook.run().unwrap(), Outcome::AlreadyMentioned);
    assert_eq!(store.writes(), 1);
    assert_eq!(store.contents(), "Fix bug\n[#8675309]\n");
}

#[test]
fn message_and_template_sources_still_append() {
    for source in [HookSource::Message, HookSource::Template, HookSource::Merge] {
        let store = MemoryStore::new("Fix bug");
        let hook = hook(Some("feature/8675309"), Some(source), None, &store);
        assert!(matches!(hook.run().unwrap(), Outcome::Appended(_)));
    }
}

#[test]
fn a_read_failure_propagates() {
    let store = FailingStore;
    let hook = hook(Some("feature/8675309"), None, None, &store);
    assert!(hook.run().is_err());
}

#[test]
fn unknown_source_values_parse_to_none() {
    assert_eq!(HookSource::parse("commit"), Some(HookSource::Commit));
    assert_eq!(HookSource::parse("squash"), Some(HookSource::Squash));
    assert_eq!(HookSource::parse("reword"), None);
}
