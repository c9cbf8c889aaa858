mod branch;
mod config;
mod hook;
mod message;
mod repo;

use anyhow::Result;
use clap::Parser;
use config::Config;
use hook::{HookSource, Outcome, PrepareCommitMessage};
use repo::{FileStore, GitBranches};
use std::path::PathBuf;
use std::process;

/// git prepare-commit-msg hook: appends a tracker story trailer, taken from
/// the current branch name, to the commit message being prepared.
#[derive(Parser)]
#[command(name = "storyhook", version)]
struct Args {
    /// Path to the commit message file git has prepared.
    file: PathBuf,
    /// Why git invoked the hook: message, template, merge, squash or commit.
    source: Option<String>,
    /// SHA-1 of the commit whose message is being reused (`--amend`, `-c`, `-C`).
    commit_sha: Option<String>,
}

fn run(args: Args) -> Result<Outcome> {
    let branches = GitBranches::discover(".");
    let config = match branches.workdir() {
        Some(dir) => Config::load(dir)?,
        None => Config::default(),
    };
    let source = args.source.as_deref().and_then(HookSource::parse);
    let hook = PrepareCommitMessage::new(
        args.file,
        source,
        args.commit_sha,
        branches,
        FileStore,
        config,
    );
    hook.run()
}

fn main() {
    let args = Args::parse();
    match run(args) {
        Ok(Outcome::Appended(token)) => eprintln!("storyhook: added {token}"),
        Ok(_) => {}
        Err(err) => {
            eprintln!("storyhook: {err:#}");
            process::exit(2);
        }
    }
}
