use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

const FILENAME: &str = ".storyhook.toml";

const DEFAULT_KEYWORDS: &[(&str, &str)] = &[
    ("complete", "Completes"),
    ("completes", "Completes"),
    ("deliver", "Delivers"),
    ("delivers", "Delivers"),
    ("bugfix", "Fixes"),
    ("fix", "Fixes"),
    ("fixes", "Fixes"),
    ("finish", "Finishes"),
    ("finishes", "Finishes"),
];

/// User-facing settings stored in `.storyhook.toml` at the repository root.
///
/// ```toml
/// min_story_digits = 5
///
/// [keywords]
/// hotfix = "Fixes"
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Minimum length of a digit run for it to count as a story number.
    #[serde(default = "default_min_story_digits")]
    pub min_story_digits: usize,

    /// Branch prefix (the segment before the first `/`) to action keyword.
    #[serde(default = "default_keywords")]
    pub keywords: BTreeMap<String, String>,
}

fn default_min_story_digits() -> usize {
    1
}

fn default_keywords() -> BTreeMap<String, String> {
    DEFAULT_KEYWORDS
        .iter()
        .map(|(prefix, keyword)| (prefix.to_string(), keyword.to_string()))
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_story_digits: default_min_story_digits(),
            keywords: default_keywords(),
        }
    }
}

impl Config {
    /// Load `.storyhook.toml` from `dir`. A missing file yields the defaults
    /// without creating anything — a hook must not write into the user's
    /// worktree on its own. Missing keys in an existing file are filled in
    /// with defaults via serde.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(FILENAME);
        match fs::read_to_string(&path) {
            Ok(contents) => {
                toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    /// Look up the action keyword for a branch prefix, case-insensitively.
    pub fn keyword_for(&self, prefix: &str) -> Option<&str> {
        self.keywords
            .get(&prefix.to_ascii_lowercase())
            .map(String::as_str)
    }
}
