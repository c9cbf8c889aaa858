use crate::config::Config;

/// A tracker story extracted from a branch name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryReference {
    /// The story number, kept as a string so leading zeros survive.
    pub number: String,
    /// Action keyword mapped from the branch prefix (e.g. `fix/` → "Fixes").
    pub keyword: Option<String>,
}

/// Map a branch name to a story reference, if it carries one.
///
/// The story number is the first maximal run of ASCII digits in the branch
/// name that is at least `min_story_digits` long; shorter runs are skipped
/// and the scan continues. The keyword comes from looking up the segment
/// before the first `/` in the configured prefix table. A keyword without a
/// story number resolves to nothing.
pub fn resolve(branch: &str, config: &Config) -> Option<StoryReference> {
    let number = story_number(branch, config.min_story_digits)?;
    let keyword = branch
        .split('/')
        .next()
        .and_then(|prefix| config.keyword_for(prefix))
        .map(String::from);
    Some(StoryReference { number, keyword })
}

fn story_number(branch: &str, min_digits: usize) -> Option<String> {
    let bytes = branch.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i - start >= min_digits {
                return Some(branch[start..i].to_string());
            }
        } else {
            i += 1;
        }
    }
    None
}
