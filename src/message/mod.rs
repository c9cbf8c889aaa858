/// The commit message text git has prepared. File I/O stays behind the
/// `MessageStore` collaborator, so everything here is a pure string
/// transformation.
#[derive(Debug)]
pub struct CommitMessage {
    text: String,
}

impl CommitMessage {
    pub fn new(text: String) -> Self {
        Self { text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// True iff `#<story>` already appears as a complete token: the digits
    /// must directly follow a `#` and must not be followed by a further
    /// digit, so `[#86753090]` is not a mention of story `8675309`.
    pub fn mentions_story(&self, story: &str) -> bool {
        for (i, _) in self.text.match_indices('#') {
            let rest = &self.text[i + 1..];
            if rest.starts_with(story) {
                match rest.as_bytes().get(story.len()) {
                    Some(b) if b.is_ascii_digit() => continue,
                    _ => return true,
                }
            }
        }
        false
    }

    /// Append `token` on its own line after the message body.
    ///
    /// The file git prepares usually ends in a `#`-comment block ("Please
    /// enter the commit message…", scissors line, verbose diff). The token
    /// is inserted before the first comment line so it lands in the part of
    /// the message git keeps. Performs no deduplication; the caller checks
    /// `mentions_story` first and calls this at most once per run.
    pub fn append(&mut self, token: &str) {
        let (body, comments) = split_on_comments(&self.text);
        let body = body.trim_end();
        let mut out = String::with_capacity(body.len() + token.len() + comments.len() + 2);
        if !body.is_empty() {
            out.push_str(body);
            out.push('\n');
        }
        out.push_str(token);
        out.push('\n');
        out.push_str(comments);
        self.text = out;
    }
}

/// Split the message at the first comment line. git comments always start at
/// column zero, so an inline `#` in the body is never mistaken for one.
fn split_on_comments(text: &str) -> (&str, &str) {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.starts_with('#') {
            return (&text[..offset], &text[offset..]);
        }
        offset += line.len();
    }
    (text, "")
}
