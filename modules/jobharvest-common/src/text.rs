use regex::Regex;
use std::sync::LazyLock;

static HASHTAG_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\S+\s*").unwrap());
static HASHTAG_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bhashtag\b").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strip hashtag noise from scraped post text: `#word` tokens and the bare
/// marker word "hashtag" that the feed markup leaves behind, then collapse
/// whitespace runs and trim.
pub fn clean_text(text: &str) -> String {
    let text = HASHTAG_TOKEN_RE.replace_all(text, "");
    let text = HASHTAG_WORD_RE.replace_all(&text, "");
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}

/// Collapse repeated words, keeping first occurrences in order. The feed
/// renders the actor name and headline twice (visible plus screen-reader
/// span), which doubles every word when the element text is read back.
pub fn dedup_words(text: &str) -> String {
    let mut seen = std::collections::HashSet::new();
    let mut words = Vec::new();
    for word in text.split_whitespace() {
        if seen.insert(word) {
            words.push(word);
        }
    }
    words.join(" ")
}
