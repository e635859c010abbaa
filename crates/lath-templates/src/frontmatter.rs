//! Front-matter extraction.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

/// Parsed key/value metadata from the top of a page template.
///
/// Keys are open-ended: anything a page declares flows through to its
/// render context unmodified, so this stays a plain string mapping rather
/// than a fixed schema.
pub type FrontMatter = HashMap<String, String>;

/// A block is recognized only when the source starts with a `---` line and
/// a closing `---` line follows before any other content.
fn block_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)\A---\s*\n(.*?)\n---\s*\n(.*)\z").expect("front-matter pattern is valid")
    })
}

/// Split an optional leading `---` delimited metadata block from `source`.
///
/// Returns the parsed key/value pairs and the remaining content. Block
/// lines split at the first colon, so values may themselves contain
/// colons; blank lines and lines without a colon are skipped. A source
/// without a well-formed leading block (the common case for layouts and
/// partials) comes back untouched: empty mapping, full text. Never fails.
pub fn extract(source: &str) -> (FrontMatter, &str) {
    let Some(caps) = block_pattern().captures(source) else {
        return (FrontMatter::new(), source);
    };

    let block = caps.get(1).map_or("", |m| m.as_str());
    let content = caps.get(2).map_or("", |m| m.as_str());

    let mut meta = FrontMatter::new();
    for line in block.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        meta.insert(key.trim().to_string(), value.trim().to_string());
    }

    (meta, content)
}
