//! Single-rule literal find-and-replace pass.
//!
//! The matcher honors the rule's matcher options but is otherwise dumb:
//! `from` is matched verbatim (no regex metacharacters), the scan is
//! left-to-right and non-overlapping, and after a match is replaced the
//! scan resumes *after* the inserted replacement so a rule can never match
//! inside its own output within the same pass.
//!
//! Case-insensitive matching compares per-character lowercase foldings of
//! the pattern and the candidate window, so the fold is consistent across
//! the whole file; the replacement always inserts the exact `to` with no
//! case preservation. Whole-word matching requires the characters adjacent
//! to the match to be non-word characters (ASCII letter, digit, or `_`
//! count as word characters); the missing neighbor at the start or end of
//! the content is treated as a boundary.
//!
//! The matcher is total for validated rules: it cannot fail at runtime.

use crate::core::rules::Rule;

/// Byte span of one accepted match in the *input* content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    /// Byte offset of the first matched byte.
    pub start: usize,
    /// Byte offset one past the last matched byte.
    pub end: usize,
}

/// Outcome of one find-and-replace pass over a content value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacePass {
    /// Content with every accepted match replaced.
    pub output: String,
    /// Number of substitutions performed.
    pub count: usize,
    /// Spans of the accepted matches, in scan order, relative to the
    /// input content. Ephemeral: valid only against the pass input.
    pub spans: Vec<MatchSpan>,
}

/// Apply one rule to `content`, replacing every accepted occurrence.
///
/// Returns the rewritten content together with the match count and spans.
/// The input is returned unchanged (zero count) when it is empty.
pub fn find_and_replace(content: &str, rule: &Rule) -> ReplacePass {
    if content.is_empty() {
        return ReplacePass {
            output: String::new(),
            count: 0,
            spans: Vec::new(),
        };
    }

    let mut output = String::with_capacity(content.len());
    let mut spans = Vec::new();
    let mut cursor = 0usize;

    while cursor < content.len() {
        match next_match(content, cursor, rule) {
            Some(span) => {
                output.push_str(&content[cursor..span.start]);
                output.push_str(&rule.to);
                cursor = span.end;
                spans.push(span);
            }
            None => {
                output.push_str(&content[cursor..]);
                break;
            }
        }
    }

    ReplacePass {
        output,
        count: spans.len(),
        spans,
    }
}

/// Find the next accepted match at or after `from_idx`.
fn next_match(content: &str, from_idx: usize, rule: &Rule) -> Option<MatchSpan> {
    // Fast path: case-sensitive without the word constraint is plain
    // substring search.
    if rule.case_sensitive && !rule.whole_word {
        return content[from_idx..].find(&rule.from).map(|i| MatchSpan {
            start: from_idx + i,
            end: from_idx + i + rule.from.len(),
        });
    }

    let tail = &content[from_idx..];
    for (offset, _) in tail.char_indices() {
        let candidate = &tail[offset..];
        let matched_len = if rule.case_sensitive {
            candidate.starts_with(&rule.from).then_some(rule.from.len())
        } else {
            folded_prefix_len(candidate, &rule.from)
        };
        if let Some(len) = matched_len {
            let start = from_idx + offset;
            let end = start + len;
            if !rule.whole_word || is_word_bounded(content, start, end) {
                return Some(MatchSpan { start, end });
            }
            // Rejected by the word constraint: keep scanning from the
            // next character, overlapping candidates stay eligible.
        }
    }
    None
}

/// Length in bytes of the prefix of `haystack` that case-folds to
/// `needle`, or `None` when the foldings diverge.
///
/// Both sides fold character by character through [`char::to_lowercase`]
/// and the flattened sequences are compared. A candidate whose final
/// character folds past the end of the needle is rejected rather than
/// partially matched.
fn folded_prefix_len(haystack: &str, needle: &str) -> Option<usize> {
    let mut expected = needle.chars().flat_map(char::to_lowercase);
    let mut pending = expected.next();
    let mut consumed = 0usize;

    for ch in haystack.chars() {
        pending?;
        for folded in ch.to_lowercase() {
            match pending {
                Some(want) if want == folded => pending = expected.next(),
                _ => return None,
            }
        }
        consumed += ch.len_utf8();
        if pending.is_none() {
            return Some(consumed);
        }
    }
    None
}

/// ASCII letters, digits, and underscore form words.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// True when neither neighbor of `[start, end)` is a word character.
fn is_word_bounded(content: &str, start: usize, end: usize) -> bool {
    let before_ok = content[..start]
        .chars()
        .next_back()
        .is_none_or(|c| !is_word_char(c));
    let after_ok = content[end..].chars().next().is_none_or(|c| !is_word_char(c));
    before_ok && after_ok
}
