//! The patch primitives themselves.
//!
//! All offsets are byte offsets into the buffer. Shader sources are
//! ASCII, and every anchor the stock catalog ships is a full line of
//! shader code, so byte arithmetic is safe here.

/// Replaces every occurrence of `search`. Fails when `search` is absent.
pub fn replace_all(text: &str, search: &str, replace: &str) -> Option<String> {
    if !text.contains(search) {
        return None;
    }
    Some(text.replace(search, replace))
}

/// Replaces only the first occurrence of `search`.
pub fn replace_first(text: &str, search: &str, replace: &str) -> Option<String> {
    let idx = text.find(search)?;
    Some(splice(text, idx, search.len(), replace))
}

/// Replaces only the second occurrence of `search`. Fails when fewer
/// than two occurrences exist.
pub fn replace_second(text: &str, search: &str, replace: &str) -> Option<String> {
    let first = text.find(search)?;
    let from = first + search.len();
    let idx = from + text[from..].find(search)?;
    Some(splice(text, idx, search.len(), replace))
}

/// Inserts `insert` directly after occurrences of `anchor`.
///
/// `skip` selects the first occurrence to patch, counted from one; zero
/// and one both mean the first. Every occurrence from there to the end
/// of the buffer receives the insertion. When `anchor` exists but has
/// fewer than `skip` occurrences the buffer is returned unchanged, and
/// that still counts as success.
pub fn add_after(text: &str, anchor: &str, insert: &str, skip: usize) -> Option<String> {
    let mut idx = text.find(anchor)?;
    for _ in 1..skip {
        match text[idx + anchor.len()..].find(anchor) {
            Some(next) => idx += anchor.len() + next,
            None => return Some(text.to_string()),
        }
    }

    let mut out = text.to_string();
    loop {
        out.insert_str(idx + anchor.len(), insert);
        let from = idx + anchor.len() + insert.len();
        match out[from..].find(anchor) {
            Some(next) => idx = from + next,
            None => break,
        }
    }
    Some(out)
}

/// Inserts `insert` in front of every occurrence of `anchor`.
///
/// The insertion point is one byte before the anchor start, saturating
/// at the start of the buffer. Preset files written by earlier releases
/// depend on that off-by-one offset, so it is kept as is.
pub fn add_before(text: &str, anchor: &str, insert: &str) -> Option<String> {
    let mut idx = text.find(anchor)?;
    let mut out = text.to_string();
    loop {
        out.insert_str(idx.saturating_sub(1), insert);
        let from = idx + insert.len() + anchor.len();
        match out[from..].find(anchor) {
            Some(next) => idx = from + next,
            None => break,
        }
    }
    Some(out)
}

/// Wraps the first occurrence of `span` in a `/* ... */` block comment.
pub fn comment_out(text: &str, span: &str) -> Option<String> {
    let idx = text.find(span)?;
    let mut out = String::with_capacity(text.len() + 6);
    out.push_str(&text[..idx]);
    out.push_str("/*");
    out.push_str(span);
    out.push_str("*/\r\n");
    out.push_str(&text[idx + span.len()..]);
    Some(out)
}

/// Comments out a region by opening a block comment at `start` and
/// closing it at the first occurrence of `end` in the opened buffer.
///
/// The closer lands before `end` when `include_end` is false and after
/// it otherwise. Both anchors are resolved before any text is built, so
/// a missing end anchor never leaves a half-opened comment behind.
pub fn comment_out_range(
    text: &str,
    start: &str,
    end: &str,
    include_end: bool,
) -> Option<String> {
    let open_at = text.find(start)?;
    let mut out = String::with_capacity(text.len() + 6);
    out.push_str(&text[..open_at]);
    out.push_str("/*");
    out.push_str(&text[open_at..]);

    let mut close_at = out.find(end)?;
    if include_end {
        close_at += end.len();
    }
    out.insert_str(close_at, "*/\r\n");
    Some(out)
}

fn splice(text: &str, at: usize, len: usize, replace: &str) -> String {
    let mut out = String::with_capacity(text.len() - len + replace.len());
    out.push_str(&text[..at]);
    out.push_str(replace);
    out.push_str(&text[at + len..]);
    out
}

#[cfg(test)]
mod test {
    use super::*;

    const SOURCE: &str = "float a = 1.0;\r\nfloat b = 2.0;\r\nfloat a = 1.0;\r\n";

    #[test]
    fn replace_all_rewrites_every_occurrence() {
        let out = replace_all(SOURCE, "float a = 1.0;", "float a = 3.0;").unwrap();
        assert_eq!(out, "float a = 3.0;\r\nfloat b = 2.0;\r\nfloat a = 3.0;\r\n");
    }

    #[test]
    fn replace_all_fails_without_a_match() {
        assert!(replace_all(SOURCE, "float c", "float d").is_none());
    }

    #[test]
    fn replace_first_leaves_later_occurrences_alone() {
        let out = replace_first(SOURCE, "float a = 1.0;", "float a = 3.0;").unwrap();
        assert_eq!(out, "float a = 3.0;\r\nfloat b = 2.0;\r\nfloat a = 1.0;\r\n");
    }

    #[test]
    fn replace_second_needs_two_occurrences() {
        let out = replace_second(SOURCE, "float a = 1.0;", "float a = 3.0;").unwrap();
        assert_eq!(out, "float a = 1.0;\r\nfloat b = 2.0;\r\nfloat a = 3.0;\r\n");
        assert!(replace_second(SOURCE, "float b = 2.0;", "x").is_none());
    }

    #[test]
    fn add_after_patches_every_occurrence_from_skip() {
        let out = add_after("a;a;a;", "a;", "X", 2).unwrap();
        assert_eq!(out, "a;a;Xa;X");
    }

    #[test]
    fn add_after_zero_and_one_skip_are_equivalent() {
        assert_eq!(
            add_after("a;b;a;", "a;", "X", 0),
            add_after("a;b;a;", "a;", "X", 1)
        );
    }

    #[test]
    fn add_after_past_last_occurrence_is_a_no_op_success() {
        let out = add_after("a;b;", "a;", "X", 5).unwrap();
        assert_eq!(out, "a;b;");
        assert!(add_after("b;", "a;", "X", 5).is_none());
    }

    #[test]
    fn add_before_lands_one_byte_early() {
        let out = add_before("xx ANCHOR yy", "ANCHOR", "<I>").unwrap();
        assert_eq!(out, "xx<I> ANCHOR yy");
    }

    #[test]
    fn add_before_saturates_at_buffer_start() {
        let out = add_before("ANCHOR tail", "ANCHOR", "<I>").unwrap();
        assert_eq!(out, "<I>ANCHOR tail");
    }

    #[test]
    fn add_before_patches_repeated_anchors() {
        let out = add_before("a ANCHOR b ANCHOR c", "ANCHOR", "<I>").unwrap();
        assert_eq!(out, "a<I> ANCHOR b<I> ANCHOR c");
    }

    #[test]
    fn comment_out_wraps_the_span() {
        let out = comment_out("keep; drop; keep;", "drop;").unwrap();
        assert_eq!(out, "keep; /*drop;*/\r\n keep;");
    }

    #[test]
    fn comment_out_range_excluding_end() {
        let out = comment_out_range("aa START mid END zz", "START", "END", false).unwrap();
        assert_eq!(out, "aa /*START mid */\r\nEND zz");
    }

    #[test]
    fn comment_out_range_including_end() {
        let out = comment_out_range("aa START mid END zz", "START", "END", true).unwrap();
        assert_eq!(out, "aa /*START mid END*/\r\n zz");
    }

    #[test]
    fn comment_out_range_missing_end_changes_nothing() {
        assert!(comment_out_range("aa START mid", "START", "END", false).is_none());
        assert!(comment_out_range("aa mid END", "START", "END", false).is_none());
    }
}
