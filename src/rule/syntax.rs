//! Splitting rule and condition text at the top level.
//!
//! Everything inside `[...]`, `(...)` and `{...}` is opaque here, so bracket
//! specs such as `[hgt>1, +son]` never split a rule.

/// Bracket depth after reading `ch`
fn depth_after(depth: usize, ch: char) -> usize {
    match ch {
        '[' | '(' | '{' => depth + 1,
        ']' | ')' | '}' => depth.saturating_sub(1),
        _ => depth,
    }
}

/// Split at the first top-level occurrence of `separator`
pub(crate) fn split_once_top(text: &str, separator: char) -> Option<(&str, &str)> {
    let mut depth = 0;
    for (i, ch) in text.char_indices() {
        if ch == separator && depth == 0 {
            return Some((&text[..i], &text[i + ch.len_utf8()..]));
        }
        depth = depth_after(depth, ch);
    }
    None
}

/// Whitespace split that keeps bracketed text together
pub(crate) fn split_whitespace_top(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0;
    let mut start: Option<usize> = None;
    for (i, ch) in text.char_indices() {
        if ch.is_whitespace() && depth == 0 {
            if let Some(s) = start.take() {
                out.push(&text[s..i]);
            }
            continue;
        }
        if start.is_none() {
            start = Some(i);
        }
        depth = depth_after(depth, ch);
    }
    if let Some(s) = start {
        out.push(&text[s..]);
    }
    out
}

/// Split on a whitespace-delimited keyword such as `OR` or `NOT`
pub(crate) fn split_keyword<'a>(text: &'a str, keyword: &str) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut depth = 0;
    let mut last = 0;
    let mut chars = text.char_indices().peekable();
    let mut previous_is_space = true;

    while let Some((i, ch)) = chars.next() {
        if depth == 0 && previous_is_space && text[i..].starts_with(keyword) {
            let end = i + keyword.len();
            let followed_by_space = text[end..].chars().next().is_none_or(char::is_whitespace);
            if followed_by_space {
                out.push(text[last..i].trim());
                last = end;
                while chars.peek().is_some_and(|&(j, _)| j < end) {
                    chars.next();
                }
                previous_is_space = false;
                continue;
            }
        }
        previous_is_space = ch.is_whitespace();
        depth = depth_after(depth, ch);
    }
    out.push(text[last..].trim());
    out
}

/// Collapse runs of whitespace and drop padding just inside delimiters
pub(crate) fn cleanup(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut out = String::with_capacity(collapsed.len());
    let mut chars = collapsed.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == ' ' {
            let after_open = out.ends_with(['[', '{', '(']);
            let before_close = chars.peek().is_some_and(|c| matches!(c, ']' | '}' | ')'));
            if after_open || before_close {
                continue;
            }
        }
        out.push(ch);
    }
    out
}
