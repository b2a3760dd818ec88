//! Directive upsert for line-oriented configuration files.
//!
//! A directive is a line of the form `KEYWORD value...`. Upserting rewrites
//! the text so that exactly one line carries the directive, leaving every
//! other line untouched:
//!
//! - If one or more lines (after trimming) start with the keyword, the first
//!   one is replaced and the rest are dropped.
//! - Otherwise the directive is appended, separated from non-blank trailing
//!   content by a single blank line.
//!
//! The result always ends with exactly one newline, so applying the same
//! upsert twice yields the same text as applying it once.
//!
//! Input lines may end in `\n`, `\r\n`, a bare `\r` or any of the other
//! Unicode line boundaries; output lines always end in `\n`.

/// Characters that end a line on their own.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Split `content` into lines without their terminators.
///
/// `\r\n` counts as one terminator and a trailing terminator does not
/// produce an empty last line.
pub fn split_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = content.char_indices().peekable();
    while let Some((index, c)) = chars.next() {
        if !LINE_BREAKS.contains(&c) {
            continue;
        }
        lines.push(&content[start..index]);
        start = index + c.len_utf8();
        if c == '\r' && chars.peek().is_some_and(|&(_, next)| next == '\n') {
            chars.next();
            start += 1;
        }
    }
    if start < content.len() {
        lines.push(&content[start..]);
    }
    lines
}

/// Upsert `new_line` into `current`, keyed on the first whitespace-delimited
/// token of `new_line`.
///
/// # Example
///
/// ```
/// use nut_setup::directive::upsert_directive;
///
/// let updated = upsert_directive("NOTIFYCMD /bin/old\nFOO=1\n", "NOTIFYCMD /bin/new");
/// assert_eq!(updated, "NOTIFYCMD /bin/new\nFOO=1\n");
/// ```
pub fn upsert_directive(current: &str, new_line: &str) -> String {
    let new_line = new_line.trim();
    let keyword = new_line.split_whitespace().next().unwrap_or("");
    upsert_directive_with_keyword(current, keyword, new_line)
}

/// Upsert `new_line` into `current`, matching lines that start with `keyword`.
///
/// An empty keyword never matches, so the line is appended.
pub fn upsert_directive_with_keyword(current: &str, keyword: &str, new_line: &str) -> String {
    let new_line = new_line.trim();
    let lines = split_lines(current);

    let is_match = |line: &str| !keyword.is_empty() && line.trim().starts_with(keyword);

    let mut output: Vec<&str> = Vec::with_capacity(lines.len() + 2);
    match lines.iter().position(|line| is_match(line)) {
        Some(first) => {
            for (index, line) in lines.iter().enumerate() {
                if index == first {
                    output.push(new_line);
                } else if !is_match(line) {
                    output.push(*line);
                }
            }
        }
        None => {
            output.extend(lines.iter().copied());
            if output.last().is_some_and(|last| !last.trim().is_empty()) {
                output.push("");
            }
            output.push(new_line);
        }
    }

    let mut result = output.join("\n");
    result.push('\n');
    result
}

/// Count lines whose trimmed content starts with `keyword`.
pub fn count_directives(content: &str, keyword: &str) -> usize {
    if keyword.is_empty() {
        return 0;
    }
    split_lines(content)
        .into_iter()
        .filter(|line| line.trim().starts_with(keyword))
        .count()
}
