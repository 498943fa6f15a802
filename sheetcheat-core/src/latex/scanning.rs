//! Byte-level scanning helpers for LaTeX control sequences
//!
//! None of the passes in this crate parse LaTeX. They locate a handful of control
//! sequences, their argument groups and environment boundaries, and rewrite the text around
//! them. These helpers are the shared vocabulary for that: every returned offset points at
//! an ASCII byte (a backslash, a brace, a bracket) or one past it, so slicing the source
//! with them is always on a char boundary.
//!
//! All helpers return `None` instead of failing when the markup is unbalanced; callers
//! decide what passthrough means for them.

/// A control sequence occurrence such as `\title` or `\titleformat*`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandMatch {
    /// Offset of the backslash
    pub start: usize,
    /// Offset just after the name (and the star, when present)
    pub end: usize,
    pub starred: bool,
}

/// `\begin{name}` or `\end{name}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Begin,
    End,
}

/// An environment boundary marker with its name argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvMarker<'a> {
    pub kind: MarkerKind,
    pub name: &'a str,
    pub start: usize,
    pub end: usize,
}

/// A balanced environment region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Environment<'a> {
    pub name: &'a str,
    /// Offset of the `\begin` backslash
    pub start: usize,
    /// Offset just after `\begin{name}`
    pub content_start: usize,
    /// Offset of the matching `\end` backslash
    pub content_end: usize,
    /// Offset just after `\end{name}`
    pub end: usize,
}

impl<'a> Environment<'a> {
    pub fn content<'t>(&self, text: &'t str) -> &'t str {
        &text[self.content_start..self.content_end]
    }
}

/// Whether the byte at `pos` is preceded by an odd number of backslashes
pub fn is_escaped(text: &str, pos: usize) -> bool {
    let bytes = text.as_bytes();
    let mut count = 0;
    let mut i = pos;
    while i > 0 && bytes[i - 1] == b'\\' {
        count += 1;
        i -= 1;
    }
    count % 2 == 1
}

/// Find the next `\name` at or after `from`
///
/// The match must not continue with another letter (`\title` does not match
/// `\titleformat`) and must not be an escaped backslash (`\\title` is a line break
/// followed by text).
pub fn find_command(text: &str, name: &str, from: usize) -> Option<CommandMatch> {
    let needle = format!("\\{name}");
    let bytes = text.as_bytes();
    let mut search = from;
    while let Some(offset) = text.get(search..)?.find(&needle) {
        let start = search + offset;
        let mut end = start + needle.len();
        search = start + 1;
        if is_escaped(text, start) {
            continue;
        }
        if bytes.get(end).is_some_and(|b| b.is_ascii_alphabetic()) {
            continue;
        }
        let starred = bytes.get(end) == Some(&b'*');
        if starred {
            end += 1;
        }
        return Some(CommandMatch {
            start,
            end,
            starred,
        });
    }
    None
}

/// Skip the whitespace that may separate a command from its arguments
///
/// At most one line break is crossed: a blank line ends the argument list.
pub fn skip_argument_space(text: &str, pos: usize) -> usize {
    let bytes = text.as_bytes();
    let mut i = pos;
    let mut crossed_newline = false;
    while let Some(&b) = bytes.get(i) {
        match b {
            b' ' | b'\t' => i += 1,
            b'\n' if !crossed_newline => {
                crossed_newline = true;
                i += 1;
            }
            _ => break,
        }
    }
    i
}

/// End offset (exclusive) of the `{...}` or `[...]` group opening at `pos`
///
/// Braces nest and escaped braces are skipped. Inside a `[...]` group brackets only count
/// outside of braces, so `[a{]}b]` is a single group.
pub fn group_end(text: &str, pos: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let bracket = match bytes.get(pos)? {
        b'{' => false,
        b'[' => true,
        _ => return None,
    };
    let mut depth = 0usize;
    let mut braces = 0usize;
    let mut i = pos;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\\' {
            i += 2;
            continue;
        }
        if bracket {
            match b {
                b'{' => braces += 1,
                b'}' => braces = braces.saturating_sub(1),
                b'[' if braces == 0 => depth += 1,
                b']' if braces == 0 => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i + 1);
                    }
                }
                _ => {}
            }
        } else {
            match b {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i + 1);
                    }
                }
                _ => {}
            }
        }
        i += 1;
    }
    None
}

/// Read the mandatory `{...}` argument following `pos`, skipping argument space
///
/// Returns the inner text and the offset after the closing brace.
pub fn read_argument(text: &str, pos: usize) -> Option<(&str, usize)> {
    let open = skip_argument_space(text, pos);
    let end = group_end(text, open)?;
    if text.as_bytes()[open] != b'{' {
        return None;
    }
    Some((&text[open + 1..end - 1], end))
}

/// Skip every `{...}` / `[...]` group directly following `pos`
///
/// Returns the offset after the last consumed group, or `pos` when none follows. An
/// unbalanced group stops the scan.
pub fn skip_groups(text: &str, pos: usize) -> usize {
    let mut end = pos;
    loop {
        let open = skip_argument_space(text, end);
        match group_end(text, open) {
            Some(next) => end = next,
            None => return end,
        }
    }
}

/// Grow the span `start..end` to whole lines when nothing else lives on them
///
/// The trailing line break is included.
pub fn whole_line_span(text: &str, start: usize, end: usize) -> (usize, usize) {
    let line_start = text[..start].rfind('\n').map(|idx| idx + 1).unwrap_or(0);
    let line_end = text[end..].find('\n').map(|offset| end + offset);
    let tail_end = line_end.unwrap_or(text.len());
    if !text[line_start..start].trim().is_empty() || !text[end..tail_end].trim().is_empty() {
        return (start, end);
    }
    match line_end {
        Some(newline) => (line_start, newline + 1),
        None => (line_start, text.len()),
    }
}

/// Offset of the next `delimiter` at or after `from` that is not escaped
///
/// A backslash consumes the byte after it, so `\$` never matches `$` and `\\]` never
/// matches `\]`.
pub fn find_unescaped(text: &str, from: usize, delimiter: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        if bytes[i..].starts_with(delimiter.as_bytes()) {
            return Some(i);
        }
        i += if bytes[i] == b'\\' { 2 } else { 1 };
    }
    None
}

/// Next `\begin{..}` or `\end{..}` at or after `from`
pub fn next_env_marker(text: &str, from: usize) -> Option<EnvMarker<'_>> {
    let mut search = from;
    loop {
        let begin = find_command(text, "begin", search);
        let end = find_command(text, "end", search);
        let (kind, found) = match (begin, end) {
            (Some(b), Some(e)) if b.start < e.start => (MarkerKind::Begin, b),
            (_, Some(e)) => (MarkerKind::End, e),
            (Some(b), None) => (MarkerKind::Begin, b),
            (None, None) => return None,
        };
        match read_argument(text, found.end) {
            Some((name, after)) => {
                return Some(EnvMarker {
                    kind,
                    name: name.trim(),
                    start: found.start,
                    end: after,
                })
            }
            None => search = found.end,
        }
    }
}

/// Offsets of the `\end{name}` balancing a `\begin{name}` whose content starts at `from`
///
/// Returns `(end_marker_start, end_marker_end)`.
pub fn matching_end(text: &str, name: &str, from: usize) -> Option<(usize, usize)> {
    let mut depth = 1usize;
    let mut search = from;
    while let Some(marker) = next_env_marker(text, search) {
        search = marker.end;
        if marker.name != name {
            continue;
        }
        match marker.kind {
            MarkerKind::Begin => depth += 1,
            MarkerKind::End => {
                depth -= 1;
                if depth == 0 {
                    return Some((marker.start, marker.end));
                }
            }
        }
    }
    None
}

/// Next balanced environment with one of `names`, at or after `from`
///
/// `Err(start)` reports a `\begin` of a wanted environment that never closes.
pub fn next_environment<'a>(
    text: &'a str,
    names: &[&str],
    from: usize,
) -> Option<Result<Environment<'a>, usize>> {
    let mut search = from;
    while let Some(marker) = next_env_marker(text, search) {
        search = marker.end;
        if marker.kind != MarkerKind::Begin || !names.contains(&marker.name) {
            continue;
        }
        return Some(match matching_end(text, marker.name, marker.end) {
            Some((content_end, end)) => Ok(Environment {
                name: marker.name,
                start: marker.start,
                content_start: marker.end,
                content_end,
                end,
            }),
            None => Err(marker.start),
        });
    }
    None
}
