//! Raw payload sanitizing
//!
//! The generative service answers with LaTeX wrapped in all kinds of noise: markdown code
//! fences, editor magic comments (`% !TEX program = ...`), a byte-order mark, line endings
//! escaped as literal `\n`, and the sentinel line the prompt asks for. It also likes to
//! reach for `titlesec`, which the document skeleton does not support.
//!
//! [`sanitize`] strips all of that. One pass runs these steps in order:
//!
//! 1. BOM removal and line ending normalization (escaped endings are decoded only when the
//!    payload has no real line break at all and at least one `\n` is not the start of a
//!    control word, so `\neq` survives)
//! 2. forbidden directive removal, then noise line dropping
//! 3. outer trim
//! 4. sentinel line removal
//!
//! Passes repeat until the text stops changing (every pass but the first one that changes
//! anything makes the text shorter), so the result is idempotent:
//! `sanitize(&sanitize(x)) == sanitize(x)`.
//!
//! Forbidden directives are declared in [`FORBIDDEN_DIRECTIVES`]. Adding one is a matter of
//! adding a row; the removal code does not know any directive by name.

use crate::latex::scanning::{
    find_command, group_end, read_argument, skip_argument_space, skip_groups, whole_line_span,
    CommandMatch,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// First line marker of a generated payload
pub const SENTINEL: &str = "COOR-BO-ZY";

/// How a forbidden directive is taken out of the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalRule {
    /// Remove the named package from an import list; the whole directive goes when the
    /// list ends up empty
    DropPackage(&'static str),
    /// Remove the command together with every `{..}`/`[..]` group that follows it
    DropCommand,
}

/// A row of the forbidden directive table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForbiddenDirective {
    /// Control sequence name without the backslash
    pub name: &'static str,
    pub rule: RemovalRule,
}

/// Directives the document skeleton cannot accept
pub static FORBIDDEN_DIRECTIVES: &[ForbiddenDirective] = &[
    ForbiddenDirective {
        name: "usepackage",
        rule: RemovalRule::DropPackage("titlesec"),
    },
    ForbiddenDirective {
        name: "RequirePackage",
        rule: RemovalRule::DropPackage("titlesec"),
    },
    ForbiddenDirective {
        name: "titleformat",
        rule: RemovalRule::DropCommand,
    },
    ForbiddenDirective {
        name: "titlespacing",
        rule: RemovalRule::DropCommand,
    },
];

/// Code fences and `% !TEX` magic comments
static NOISE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:```|%\s*!TEX)").unwrap());

/// A literal `\n` that cannot be the start of a control word like `\neq`
static ESCAPED_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\n(?:[^A-Za-z]|$)").unwrap());

/// Sanitize a raw payload with the default forbidden directive table
pub fn sanitize(raw: &str) -> String {
    sanitize_with(raw, FORBIDDEN_DIRECTIVES)
}

/// Sanitize a raw payload with a custom forbidden directive table
pub fn sanitize_with(raw: &str, table: &[ForbiddenDirective]) -> String {
    let mut text = raw.to_string();
    loop {
        let next = sanitize_pass(&text, table);
        if next == text {
            return next;
        }
        text = next;
    }
}

fn sanitize_pass(text: &str, table: &[ForbiddenDirective]) -> String {
    let text = normalize_line_endings(&text.replace('\u{feff}', ""));
    let text = drop_noise_lines(&remove_directives(&text, table));
    strip_sentinel(text.trim()).to_string()
}

fn normalize_line_endings(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    if !text.contains('\n') && ESCAPED_BREAK.is_match(&text) {
        text.replace("\\r\\n", "\n").replace("\\n", "\n")
    } else {
        text
    }
}

fn drop_noise_lines(text: &str) -> String {
    text.split('\n')
        .filter(|line| !NOISE_LINE.is_match(line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_sentinel(mut text: &str) -> &str {
    loop {
        let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
        if first.trim_end() != SENTINEL {
            return text;
        }
        text = rest.trim();
    }
}

fn remove_directives(text: &str, table: &[ForbiddenDirective]) -> String {
    table.iter().fold(text.to_string(), |text, directive| {
        remove_directive(&text, directive)
    })
}

fn remove_directive(text: &str, directive: &ForbiddenDirective) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut search = 0;
    while let Some(found) = find_command(text, directive.name, search) {
        search = found.end;
        let edit = match directive.rule {
            RemovalRule::DropCommand => Some((skip_groups(text, found.end), String::new())),
            RemovalRule::DropPackage(package) => drop_package(text, found, package),
        };
        let Some((end, replacement)) = edit else {
            continue;
        };
        let (start, end) = if replacement.is_empty() {
            whole_line_span(text, found.start, end)
        } else {
            (found.start, end)
        };
        out.push_str(&text[cursor..start]);
        out.push_str(&replacement);
        cursor = end;
        search = end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Rewrite `\usepackage[opts]{a,b}` without `package`
///
/// Returns the end of the directive and its replacement, `None` when the directive does
/// not import the package (or is too malformed to tell).
fn drop_package(text: &str, found: CommandMatch, package: &str) -> Option<(usize, String)> {
    let mut pos = skip_argument_space(text, found.end);
    let mut options = "";
    if text.as_bytes().get(pos) == Some(&b'[') {
        let end = group_end(text, pos)?;
        options = &text[pos..end];
        pos = end;
    }
    let (list, end) = read_argument(text, pos)?;
    let names: Vec<&str> = list
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();
    if !names.iter().any(|name| name.eq_ignore_ascii_case(package)) {
        return None;
    }
    let kept: Vec<&str> = names
        .into_iter()
        .filter(|name| !name.eq_ignore_ascii_case(package))
        .collect();
    if kept.is_empty() {
        return Some((end, String::new()));
    }
    let command = &text[found.start..found.end];
    Some((end, format!("{command}{options}{{{}}}", kept.join(","))))
}
