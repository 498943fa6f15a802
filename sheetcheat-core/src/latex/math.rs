//! Math normalization
//!
//! Two best-effort repairs over generated math:
//!
//! - [`ensure_differential`] appends `\,d<var>` to integrals that forgot their
//!   differential. The variable comes from [`MathOptions::variable`]; the bound variable is
//!   never inferred.
//! - [`isolate_display_math`] moves display math (`\[..\]`, `$$..$$`) onto its own lines,
//!   which the preview renderer requires.
//!
//! Both are passthrough on anything they do not understand and both are idempotent.

use crate::latex::scanning::{find_command, find_unescaped};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// Integral operators whose spans are checked for a differential
const INTEGRALS: &[&str] = &["int", "iint", "iiint", "oint"];

/// `dx`, `\,dt`, `d\theta`, `\mathrm{d}x`; the `d` must not end a word or a command name
static DIFFERENTIAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^A-Za-z\\])d(?:[A-Za-z]|\\[A-Za-z]+)|\\mathrm\{d\}\s*(?:[A-Za-z]|\\[A-Za-z]+)")
        .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MathOptions {
    pub repair_differentials: bool,
    pub isolate_display: bool,
    /// Integration variable used by the differential repair
    pub variable: String,
}

impl Default for MathOptions {
    fn default() -> Self {
        MathOptions {
            repair_differentials: true,
            isolate_display: true,
            variable: "x".to_string(),
        }
    }
}

impl MathOptions {
    /// Whether any repair is switched on
    pub fn is_active(&self) -> bool {
        self.repair_differentials || self.isolate_display
    }
}

/// Append `\,d<var>` to every integral span lacking a differential
pub fn ensure_differential(text: &str, options: &MathOptions) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut search = 0;
    while let Some(op_end) = next_integral(text, search) {
        let span_end = span_terminator(text, op_end);
        let span = &text[op_end..span_end];
        if !DIFFERENTIAL.is_match(span) {
            let at = op_end + span.trim_end().len();
            out.push_str(&text[cursor..at]);
            out.push_str("\\,d");
            out.push_str(&options.variable);
            cursor = at;
        }
        search = span_end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// End of the earliest integral operator at or after `from`
fn next_integral(text: &str, from: usize) -> Option<usize> {
    INTEGRALS
        .iter()
        .filter_map(|name| find_command(text, name, from))
        .min_by_key(|found| found.start)
        .map(|found| found.end)
}

/// Where an integral span starting at `from` stops
fn span_terminator(text: &str, from: usize) -> usize {
    let bytes = text.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' | b'$' => return i,
            b'\\' => match bytes.get(i + 1) {
                Some(b']' | b')' | b'\\') => return i,
                _ if text[i..].starts_with("\\end{") => return i,
                _ => i += 2,
            },
            _ => i += 1,
        }
    }
    text.len()
}

/// Offsets of a display region and its delimiters
struct DisplayRegion {
    start: usize,
    content_start: usize,
    content_end: usize,
    end: usize,
}

/// Put display math delimiters and their trimmed content on their own lines
///
/// Returns the input unchanged when any display region is unbalanced.
pub fn isolate_display_math(text: &str) -> String {
    let Some(regions) = display_regions(text) else {
        return text.to_string();
    };
    if regions.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + regions.len() * 4);
    let mut cursor = 0;
    for region in regions {
        out.push_str(text[cursor..region.start].trim_end_matches([' ', '\t']));
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&text[region.start..region.content_start]);
        out.push('\n');
        out.push_str(text[region.content_start..region.content_end].trim());
        out.push('\n');
        out.push_str(&text[region.content_end..region.end]);
        out.push('\n');
        let rest = &text[region.end..];
        let after_space = rest.len() - rest.trim_start_matches([' ', '\t']).len();
        cursor = region.end + after_space;
        if text[cursor..].starts_with('\n') {
            cursor += 1;
        }
    }
    out.push_str(&text[cursor..]);
    out
}

/// Display regions in order, `None` when one of them never closes
fn display_regions(text: &str) -> Option<Vec<DisplayRegion>> {
    let bytes = text.as_bytes();
    let mut regions = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => match bytes.get(i + 1) {
                Some(b'[') => {
                    let close = find_unescaped(text, i + 2, "\\]")?;
                    regions.push(DisplayRegion {
                        start: i,
                        content_start: i + 2,
                        content_end: close,
                        end: close + 2,
                    });
                    i = close + 2;
                }
                Some(b'(') => {
                    i = find_unescaped(text, i + 2, "\\)").map_or(i + 2, |close| close + 2);
                }
                _ => i += 2,
            },
            b'$' if bytes.get(i + 1) == Some(&b'$') => {
                let close = find_unescaped(text, i + 2, "$$")?;
                regions.push(DisplayRegion {
                    start: i,
                    content_start: i + 2,
                    content_end: close,
                    end: close + 2,
                });
                i = close + 2;
            }
            b'$' => {
                i = find_unescaped(text, i + 1, "$").map_or(i + 1, |close| close + 1);
            }
            _ => i += 1,
        }
    }
    Some(regions)
}
