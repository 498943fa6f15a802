//! Identity enforcement: title and attribution footer
//!
//! Every cheat sheet carries the same identity block regardless of what the generator
//! wrote: a single `\title{<prefix>: <topic>}`, a single `\maketitle`, and an attribution
//! footer right before `\end{document}`. Both [`enforce_title`] and [`inject_footer`] are
//! idempotent, so running the pipeline over an already normalized document is a no-op.

use crate::latex::document::{BEGIN_DOCUMENT, END_DOCUMENT};
use crate::latex::scanning::{find_command, group_end, skip_argument_space, whole_line_span};
use serde::Deserialize;

/// Identity block configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Identity {
    pub title_prefix: String,
    /// Used when the requested topic is blank
    pub default_topic: String,
    /// Footer text, typeset in `\scriptsize`
    pub attribution: String,
}

impl Default for Identity {
    fn default() -> Self {
        Identity {
            title_prefix: "Sheet Cheat".to_string(),
            default_topic: "Tema".to_string(),
            attribution: "Generado con Sheet Cheat".to_string(),
        }
    }
}

impl Identity {
    /// `"<prefix>: <topic>"`
    pub fn title_payload(&self, topic: &str) -> String {
        let topic = topic.trim();
        let topic = if topic.is_empty() {
            self.default_topic.trim()
        } else {
            topic
        };
        format!("{}: {}", self.title_prefix, topic)
    }

    pub fn title_directive(&self, topic: &str) -> String {
        format!("\\title{{{}}}", self.title_payload(topic))
    }

    pub fn footer(&self) -> String {
        format!(
            "\n\\vspace{{1em}}\n\\begin{{center}}\\scriptsize {}\\end{{center}}\n",
            self.attribution
        )
    }
}

/// Make the document carry exactly one title directive for `topic` and one `\maketitle`
pub fn enforce_title(doc: &str, topic: &str, identity: &Identity) -> String {
    let directive = identity.title_directive(topic);
    let mut text = doc.to_string();
    let title_start = match title_span(&text, 0) {
        Some((start, end)) => {
            // an unbalanced topic makes the span differ from the directive we wrote
            if !text[start..].starts_with(&directive) {
                text.replace_range(start..end, &directive);
            }
            text = remove_titles(&text, start + directive.len());
            start
        }
        None => insert_title(&mut text, &directive),
    };
    ensure_single_maketitle(text, title_start + directive.len())
}

/// Insert the attribution footer before `\end{document}` unless it is already there
pub fn inject_footer(doc: &str, identity: &Identity) -> String {
    let footer = identity.footer();
    if doc.contains(&footer) {
        return doc.to_string();
    }
    match doc.find(END_DOCUMENT) {
        Some(idx) => {
            let mut text = doc.to_string();
            text.insert_str(idx, &footer);
            text
        }
        None => format!("{doc}{footer}"),
    }
}

/// Span of the next `\title[..]{..}` directive at or after `from`
///
/// An unbalanced argument runs to the end of its line.
fn title_span(text: &str, from: usize) -> Option<(usize, usize)> {
    let found = find_command(text, "title", from)?;
    let bytes = text.as_bytes();
    let mut pos = skip_argument_space(text, found.end);
    if bytes.get(pos) == Some(&b'[') {
        if let Some(end) = group_end(text, pos) {
            pos = skip_argument_space(text, end);
        }
    }
    if bytes.get(pos) != Some(&b'{') {
        return Some((found.start, found.end));
    }
    let end = group_end(text, pos).unwrap_or_else(|| {
        text[pos..]
            .find('\n')
            .map(|offset| pos + offset)
            .unwrap_or(text.len())
    });
    Some((found.start, end))
}

fn remove_titles(text: &str, from: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut search = from;
    while let Some((start, end)) = title_span(text, search) {
        let (start, end) = whole_line_span(text, start, end);
        out.push_str(&text[cursor..start]);
        cursor = end;
        search = end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Insert the title where the document expects it; returns where it landed
fn insert_title(text: &mut String, directive: &str) -> usize {
    if let Some(found) = find_command(text, "maketitle", 0) {
        text.insert_str(found.start, &format!("{directive}\n"));
        return found.start;
    }
    let mut block = format!("{directive}\n");
    if find_command(text, "author", 0).is_none() {
        block.push_str("\\author{}\n");
    }
    if find_command(text, "date", 0).is_none() {
        block.push_str("\\date{}\n");
    }
    block.push_str("\\maketitle\n");
    match text.find(BEGIN_DOCUMENT) {
        Some(idx) => {
            let at = idx + BEGIN_DOCUMENT.len();
            text.insert_str(at, &format!("\n{block}"));
            at + 1
        }
        None => {
            text.insert_str(0, &block);
            0
        }
    }
}

fn ensure_single_maketitle(mut text: String, title_end: usize) -> String {
    let Some(first) = find_command(&text, "maketitle", 0) else {
        let at = match text.find(BEGIN_DOCUMENT) {
            Some(idx) if title_end <= idx => idx + BEGIN_DOCUMENT.len(),
            _ => title_end,
        };
        text.insert_str(at, "\n\\maketitle");
        return text;
    };
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut search = first.end;
    while let Some(extra) = find_command(&text, "maketitle", search) {
        let (start, end) = whole_line_span(&text, extra.start, extra.end);
        out.push_str(&text[cursor..start]);
        cursor = end;
        search = end;
    }
    out.push_str(&text[cursor..]);
    out
}
