//! LaTeX → display tree conversion
//!
//! Generated cheat sheets use a small, predictable subset of LaTeX. This module recognizes
//! that subset with the core scanning helpers and builds a [`DisplayDocument`]; anything it
//! does not recognize stays in the text as written. Unbalanced regions are never an error:
//! they are left as literal text, except list markers, which are turned into line breaks
//! and bullets so no raw list directive shows up in a preview.
//!
//! Ordered lists are labelled by position: the first `enumerate` region of a document is
//! numbered and every later one lettered. The counter lives in a [`ConversionState`] that
//! is created for each conversion and passed down explicitly.

use crate::ir::nodes::{
    DisplayDocument, DisplayNode, Inline, ListItem, ListKind, ListNode, HEADING_LEVEL,
};
use sheetcheat_core::latex::scanning::{
    find_command, find_unescaped, group_end, matching_end, next_env_marker, read_argument,
    skip_argument_space, skip_groups, MarkerKind,
};
use sheetcheat_core::latex::Document;

/// Environments rendered as lists
const LIST_ENVIRONMENTS: &[&str] = &["itemize", "enumerate"];

/// Math environments rendered as display math, with the wrapper their body needs
const MATH_ENVIRONMENTS: &[(&str, Option<&str>)] = &[
    ("equation", None),
    ("equation*", None),
    ("gather", None),
    ("gather*", None),
    ("displaymath", None),
    ("align", Some("aligned")),
    ("align*", Some("aligned")),
];

/// Commands removed together with their argument groups
const DROPPED_WITH_ARGUMENTS: &[&str] = &[
    "title", "author", "date", "vspace", "hspace", "tcbset", "setlength", "label",
];

/// Commands removed on their own
const DROPPED: &[&str] = &[
    "maketitle",
    "noindent",
    "scriptsize",
    "footnotesize",
    "small",
    "large",
    "Large",
    "centering",
    "smallskip",
    "medskip",
    "bigskip",
    "newpage",
    "clearpage",
    "hfill",
    "par",
];

/// Per-conversion state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionState {
    /// Ordered list regions met so far, in document order
    pub enum_depth_seen: usize,
}

impl ConversionState {
    fn next_list_kind(&mut self) -> ListKind {
        self.enum_depth_seen += 1;
        if self.enum_depth_seen == 1 {
            ListKind::TopLevelItem
        } else {
            ListKind::SubItem
        }
    }
}

/// Convert a document with a fresh state
pub fn to_display_tree(doc: &Document) -> DisplayDocument {
    convert(doc, &mut ConversionState::default())
}

/// Convert a document, threading `state` through the scan
pub fn convert(doc: &Document, state: &mut ConversionState) -> DisplayDocument {
    let mut blocks = Vec::new();
    if let Some(title) = find_title(doc.as_str()) {
        blocks.push(DisplayNode::Heading {
            level: HEADING_LEVEL,
            content: parse_inlines(title),
        });
    }
    blocks.extend(parse_blocks(doc.body(), state));
    DisplayDocument::new(blocks)
}

fn find_title(text: &str) -> Option<&str> {
    let found = find_command(text, "title", 0)?;
    let mut pos = skip_argument_space(text, found.end);
    if text[pos..].starts_with('[') {
        pos = group_end(text, pos)?;
    }
    let (title, _) = read_argument(text, pos)?;
    Some(title.trim()).filter(|title| !title.is_empty())
}

/// What the block scanner found at an offset
enum Piece {
    /// Ordinary text, resume scanning at the offset
    Skip(usize),
    /// Ends the current paragraph, appends the nodes, resumes at the offset
    Blocks(Vec<DisplayNode>, usize),
    /// Source up to the offset is replaced by the string inside the current paragraph
    Text(&'static str, usize),
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<DisplayNode>,
    paragraph: String,
}

impl BlockBuilder {
    fn flush(&mut self) {
        let text = self.paragraph.trim();
        if !text.is_empty() {
            let mut inlines = parse_inlines(text);
            trim_edges(&mut inlines);
            if !inlines.iter().all(Inline::is_blank) {
                self.blocks.push(DisplayNode::Paragraph(inlines));
            }
        }
        self.paragraph.clear();
    }
}

/// Dropped commands can leave whitespace at the paragraph edges
fn trim_edges(inlines: &mut Vec<Inline>) {
    if let Some(Inline::Text(first)) = inlines.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(Inline::Text(last)) = inlines.last_mut() {
        *last = last.trim_end().to_string();
    }
    inlines.retain(|inline| !matches!(inline, Inline::Text(text) if text.is_empty()));
}

/// Split `text` into blocks
pub fn parse_blocks(text: &str, state: &mut ConversionState) -> Vec<DisplayNode> {
    let bytes = text.as_bytes();
    let mut builder = BlockBuilder::default();
    let mut segment = 0;
    let mut i = 0;
    while i < bytes.len() {
        let piece = match bytes[i] {
            b'\\' => backslash_piece(text, i, state),
            b'$' => dollar_piece(text, i),
            b'%' => comment_piece(text, i),
            b'\n' if starts_blank_line(text, i + 1) => {
                Piece::Blocks(Vec::new(), skip_blank_lines(text, i + 1))
            }
            _ => Piece::Skip(i + 1),
        };
        match piece {
            Piece::Skip(next) => i = next,
            Piece::Blocks(nodes, next) => {
                builder.paragraph.push_str(&text[segment..i]);
                builder.flush();
                builder.blocks.extend(nodes);
                i = next;
                segment = next;
            }
            Piece::Text(replacement, next) => {
                builder.paragraph.push_str(&text[segment..i]);
                builder.paragraph.push_str(replacement);
                i = next;
                segment = next;
            }
        }
    }
    builder.paragraph.push_str(&text[segment.min(text.len())..]);
    builder.flush();
    builder.blocks
}

fn starts_blank_line(text: &str, from: usize) -> bool {
    let rest = &text[from..];
    let line = rest.split('\n').next().unwrap_or("");
    rest.contains('\n') && line.trim().is_empty() || rest.trim().is_empty()
}

fn skip_blank_lines(text: &str, from: usize) -> usize {
    let rest = &text[from..];
    let trimmed = rest.trim_start();
    let consumed = rest.len() - trimmed.len();
    match rest[..consumed].rfind('\n') {
        Some(last) => from + last + 1,
        None => from + consumed,
    }
}

/// `%` to the end of the line; a comment alone on its line takes the line break with it
fn comment_piece(text: &str, i: usize) -> Piece {
    let line_end = text[i..].find('\n').map_or(text.len(), |offset| i + offset);
    let line_start = text[..i].rfind('\n').map_or(0, |idx| idx + 1);
    let whole_line = text[line_start..i].trim().is_empty();
    if whole_line && line_end < text.len() {
        Piece::Text("", line_end + 1)
    } else {
        Piece::Text("", line_end)
    }
}

fn dollar_piece(text: &str, i: usize) -> Piece {
    if text[i..].starts_with("$$") {
        return match find_unescaped(text, i + 2, "$$") {
            Some(close) => Piece::Blocks(
                vec![DisplayNode::Math(text[i + 2..close].trim().to_string())],
                close + 2,
            ),
            None => Piece::Skip(i + 2),
        };
    }
    match find_unescaped(text, i + 1, "$") {
        Some(close) => Piece::Skip(close + 1),
        None => Piece::Skip(i + 1),
    }
}

fn backslash_piece(text: &str, i: usize, state: &mut ConversionState) -> Piece {
    let bytes = text.as_bytes();
    let Some(&next) = bytes.get(i + 1) else {
        return Piece::Skip(i + 1);
    };
    if !next.is_ascii_alphabetic() {
        return match next {
            b'[' => match find_unescaped(text, i + 2, "\\]") {
                Some(close) => Piece::Blocks(
                    vec![DisplayNode::Math(text[i + 2..close].trim().to_string())],
                    close + 2,
                ),
                None => Piece::Skip(i + 2),
            },
            b'(' => Piece::Skip(find_unescaped(text, i + 2, "\\)").map_or(i + 2, |c| c + 2)),
            _ => Piece::Skip(i + 2),
        };
    }
    let name_end = command_name_end(text, i + 1);
    match &text[i + 1..name_end] {
        "begin" => begin_piece(text, name_end, state),
        "end" => match read_argument(text, name_end) {
            Some((name, after)) if LIST_ENVIRONMENTS.contains(&name.trim()) => {
                Piece::Text("\n", after)
            }
            _ => Piece::Skip(name_end),
        },
        "section" | "subsection" | "subsubsection" => heading_piece(text, name_end),
        "item" => Piece::Text("\n• ", skip_spaces(text, skip_item_label(text, name_end))),
        // a `%` inside a URL is not a comment
        "url" => Piece::Skip(read_argument(text, name_end).map_or(name_end, |(_, end)| end)),
        _ => Piece::Skip(name_end),
    }
}

fn skip_spaces(text: &str, pos: usize) -> usize {
    pos + (text[pos..].len() - text[pos..].trim_start_matches([' ', '\t']).len())
}

fn command_name_end(text: &str, from: usize) -> usize {
    text[from..]
        .find(|c: char| !c.is_ascii_alphabetic())
        .map_or(text.len(), |offset| from + offset)
}

fn heading_piece(text: &str, name_end: usize) -> Piece {
    let mut pos = name_end;
    if text[pos..].starts_with('*') {
        pos += 1;
    }
    let short = skip_argument_space(text, pos);
    if text[short..].starts_with('[') {
        match group_end(text, short) {
            Some(end) => pos = end,
            None => return Piece::Skip(name_end),
        }
    }
    match read_argument(text, pos) {
        Some((heading, end)) => Piece::Blocks(
            vec![DisplayNode::Heading {
                level: HEADING_LEVEL,
                content: parse_inlines(heading.trim()),
            }],
            end,
        ),
        None => Piece::Skip(name_end),
    }
}

fn begin_piece(text: &str, name_end: usize, state: &mut ConversionState) -> Piece {
    let Some((name, after)) = read_argument(text, name_end) else {
        return Piece::Skip(name_end);
    };
    let name = name.trim();
    let Some((content_end, end)) = matching_end(text, name, after) else {
        if LIST_ENVIRONMENTS.contains(&name) {
            return Piece::Text("\n", after);
        }
        return Piece::Skip(after);
    };
    let content = &text[after..content_end];
    let nodes = match name {
        "itemize" => {
            let (_, body) = split_options(content);
            let (mut nodes, items) = parse_items(body, state);
            if !items.is_empty() {
                nodes.push(DisplayNode::Steps(items));
            }
            nodes
        }
        "enumerate" => {
            let kind = state.next_list_kind();
            let (_, body) = split_options(content);
            let (mut nodes, items) = parse_items(body, state);
            if !items.is_empty() {
                nodes.push(DisplayNode::List(ListNode { kind, items }));
            }
            nodes
        }
        "tcolorbox" => {
            let (options, body) = split_options(content);
            let mut children = Vec::new();
            if let Some(title) = options.and_then(callout_title) {
                children.push(DisplayNode::Paragraph(vec![Inline::Strong(parse_inlines(
                    title,
                ))]));
            }
            children.extend(parse_blocks(body, state));
            vec![DisplayNode::Callout(children)]
        }
        _ => match MATH_ENVIRONMENTS.iter().find(|(env, _)| *env == name) {
            Some((_, Some(wrapper))) => vec![DisplayNode::Math(format!(
                "\\begin{{{wrapper}}}\n{}\n\\end{{{wrapper}}}",
                content.trim()
            ))],
            Some((_, None)) => vec![DisplayNode::Math(content.trim().to_string())],
            // center and anything unknown contribute their content
            None => parse_blocks(content, state),
        },
    };
    Piece::Blocks(nodes, end)
}

/// Leading `[..]` environment options and the rest of the content
fn split_options(content: &str) -> (Option<&str>, &str) {
    let start = content.len() - content.trim_start_matches([' ', '\t']).len();
    if content[start..].starts_with('[') {
        if let Some(end) = group_end(content, start) {
            return (Some(&content[start + 1..end - 1]), &content[end..]);
        }
    }
    (None, content)
}

/// `title=...` out of a tcolorbox option list
fn callout_title(options: &str) -> Option<&str> {
    let start = options
        .match_indices("title=")
        .map(|(idx, _)| idx)
        .find(|&idx| {
            options[..idx]
                .chars()
                .next_back()
                .map_or(true, |c| c == ',' || c.is_whitespace())
        })?
        + "title=".len();
    let rest = &options[start..];
    let mut depth = 0usize;
    let end = rest
        .char_indices()
        .find(|&(_, c)| match c {
            '{' => {
                depth += 1;
                false
            }
            '}' => {
                depth = depth.saturating_sub(1);
                false
            }
            ',' => depth == 0,
            _ => false,
        })
        .map_or(rest.len(), |(idx, _)| idx);
    let title = rest[..end].trim();
    let title = title
        .strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .unwrap_or(title)
        .trim();
    Some(title).filter(|title| !title.is_empty())
}

/// Blocks ahead of the first `\item` and the items of a list body
fn parse_items(body: &str, state: &mut ConversionState) -> (Vec<DisplayNode>, Vec<ListItem>) {
    let starts = top_level_items(body);
    let lead_end = starts.first().map_or(body.len(), |&(start, _)| start);
    let lead = parse_blocks(&body[..lead_end], state);
    let items = starts
        .iter()
        .enumerate()
        .map(|(k, &(_, text_start))| {
            let text_end = starts.get(k + 1).map_or(body.len(), |&(next, _)| next);
            ListItem::new(parse_blocks(&body[text_start..text_end], state))
        })
        .collect();
    (lead, items)
}

/// `(item start, item text start)` of every `\item` not inside a nested environment
fn top_level_items(body: &str) -> Vec<(usize, usize)> {
    let mut found = Vec::new();
    let mut pos = 0;
    while let Some(item) = find_command(body, "item", pos) {
        match next_begin(body, pos) {
            Some((begin_end, name)) if begin_end <= item.start => {
                pos = matching_end(body, name, begin_end).map_or(begin_end, |(_, end)| end);
            }
            _ => {
                let text_start = skip_item_label(body, item.end);
                found.push((item.start, text_start));
                pos = text_start;
            }
        }
    }
    found
}

/// End offset and name of the next `\begin{..}` marker
fn next_begin(text: &str, from: usize) -> Option<(usize, &str)> {
    let mut search = from;
    while let Some(marker) = next_env_marker(text, search) {
        if marker.kind == MarkerKind::Begin {
            return Some((marker.end, marker.name));
        }
        search = marker.end;
    }
    None
}

fn skip_item_label(text: &str, item_end: usize) -> usize {
    let pos = skip_argument_space(text, item_end);
    if text[pos..].starts_with('[') {
        if let Some(end) = group_end(text, pos) {
            return end;
        }
    }
    item_end
}

/// What the inline scanner found at an offset
enum InlinePiece {
    Skip(usize),
    Node(Inline, usize),
    Text(&'static str, usize),
}

/// Convert paragraph text to inline nodes
pub fn parse_inlines(text: &str) -> Vec<Inline> {
    let bytes = text.as_bytes();
    let mut inlines = Vec::new();
    let mut buffer = String::new();
    let mut segment = 0;
    let mut i = 0;
    while i < bytes.len() {
        let piece = match bytes[i] {
            b'\\' => inline_command(text, i),
            b'$' if text[i..].starts_with("$$") => InlinePiece::Skip(i + 2),
            b'$' => match find_unescaped(text, i + 1, "$") {
                Some(close) => {
                    InlinePiece::Node(Inline::Math(text[i + 1..close].to_string()), close + 1)
                }
                None => InlinePiece::Skip(i + 1),
            },
            b'~' => InlinePiece::Text(" ", i + 1),
            _ => InlinePiece::Skip(i + 1),
        };
        match piece {
            InlinePiece::Skip(next) => i = next,
            InlinePiece::Node(node, next) => {
                buffer.push_str(&text[segment..i]);
                if !buffer.is_empty() {
                    inlines.push(Inline::Text(std::mem::take(&mut buffer)));
                }
                inlines.push(node);
                i = next;
                segment = next;
            }
            InlinePiece::Text(replacement, next) => {
                buffer.push_str(&text[segment..i]);
                buffer.push_str(replacement);
                i = next;
                segment = next;
            }
        }
    }
    buffer.push_str(&text[segment.min(text.len())..]);
    if !buffer.is_empty() {
        inlines.push(Inline::Text(buffer));
    }
    inlines
}

fn inline_command(text: &str, i: usize) -> InlinePiece {
    let bytes = text.as_bytes();
    let Some(&next) = bytes.get(i + 1) else {
        return InlinePiece::Skip(i + 1);
    };
    if !next.is_ascii_alphabetic() {
        return match next {
            b'\\' => InlinePiece::Node(Inline::LineBreak, line_break_end(text, i + 2)),
            b'(' => match find_unescaped(text, i + 2, "\\)") {
                Some(close) => {
                    InlinePiece::Node(Inline::Math(text[i + 2..close].to_string()), close + 2)
                }
                None => InlinePiece::Skip(i + 2),
            },
            b'%' => InlinePiece::Text("%", i + 2),
            b'&' => InlinePiece::Text("&", i + 2),
            _ => InlinePiece::Skip(i + 2),
        };
    }
    let name_end = command_name_end(text, i + 1);
    let name = &text[i + 1..name_end];
    let wrap = |make: fn(Vec<Inline>) -> Inline| match read_argument(text, name_end) {
        Some((content, end)) => InlinePiece::Node(make(parse_inlines(content)), end),
        None => InlinePiece::Skip(name_end),
    };
    match name {
        "textbf" => wrap(Inline::Strong),
        "emph" | "textit" => wrap(Inline::Emphasis),
        "url" => match read_argument(text, name_end) {
            Some((url, end)) => InlinePiece::Node(Inline::Link(url.trim().to_string()), end),
            None => InlinePiece::Skip(name_end),
        },
        "ldots" | "dots" => InlinePiece::Text("…", empty_group_end(text, name_end)),
        "LaTeX" => InlinePiece::Text("LaTeX", empty_group_end(text, name_end)),
        _ if DROPPED_WITH_ARGUMENTS.contains(&name) => {
            let mut pos = name_end;
            if text[pos..].starts_with('*') {
                pos += 1;
            }
            InlinePiece::Text("", skip_groups(text, pos))
        }
        _ if DROPPED.contains(&name) => InlinePiece::Text("", skip_spaces(text, name_end)),
        _ => InlinePiece::Skip(name_end),
    }
}

/// `\\`, `\\*` and `\\[2pt]` are all one line break
fn line_break_end(text: &str, mut pos: usize) -> usize {
    if text[pos..].starts_with('*') {
        pos += 1;
    }
    if text[pos..].starts_with('[') {
        if let Some(end) = group_end(text, pos) {
            return end;
        }
    }
    pos
}

fn empty_group_end(text: &str, pos: usize) -> usize {
    if text[pos..].starts_with("{}") {
        pos + 2
    } else {
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    fn paragraph(s: &str) -> DisplayNode {
        DisplayNode::Paragraph(vec![text(s)])
    }

    fn blocks(source: &str) -> Vec<DisplayNode> {
        parse_blocks(source, &mut ConversionState::default())
    }

    #[test]
    fn test_inline_markup() {
        assert_eq!(
            parse_inlines("Un \\textbf{vector $v$} y \\emph{nada}"),
            vec![
                text("Un "),
                Inline::Strong(vec![text("vector "), Inline::Math("v".to_string())]),
                text(" y "),
                Inline::Emphasis(vec![text("nada")]),
            ]
        );
    }

    #[test]
    fn test_inline_math_forms() {
        assert_eq!(
            parse_inlines("\\(a^2\\) y $b$"),
            vec![
                Inline::Math("a^2".to_string()),
                text(" y "),
                Inline::Math("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_line_breaks_and_links() {
        assert_eq!(
            parse_inlines("a\\\\[3pt]b \\url{https://example.org}"),
            vec![
                text("a"),
                Inline::LineBreak,
                text("b "),
                Inline::Link("https://example.org".to_string()),
            ]
        );
    }

    #[test]
    fn test_dropped_commands() {
        assert_eq!(
            parse_inlines("\\noindent\\vspace*{2mm}Hola\\author{X}\\date{}"),
            vec![text("Hola")]
        );
        assert_eq!(parse_inlines("50\\% \\& más"), vec![text("50% & más")]);
    }

    #[test]
    fn test_unknown_commands_kept() {
        assert_eq!(parse_inlines("\\alpha + \\beta"), vec![text("\\alpha + \\beta")]);
    }

    #[test]
    fn test_unbalanced_inline_kept() {
        assert_eq!(parse_inlines("\\textbf{abierto"), vec![text("\\textbf{abierto")]);
        assert_eq!(parse_inlines("cuesta $5"), vec![text("cuesta $5")]);
    }

    #[test]
    fn test_headings_and_paragraphs() {
        assert_eq!(
            blocks("\\section*{Uno}\nTexto\nmás\n\n\\subsection[c]{Dos}"),
            vec![
                DisplayNode::Heading {
                    level: 3,
                    content: vec![text("Uno")]
                },
                paragraph("Texto\nmás"),
                DisplayNode::Heading {
                    level: 3,
                    content: vec![text("Dos")]
                },
            ]
        );
    }

    #[test]
    fn test_blank_line_splits_paragraphs() {
        assert_eq!(
            blocks("uno\n  \ndos"),
            vec![paragraph("uno"), paragraph("dos")]
        );
    }

    #[test]
    fn test_comment_lines_dropped() {
        assert_eq!(
            blocks("% nota\nuno % resto\ndos"),
            vec![paragraph("uno \ndos")]
        );
    }

    #[test]
    fn test_itemize_steps() {
        assert_eq!(
            blocks("\\begin{itemize}\n\\item[--] Uno\n\\item Dos\n\\end{itemize}"),
            vec![DisplayNode::Steps(vec![
                ListItem::new(vec![paragraph("Uno")]),
                ListItem::new(vec![paragraph("Dos")]),
            ])]
        );
    }

    #[test]
    fn test_text_before_first_item_kept() {
        assert_eq!(
            blocks("\\begin{itemize}\nTexto importante sin item\n\\end{itemize}"),
            vec![paragraph("Texto importante sin item")]
        );
        assert_eq!(
            blocks("\\begin{enumerate}\nAntes:\n\\item Uno\n\\end{enumerate}"),
            vec![
                paragraph("Antes:"),
                DisplayNode::List(ListNode {
                    kind: ListKind::TopLevelItem,
                    items: vec![ListItem::new(vec![paragraph("Uno")])],
                }),
            ]
        );
    }

    #[test]
    fn test_percent_inside_url_is_not_a_comment() {
        assert_eq!(
            blocks("Ver \\url{https://x/a%20b} aquí\nsigue"),
            vec![DisplayNode::Paragraph(vec![
                text("Ver "),
                Inline::Link("https://x/a%20b".to_string()),
                text(" aquí\nsigue"),
            ])]
        );
    }

    #[test]
    fn test_enumerate_numbering_follows_document_order() {
        let source = "\\begin{enumerate}\\item A\n\\begin{enumerate}\\item B\\end{enumerate}\n\\end{enumerate}\n\\begin{enumerate}\\item C\\end{enumerate}";
        let mut state = ConversionState::default();
        let nodes = parse_blocks(source, &mut state);
        assert_eq!(state.enum_depth_seen, 3);
        let DisplayNode::List(outer) = &nodes[0] else {
            panic!("expected list, got {:?}", nodes[0]);
        };
        assert_eq!(outer.kind, ListKind::TopLevelItem);
        assert_eq!(outer.items.len(), 1);
        assert_eq!(
            outer.items[0].blocks[1],
            DisplayNode::List(ListNode {
                kind: ListKind::SubItem,
                items: vec![ListItem::new(vec![paragraph("B")])],
            })
        );
        let DisplayNode::List(last) = &nodes[1] else {
            panic!("expected list, got {:?}", nodes[1]);
        };
        assert_eq!(last.kind, ListKind::SubItem);
    }

    #[test]
    fn test_enumerate_options_ignored() {
        assert_eq!(
            blocks("\\begin{enumerate}[label=(\\alph*)]\\item X\\end{enumerate}"),
            vec![DisplayNode::List(ListNode {
                kind: ListKind::TopLevelItem,
                items: vec![ListItem::new(vec![paragraph("X")])],
            })]
        );
    }

    #[test]
    fn test_display_math_forms() {
        assert_eq!(
            blocks("Sea\n\\[ a+b \\]\n$$c$$\n\\begin{align*}x&=1\\\\y&=2\\end{align*}"),
            vec![
                paragraph("Sea"),
                DisplayNode::Math("a+b".to_string()),
                DisplayNode::Math("c".to_string()),
                DisplayNode::Math("\\begin{aligned}\nx&=1\\\\y&=2\n\\end{aligned}".to_string()),
            ]
        );
        assert_eq!(
            blocks("\\begin{equation}E=mc^2\\end{equation}"),
            vec![DisplayNode::Math("E=mc^2".to_string())]
        );
    }

    #[test]
    fn test_callout_with_title() {
        assert_eq!(
            blocks("\\begin{tcolorbox}[colback=blue!5, title={Ojo}]\nCuidado\n\\end{tcolorbox}"),
            vec![DisplayNode::Callout(vec![
                DisplayNode::Paragraph(vec![Inline::Strong(vec![text("Ojo")])]),
                paragraph("Cuidado"),
            ])]
        );
    }

    #[test]
    fn test_callout_title_needs_its_own_key() {
        assert_eq!(
            blocks("\\begin{tcolorbox}[coltitle=red]x\\end{tcolorbox}"),
            vec![DisplayNode::Callout(vec![paragraph("x")])]
        );
    }

    #[test]
    fn test_center_contributes_content() {
        assert_eq!(
            blocks("\\begin{center}\\scriptsize Generado\\end{center}"),
            vec![paragraph("Generado")]
        );
    }

    #[test]
    fn test_unbalanced_list_markers_become_breaks() {
        assert_eq!(
            blocks("\\begin{itemize}\\item uno\\item dos"),
            vec![paragraph("• uno\n• dos")]
        );
        assert_eq!(blocks("fin\\end{enumerate}"), vec![paragraph("fin")]);
    }

    #[test]
    fn test_unbalanced_environment_kept_literally() {
        assert_eq!(
            blocks("\\begin{center} hola"),
            vec![paragraph("\\begin{center} hola")]
        );
        assert_eq!(blocks("\\[ x"), vec![paragraph("\\[ x")]);
    }

    #[test]
    fn test_title_from_whole_document() {
        let doc = Document::new(
            "\\documentclass{article}\n\\title{Sheet Cheat: Vectores}\n\\begin{document}\n\\maketitle\nHola\n\\end{document}\n",
        );
        let tree = to_display_tree(&doc);
        assert_eq!(
            tree.blocks,
            vec![
                DisplayNode::Heading {
                    level: 3,
                    content: vec![text("Sheet Cheat: Vectores")]
                },
                paragraph("Hola"),
            ]
        );
    }

    #[test]
    fn test_title_in_body_not_repeated() {
        let doc = Document::new("\\begin{document}\n\\title{T}\n\\maketitle\nx\n\\end{document}");
        let tree = to_display_tree(&doc);
        assert_eq!(tree.blocks.len(), 2);
        assert_eq!(tree.blocks[1], paragraph("x"));
    }

    #[test]
    fn test_each_conversion_starts_fresh() {
        let doc = Document::new("\\begin{enumerate}\\item a\\end{enumerate}");
        for _ in 0..2 {
            let tree = to_display_tree(&doc);
            assert!(matches!(
                &tree.blocks[0],
                DisplayNode::List(ListNode { kind: ListKind::TopLevelItem, .. })
            ));
        }
    }
}
