//! Display tree → Markdown rendering
//!
//! Pipeline: display IR → Comrak AST → Markdown string. Math goes through comrak's math
//! nodes, which are written verbatim with `$`/`$$` fences, while ordinary text is escaped
//! so that prose such as `# de raíces` or `1. caso` never turns into Markdown structure.
//!
//! Lists are tight. Steps and lettered lists are bullet lists whose first paragraph starts
//! with the step glyph or the bold letter; the numbered list is a CommonMark ordered list.

use crate::error::FormatError;
use crate::ir::nodes::{DisplayDocument, DisplayNode, Inline, ListItem, ListKind, ListNode};
use comrak::nodes::{
    Ast, AstNode, ListDelimType, ListType, NodeHeading, NodeLink, NodeList, NodeMath, NodeValue,
};
use comrak::{format_commonmark, Arena, ComrakOptions};
use std::cell::RefCell;

/// Glyph that marks a step of an unordered list
pub const STEP_GLYPH: &str = "▸";

/// Render a display tree; a non-empty result ends with a line break
pub fn render_document(doc: &DisplayDocument) -> Result<String, FormatError> {
    let arena = Arena::new();
    let root = alloc(&arena, NodeValue::Document);
    append_blocks(&arena, root, &doc.blocks);

    let mut output = Vec::new();
    format_commonmark(root, &default_comrak_options(), &mut output).map_err(|e| {
        FormatError::SerializationError(format!("Comrak serialization failed: {}", e))
    })?;
    let markdown = String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {}", e)))?;

    // Comrak separates adjacent lists with an HTML comment
    Ok(markdown.replace("<!-- end list -->\n\n", ""))
}

fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.math_dollars = true;
    options.extension.autolink = true;
    options
}

fn alloc<'a>(arena: &'a Arena<AstNode<'a>>, value: NodeValue) -> &'a AstNode<'a> {
    arena.alloc(AstNode::new(RefCell::new(Ast::new(value, (0, 0).into()))))
}

fn append_blocks<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, blocks: &[DisplayNode]) {
    for block in blocks {
        append_block(arena, parent, block);
    }
}

fn append_block<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, block: &DisplayNode) {
    match block {
        DisplayNode::Heading { level, content } => {
            let heading = alloc(
                arena,
                NodeValue::Heading(NodeHeading {
                    level: (*level).clamp(1, 6),
                    setext: false,
                }),
            );
            parent.append(heading);
            for inline in flatten_breaks(content) {
                append_inline(arena, heading, &inline);
            }
        }
        DisplayNode::Paragraph(content) => {
            let paragraph = alloc(arena, NodeValue::Paragraph);
            parent.append(paragraph);
            append_inlines(arena, paragraph, content);
        }
        DisplayNode::Math(body) => {
            let paragraph = alloc(arena, NodeValue::Paragraph);
            parent.append(paragraph);
            paragraph.append(alloc(
                arena,
                NodeValue::Math(NodeMath {
                    dollar_math: true,
                    display_math: true,
                    literal: format!("\n{}\n", body.trim()),
                }),
            ));
        }
        DisplayNode::Callout(children) => {
            let quote = alloc(arena, NodeValue::BlockQuote);
            parent.append(quote);
            append_blocks(arena, quote, children);
        }
        DisplayNode::Steps(items) => {
            let list = append_list(arena, parent, ListType::Bullet);
            for item in items {
                let lead = vec![Inline::Text(format!("{STEP_GLYPH} "))];
                append_item(arena, list, ListType::Bullet, &lead, item);
            }
        }
        DisplayNode::List(ListNode { kind, items }) => {
            let list_type = match kind {
                ListKind::TopLevelItem => ListType::Ordered,
                ListKind::SubItem => ListType::Bullet,
            };
            let list = append_list(arena, parent, list_type);
            for (index, item) in items.iter().enumerate() {
                let lead = match kind {
                    ListKind::TopLevelItem => Vec::new(),
                    ListKind::SubItem => vec![
                        Inline::Strong(vec![Inline::Text(format!("{})", kind.label(index)))]),
                        Inline::Text(" ".to_string()),
                    ],
                };
                append_item(arena, list, list_type, &lead, item);
            }
        }
    }
}

fn list_data(list_type: ListType) -> NodeList {
    NodeList {
        list_type,
        marker_offset: 0,
        padding: 0,
        start: 1,
        delimiter: ListDelimType::Period,
        bullet_char: b'-',
        tight: true,
    }
}

fn append_list<'a>(
    arena: &'a Arena<AstNode<'a>>,
    parent: &'a AstNode<'a>,
    list_type: ListType,
) -> &'a AstNode<'a> {
    let list = alloc(arena, NodeValue::List(list_data(list_type)));
    parent.append(list);
    list
}

/// `lead` opens the item's first paragraph
fn append_item<'a>(
    arena: &'a Arena<AstNode<'a>>,
    list: &'a AstNode<'a>,
    list_type: ListType,
    lead: &[Inline],
    item: &ListItem,
) {
    let node = alloc(arena, NodeValue::Item(list_data(list_type)));
    list.append(node);

    let mut blocks = item.blocks.as_slice();
    if !lead.is_empty() {
        let paragraph = alloc(arena, NodeValue::Paragraph);
        node.append(paragraph);
        match blocks.split_first() {
            Some((DisplayNode::Paragraph(content), rest)) => {
                let joined: Vec<Inline> = lead.iter().chain(content).cloned().collect();
                append_inlines(arena, paragraph, &joined);
                blocks = rest;
            }
            _ => append_inlines(arena, paragraph, lead),
        }
    }
    append_blocks(arena, node, blocks);
}

/// Headings hold a single line
fn flatten_breaks(content: &[Inline]) -> Vec<Inline> {
    content
        .iter()
        .map(|inline| match inline {
            Inline::Text(text) => Inline::Text(text.replace('\n', " ")),
            Inline::LineBreak => Inline::Text(" ".to_string()),
            other => other.clone(),
        })
        .collect()
}

/// Paragraph content; whitespace next to a hard break is dropped
fn append_inlines<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, content: &[Inline]) {
    let mut content = content.to_vec();
    for index in 0..content.len() {
        if !matches!(content[index], Inline::LineBreak) {
            continue;
        }
        if let Some(Inline::Text(before)) = index.checked_sub(1).and_then(|i| content.get_mut(i)) {
            *before = before.trim_end().to_string();
        }
        if let Some(Inline::Text(after)) = content.get_mut(index + 1) {
            *after = after.trim_start().to_string();
        }
    }
    for inline in &content {
        append_inline(arena, parent, inline);
    }
}

fn append_inline<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, inline: &Inline) {
    match inline {
        Inline::Text(text) => append_text(arena, parent, text),
        Inline::Strong(children) => {
            let strong = alloc(arena, NodeValue::Strong);
            parent.append(strong);
            for child in children {
                append_inline(arena, strong, child);
            }
        }
        Inline::Emphasis(children) => {
            let emph = alloc(arena, NodeValue::Emph);
            parent.append(emph);
            for child in children {
                append_inline(arena, emph, child);
            }
        }
        Inline::Math(body) => parent.append(alloc(
            arena,
            NodeValue::Math(NodeMath {
                dollar_math: true,
                display_math: false,
                literal: body.trim().to_string(),
            }),
        )),
        Inline::Link(url) => {
            let link = alloc(
                arena,
                NodeValue::Link(NodeLink {
                    url: url.clone(),
                    title: String::new(),
                }),
            );
            parent.append(link);
            link.append(alloc(arena, NodeValue::Text(url.clone())));
        }
        // CommonMark hard break; dropped by comrak when nothing follows
        Inline::LineBreak => parent.append(alloc(arena, NodeValue::LineBreak)),
    }
}

/// Source line breaks become soft breaks, and the whitespace around them is dropped so
/// indentation never reaches the output
fn append_text<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, text: &str) {
    let text = text.replace('\t', " ");
    let lines: Vec<&str> = text.split('\n').collect();
    let last = lines.len() - 1;
    for (index, line) in lines.iter().enumerate() {
        if index > 0 {
            parent.append(alloc(arena, NodeValue::SoftBreak));
        }
        let line = if index > 0 { line.trim_start() } else { line };
        let line = if index < last { line.trim_end() } else { line };
        if !line.is_empty() {
            parent.append(alloc(arena, NodeValue::Text(line.to_string())));
        }
    }
}
