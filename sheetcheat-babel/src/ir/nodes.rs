//! Core IR data structures

/// Heading level used for titles and every sectioning command
pub const HEADING_LEVEL: u8 = 3;

/// A converted cheat sheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayDocument {
    pub blocks: Vec<DisplayNode>,
}

impl DisplayDocument {
    pub fn new(blocks: Vec<DisplayNode>) -> Self {
        DisplayDocument { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Block level node
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayNode {
    Heading { level: u8, content: Vec<Inline> },
    Paragraph(Vec<Inline>),
    /// Unordered list, one step per item
    Steps(Vec<ListItem>),
    List(ListNode),
    /// Display math, the body without its delimiters
    Math(String),
    Callout(Vec<DisplayNode>),
}

/// Ordered list
#[derive(Debug, Clone, PartialEq)]
pub struct ListNode {
    pub kind: ListKind,
    pub items: Vec<ListItem>,
}

/// How an ordered list is labelled
///
/// Only the first ordered list of a document is numbered; every later one is lettered,
/// since generated cheat sheets use nested enumerations for sub-steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `1.`, `2.`, ...
    TopLevelItem,
    /// `a)`, `b)`, ..., `z)`, `aa)`, `ab)`, ...
    SubItem,
}

impl ListKind {
    /// Label of the item at `index`, without punctuation
    pub fn label(self, index: usize) -> String {
        match self {
            ListKind::TopLevelItem => (index + 1).to_string(),
            ListKind::SubItem => letter_label(index),
        }
    }
}

fn letter_label(index: usize) -> String {
    let letter = char::from(b'a' + (index % 26) as u8);
    if index < 26 {
        letter.to_string()
    } else {
        format!("{}{}", letter_label(index / 26 - 1), letter)
    }
}

/// A list item: its first paragraph and whatever is nested under it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListItem {
    pub blocks: Vec<DisplayNode>,
}

impl ListItem {
    pub fn new(blocks: Vec<DisplayNode>) -> Self {
        ListItem { blocks }
    }
}

/// Inline content
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    /// Inline math, the body without its delimiters
    Math(String),
    /// Bare URL
    Link(String),
    LineBreak,
}

impl Inline {
    /// Whether this renders to nothing visible
    pub fn is_blank(&self) -> bool {
        match self {
            Inline::Text(text) => text.trim().is_empty(),
            Inline::Strong(children) | Inline::Emphasis(children) => {
                children.iter().all(Inline::is_blank)
            }
            Inline::LineBreak => true,
            Inline::Math(_) | Inline::Link(_) => false,
        }
    }
}
