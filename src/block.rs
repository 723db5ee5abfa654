use serde::Serialize;

/// How a link behaves when followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// `#id`: scrolls to a heading on the same page and updates the fragment.
    Fragment,
    /// `http://` or `https://`: opens in a new context without referrer or opener.
    External,
    /// Anything else navigates normally.
    Internal,
}

impl LinkKind {
    pub fn classify(url: &str) -> Self {
        if url.starts_with('#') {
            Self::Fragment
        } else if url.starts_with("http://") || url.starts_with("https://") {
            Self::External
        } else {
            Self::Internal
        }
    }
}

/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Span {
    Text { text: String },
    Bold { content: Vec<Span> },
    Italic { content: Vec<Span> },
    Strikethrough { content: Vec<Span> },
    Code { code: String },
    Link { url: String, kind: LinkKind, content: Vec<Span> },
    Image { url: String, alt: String },
    Html { html: String },
    LineBreak,
}

impl Span {
    pub(crate) fn text(text: impl Into<String>) -> Self {
        Span::Text { text: text.into() }
    }

    /// Plain text of this span, formatting dropped.
    pub fn plain_text(&self) -> String {
        match self {
            Span::Text { text } | Span::Code { code: text } => text.clone(),
            Span::Bold { content }
            | Span::Italic { content }
            | Span::Strikethrough { content }
            | Span::Link { content, .. } => content.iter().map(Span::plain_text).collect(),
            Span::Image { alt, .. } => alt.clone(),
            Span::Html { .. } => String::new(),
            Span::LineBreak => " ".to_string(),
        }
    }
}

/// A single list item, which can contain nested content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub content: Vec<Span>,
    pub nested: Option<Box<List>>,
    /// For task lists: None = not a task, Some(false) = unchecked, Some(true) = checked
    pub checked: Option<bool>,
}

/// A list (ordered or unordered)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct List {
    pub ordered: bool,
    pub start: Option<u64>,
    pub items: Vec<ListItem>,
}

/// Block-level elements parsed from Markdown
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading {
        level: u8,
        /// Anchor id; set for level 2 and 3 only.
        id: Option<String>,
        content: Vec<Span>,
    },
    Paragraph {
        content: Vec<Span>,
    },
    CodeBlock {
        language: Option<String>,
        content: String,
    },
    List(List),
    Quote {
        blocks: Vec<Block>,
    },
    Table {
        headers: Vec<Vec<Span>>,
        rows: Vec<Vec<Vec<Span>>>,
    },
    Html {
        html: String,
    },
    Rule,
}
