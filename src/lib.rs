//! Content structuring for long-form Markdown articles.
//!
//! One document goes in; out come a table of contents with stable heading
//! anchors, the FAQ section as question/answer pairs, and a rendered body
//! with widget placeholders spliced in. Every operation accepts any string
//! and never fails: missing structure just yields empty results.
//!
//! ```
//! use pillar::{Config, extract_faq_section, extract_headings};
//!
//! let doc = "## Plans\n\nText.\n\n## FAQ\n\n### Does it work?\n\nYes.";
//! let extraction = extract_faq_section(doc);
//! assert_eq!(extraction.faqs[0].question, "Does it work?");
//!
//! let toc = extract_headings(&extraction.content);
//! assert_eq!(toc.ids().collect::<Vec<_>>(), vec!["plans"]);
//!
//! let article = pillar::prepare(doc, &Config::default(), None);
//! assert!(article.html.contains("<h2 id=\"plans\""));
//! ```

mod article;
mod block;
mod config;
mod error;
mod faq;
mod html;
mod parser;
mod render;
mod scan;
mod slug;
mod structured_data;
mod toc;

pub use article::{PreparedArticle, prepare};
pub use block::{Block, LinkKind, List, ListItem, Span};
pub use config::{Config, FaqConfig, LinksConfig, RenderConfig, TocConfig};
pub use error::{Error, Result};
pub use faq::{FaqExtraction, FaqItem, extract_faq_section};
pub use html::escape as escape_html;
pub use render::{HeadingIds, Part, RenderedDocument, Renderer};
pub use slug::{FALLBACK_SLUG, Slugger, slugify};
pub use structured_data::{faq_page, strip_markdown};
pub use toc::{Heading, HeadingLevel, TableOfContents, extract_headings};

/// Parse a Markdown fragment into blocks without a table of contents;
/// heading anchors are slugged on the fly.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown, 0, &mut HeadingIds::new(&TableOfContents::default()))
}

/// Render a document to HTML, deriving the table of contents from it.
pub fn markdown_to_html(markdown: &str, config: &Config, widget: Option<&str>) -> String {
    let toc = extract_headings(markdown);
    Renderer::new(config)
        .render(markdown, &toc, widget)
        .to_html(config)
}
