//! Content rendering: Markdown segments to a presentational tree, with
//! widget placeholders spliced in and heading anchors matching the table
//! of contents.

use std::collections::HashMap;

use serde::Serialize;

use crate::block::Block;
use crate::config::Config;
use crate::html;
use crate::parser;
use crate::slug::Slugger;
use crate::toc::TableOfContents;

/// Hands out heading anchor ids during one render.
///
/// A heading takes its id from the table of contents only when the entry
/// sits on the same source line with the same text. Anything else (headings
/// in quotes or list items, setext headings) gets an id from a slugger
/// seeded with every known id, so it can never take or collide with one.
#[derive(Debug)]
pub struct HeadingIds {
    known: HashMap<usize, (String, String)>,
    fallback: Slugger,
}

impl HeadingIds {
    pub fn new(toc: &TableOfContents) -> Self {
        let known = toc
            .iter()
            .map(|heading| (heading.line, (heading.text.clone(), heading.id.clone())))
            .collect();
        Self {
            known,
            fallback: Slugger::seeded(toc.ids()),
        }
    }

    /// Id for the heading with `text` on zero-based source `line`.
    pub fn resolve(&mut self, line: usize, text: &str) -> String {
        if self
            .known
            .get(&line)
            .is_some_and(|(known_text, _)| known_text == text)
            && let Some((_, id)) = self.known.remove(&line)
        {
            return id;
        }
        let id = self.fallback.slug(text);
        tracing::debug!(line, text, id = %id, "heading missing from table of contents");
        id
    }
}

/// One piece of rendered output, in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Part {
    Markdown { blocks: Vec<Block> },
    Widget { html: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderedDocument {
    pub parts: Vec<Part>,
}

impl RenderedDocument {
    pub fn to_html(&self, config: &Config) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Markdown { blocks } => html::blocks_to_html(blocks, config, &mut out),
                Part::Widget { html } => {
                    out.push_str(&format!(
                        "<div class=\"{}\">{}</div>\n",
                        html::escape(&config.render.widget_class),
                        html
                    ));
                }
            }
        }
        out
    }

    /// Anchor ids of every rendered heading, in order.
    pub fn heading_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for part in &self.parts {
            if let Part::Markdown { blocks } = part {
                collect_heading_ids(blocks, &mut ids);
            }
        }
        ids
    }

    /// The heading to scroll to when the page is opened at `fragment`
    /// (with or without the leading `#`).
    pub fn heading_for_fragment(&self, fragment: &str) -> Option<&str> {
        let target = fragment.strip_prefix('#').unwrap_or(fragment);
        if target.is_empty() {
            return None;
        }
        self.heading_ids().into_iter().find(|id| *id == target)
    }

    pub fn widget_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|p| matches!(p, Part::Widget { .. }))
            .count()
    }
}

fn collect_heading_ids<'a>(blocks: &'a [Block], ids: &mut Vec<&'a str>) {
    for block in blocks {
        match block {
            Block::Heading { id: Some(id), .. } => ids.push(id),
            Block::Quote { blocks } => collect_heading_ids(blocks, ids),
            _ => {}
        }
    }
}

pub struct Renderer<'a> {
    config: &'a Config,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Render `document`, taking heading ids from `toc`.
    ///
    /// The document is split on the configured widget token; each non-blank
    /// segment is parsed separately and `widget` is placed at every split
    /// point. Without a widget the tokens are simply dropped.
    pub fn render(
        &self,
        document: &str,
        toc: &TableOfContents,
        widget: Option<&str>,
    ) -> RenderedDocument {
        let token = self.config.render.widget_token.as_str();
        let segments: Vec<&str> = if token.is_empty() {
            vec![document]
        } else {
            document.split(token).collect()
        };

        let mut ids = HeadingIds::new(toc);
        let mut parts = Vec::new();
        let last = segments.len() - 1;

        let mut first_line = 0;

        for (index, segment) in segments.into_iter().enumerate() {
            if !segment.trim().is_empty() {
                parts.push(Part::Markdown {
                    blocks: parser::parse(segment, first_line, &mut ids),
                });
            }
            first_line += segment.matches('\n').count() + token.matches('\n').count();
            if index < last
                && let Some(widget) = widget
            {
                parts.push(Part::Widget {
                    html: widget.to_string(),
                });
            }
        }

        tracing::debug!(
            segments = last + 1,
            widgets = parts.iter().filter(|p| matches!(p, Part::Widget { .. })).count(),
            "rendered document"
        );
        RenderedDocument { parts }
    }
}
