use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::block::{Block, LinkKind, List, ListItem, Span};
use crate::render::HeadingIds;
use crate::scan;

/// Parse one Markdown segment into blocks, assigning anchor ids to level 2
/// and 3 headings through `ids`. `first_line` is the segment's starting line
/// within the whole document.
pub fn parse(markdown: &str, first_line: usize, ids: &mut HeadingIds) -> Vec<Block> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(markdown, options).into_offset_iter();
    let mut state = ParseState::default();

    for (event, range) in parser {
        process_event(event, range, markdown, first_line, &mut state, ids);
    }

    state.blocks
}

#[derive(Default)]
struct ParseState {
    blocks: Vec<Block>,
    // Open block quotes, innermost last
    quote_stack: Vec<Vec<Block>>,

    // Current inline content being built
    spans: Vec<Span>,
    // Nested span buffers for formatting
    span_stack: Vec<Vec<Span>>,

    // Current heading (level, document line, source text) if in a heading
    heading: Option<(u8, usize, Option<String>)>,

    // Code block state
    in_code_block: bool,
    code_language: Option<String>,
    code_content: String,

    // Raw HTML block state
    html_block: Option<String>,

    // Link/image destinations, innermost last
    url_stack: Vec<String>,

    // List state
    list_stack: Vec<ListBuilder>,

    // Table state
    in_table: bool,
    table_headers: Vec<Vec<Span>>,
    table_rows: Vec<Vec<Vec<Span>>>,
    current_row: Vec<Vec<Span>>,
    in_table_head: bool,
}

impl ParseState {
    fn push_block(&mut self, block: Block) {
        match self.quote_stack.last_mut() {
            Some(quote) => quote.push(block),
            None => self.blocks.push(block),
        }
    }

    fn open_inline(&mut self) {
        self.span_stack.push(std::mem::take(&mut self.spans));
    }

    fn close_inline(&mut self, wrap: impl FnOnce(Vec<Span>) -> Span) {
        let inner = std::mem::take(&mut self.spans);
        if let Some(mut parent) = self.span_stack.pop() {
            parent.push(wrap(inner));
            self.spans = parent;
        }
    }
}

struct ListBuilder {
    ordered: bool,
    start: Option<u64>,
    items: Vec<ListItem>,
    current_item_spans: Vec<Span>,
    current_item_checked: Option<bool>,
    current_item_nested: Option<Box<List>>,
}

fn process_event(
    event: Event,
    range: Range<usize>,
    source: &str,
    first_line: usize,
    state: &mut ParseState,
    ids: &mut HeadingIds,
) {
    match event {
        // Headings
        Event::Start(Tag::Heading { level, .. }) => {
            let level = heading_level_to_u8(level);
            let line = first_line + source[..range.start].matches('\n').count();
            let text = heading_source_text(&source[range], level);
            state.heading = Some((level, line, text));
        }
        Event::End(TagEnd::Heading(_)) => {
            if let Some((level, line, source_text)) = state.heading.take() {
                let content = std::mem::take(&mut state.spans);
                let id = (level == 2 || level == 3).then(|| match source_text {
                    Some(text) => ids.resolve(line, &text),
                    None => {
                        let text: String = content.iter().map(Span::plain_text).collect();
                        ids.resolve(line, text.trim())
                    }
                });
                state.push_block(Block::Heading { level, id, content });
            }
        }

        // Paragraphs
        Event::Start(Tag::Paragraph) => {}
        Event::End(TagEnd::Paragraph) => {
            let content = std::mem::take(&mut state.spans);
            if !content.is_empty() {
                // If we're in a list item, add to that instead
                if let Some(list) = state.list_stack.last_mut() {
                    if !list.current_item_spans.is_empty() {
                        list.current_item_spans.push(Span::LineBreak);
                    }
                    list.current_item_spans.extend(content);
                } else if state.in_table {
                    // Ignore paragraphs in tables, handled by cell
                } else {
                    state.push_block(Block::Paragraph { content });
                }
            }
        }

        // Block quotes
        Event::Start(Tag::BlockQuote(_)) => {
            state.quote_stack.push(Vec::new());
        }
        Event::End(TagEnd::BlockQuote(_)) => {
            if let Some(blocks) = state.quote_stack.pop() {
                state.push_block(Block::Quote { blocks });
            }
        }

        // Text content
        Event::Text(text) => {
            if state.in_code_block {
                state.code_content.push_str(&text);
            } else {
                state.spans.push(Span::text(text.into_string()));
            }
        }

        // Inline code
        Event::Code(code) => {
            state.spans.push(Span::Code {
                code: code.into_string(),
            });
        }

        // Raw HTML
        Event::Start(Tag::HtmlBlock) => {
            state.html_block = Some(String::new());
        }
        Event::End(TagEnd::HtmlBlock) => {
            if let Some(html) = state.html_block.take() {
                state.push_block(Block::Html { html });
            }
        }
        Event::Html(html) => match state.html_block.as_mut() {
            Some(block) => block.push_str(&html),
            None => state.push_block(Block::Html {
                html: html.into_string(),
            }),
        },
        Event::InlineHtml(html) => {
            state.spans.push(Span::Html {
                html: html.into_string(),
            });
        }

        // Bold, italic, strikethrough
        Event::Start(Tag::Strong | Tag::Emphasis | Tag::Strikethrough) => {
            state.open_inline();
        }
        Event::End(TagEnd::Strong) => state.close_inline(|content| Span::Bold { content }),
        Event::End(TagEnd::Emphasis) => state.close_inline(|content| Span::Italic { content }),
        Event::End(TagEnd::Strikethrough) => {
            state.close_inline(|content| Span::Strikethrough { content })
        }

        // Links and images
        Event::Start(Tag::Link { dest_url, .. } | Tag::Image { dest_url, .. }) => {
            state.url_stack.push(dest_url.into_string());
            state.open_inline();
        }
        Event::End(TagEnd::Link) => {
            let url = state.url_stack.pop().unwrap_or_default();
            state.close_inline(|content| Span::Link {
                kind: LinkKind::classify(&url),
                url,
                content,
            });
        }
        Event::End(TagEnd::Image) => {
            let url = state.url_stack.pop().unwrap_or_default();
            state.close_inline(|content| Span::Image {
                url,
                alt: content.iter().map(Span::plain_text).collect(),
            });
        }

        // Code blocks
        Event::Start(Tag::CodeBlock(kind)) => {
            state.in_code_block = true;
            state.code_language = match kind {
                CodeBlockKind::Fenced(lang) => {
                    let lang = lang.into_string();
                    if lang.is_empty() { None } else { Some(lang) }
                }
                CodeBlockKind::Indented => None,
            };
            state.code_content.clear();
        }
        Event::End(TagEnd::CodeBlock) => {
            state.in_code_block = false;
            let content = std::mem::take(&mut state.code_content);
            let language = state.code_language.take();
            state.push_block(Block::CodeBlock { language, content });
        }

        // Lists
        Event::Start(Tag::List(first_item)) => {
            state.list_stack.push(ListBuilder {
                ordered: first_item.is_some(),
                start: first_item,
                items: Vec::new(),
                current_item_spans: Vec::new(),
                current_item_checked: None,
                current_item_nested: None,
            });
        }
        Event::End(TagEnd::List(_)) => {
            if let Some(list_builder) = state.list_stack.pop() {
                let list = List {
                    ordered: list_builder.ordered,
                    start: list_builder.start.filter(|&n| n != 1),
                    items: list_builder.items,
                };
                // If there's a parent list, this is nested
                if let Some(parent) = state.list_stack.last_mut() {
                    parent.current_item_nested = Some(Box::new(list));
                } else {
                    state.push_block(Block::List(list));
                }
            }
        }

        Event::Start(Tag::Item) => {
            // Text of a parent item before its nested list
            let pending = std::mem::take(&mut state.spans);
            if let Some(list) = state.list_stack.last_mut() {
                list.current_item_spans.clear();
                list.current_item_checked = None;
                list.current_item_nested = None;
            }
            if !pending.is_empty() {
                let depth = state.list_stack.len();
                if depth >= 2 {
                    state.list_stack[depth - 2].current_item_spans.extend(pending);
                }
            }
        }
        Event::End(TagEnd::Item) => {
            // Collect any remaining spans
            let remaining = std::mem::take(&mut state.spans);

            if let Some(list) = state.list_stack.last_mut() {
                list.current_item_spans.extend(remaining);
                let content = std::mem::take(&mut list.current_item_spans);
                let checked = list.current_item_checked.take();
                let nested = list.current_item_nested.take();
                list.items.push(ListItem {
                    content,
                    nested,
                    checked,
                });
            }
        }

        // Task list checkboxes
        Event::TaskListMarker(checked) => {
            if let Some(list) = state.list_stack.last_mut() {
                list.current_item_checked = Some(checked);
            }
        }

        // Tables
        Event::Start(Tag::Table(_)) => {
            state.in_table = true;
            state.table_headers.clear();
            state.table_rows.clear();
        }
        Event::End(TagEnd::Table) => {
            state.in_table = false;
            let headers = std::mem::take(&mut state.table_headers);
            let rows = std::mem::take(&mut state.table_rows);
            state.push_block(Block::Table { headers, rows });
        }

        Event::Start(Tag::TableHead) => {
            state.in_table_head = true;
            state.current_row.clear();
        }
        Event::End(TagEnd::TableHead) => {
            state.in_table_head = false;
            state.table_headers = std::mem::take(&mut state.current_row);
        }

        Event::Start(Tag::TableRow) => {
            state.current_row.clear();
        }
        Event::End(TagEnd::TableRow) => {
            if !state.in_table_head {
                let row = std::mem::take(&mut state.current_row);
                state.table_rows.push(row);
            }
        }

        Event::Start(Tag::TableCell) => {
            state.spans.clear();
        }
        Event::End(TagEnd::TableCell) => {
            let cell_content = std::mem::take(&mut state.spans);
            state.current_row.push(cell_content);
        }

        // Horizontal rule
        Event::Rule => {
            state.push_block(Block::Rule);
        }

        // Soft/hard breaks
        Event::SoftBreak => {
            state.spans.push(Span::text(" "));
        }
        Event::HardBreak => {
            state.spans.push(Span::LineBreak);
        }

        // Ignore other events
        _ => {}
    }
}

/// Heading text as the line scanner sees it, so ids line up with the
/// table of contents. Setext headings have no `#` line and yield `None`.
fn heading_source_text(source: &str, level: u8) -> Option<String> {
    let first_line = source.lines().next()?.trim();
    match scan::heading_line(first_line) {
        Some((depth, text)) if depth == level => Some(text),
        _ => None,
    }
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
