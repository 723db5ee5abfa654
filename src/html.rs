use crate::block::{Block, LinkKind, List, Span};
use crate::config::Config;

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Convert blocks to HTML
pub fn blocks_to_html(blocks: &[Block], config: &Config, out: &mut String) {
    for block in blocks {
        emit_block(block, config, out);
    }
}

fn emit_block(block: &Block, config: &Config, out: &mut String) {
    match block {
        Block::Heading { level, id, content } => {
            out.push_str(&format!("<h{level}"));
            if let Some(id) = id {
                out.push_str(&format!(" id=\"{}\"", escape(id)));
                if !config.render.heading_class.is_empty() {
                    out.push_str(&format!(
                        " class=\"{}\"",
                        escape(&config.render.heading_class)
                    ));
                }
            }
            out.push('>');
            spans_to_html(content, config, out);
            out.push_str(&format!("</h{level}>\n"));
        }
        Block::Paragraph { content } => {
            out.push_str("<p>");
            spans_to_html(content, config, out);
            out.push_str("</p>\n");
        }
        Block::CodeBlock { language, content } => {
            out.push_str("<pre><code");
            if let Some(lang) = language {
                out.push_str(&format!(" class=\"language-{}\"", escape(lang)));
            }
            out.push('>');
            out.push_str(&escape(content));
            out.push_str("</code></pre>\n");
        }
        Block::List(list) => {
            list_to_html(list, config, out);
        }
        Block::Quote { blocks } => {
            out.push_str("<blockquote>\n");
            blocks_to_html(blocks, config, out);
            out.push_str("</blockquote>\n");
        }
        Block::Table { headers, rows } => {
            table_to_html(headers, rows, config, out);
        }
        Block::Html { html } => {
            out.push_str(html);
            if !html.ends_with('\n') {
                out.push('\n');
            }
        }
        Block::Rule => {
            out.push_str("<hr />\n");
        }
    }
}

fn spans_to_html(spans: &[Span], config: &Config, out: &mut String) {
    for span in spans {
        span_to_html(span, config, out);
    }
}

fn span_to_html(span: &Span, config: &Config, out: &mut String) {
    match span {
        Span::Text { text } => out.push_str(&escape(text)),
        Span::Bold { content } => wrap("strong", content, config, out),
        Span::Italic { content } => wrap("em", content, config, out),
        Span::Strikethrough { content } => wrap("del", content, config, out),
        Span::Code { code } => {
            out.push_str("<code>");
            out.push_str(&escape(code));
            out.push_str("</code>");
        }
        Span::Link { url, kind, content } => {
            out.push_str(&format!("<a href=\"{}\"", escape(url)));
            match kind {
                LinkKind::Fragment => {
                    let target = url.trim_start_matches('#');
                    out.push_str(&format!(" data-scroll-anchor=\"{}\"", escape(target)));
                }
                LinkKind::External => {
                    out.push_str(&format!(
                        " target=\"{}\" rel=\"{}\"",
                        escape(&config.links.external_target),
                        escape(&config.links.external_rel)
                    ));
                }
                LinkKind::Internal => {}
            }
            out.push('>');
            spans_to_html(content, config, out);
            out.push_str("</a>");
        }
        Span::Image { url, alt } => {
            out.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\" loading=\"lazy\" />",
                escape(url),
                escape(alt)
            ));
        }
        Span::Html { html } => out.push_str(html),
        Span::LineBreak => out.push_str("<br />\n"),
    }
}

fn wrap(tag: &str, content: &[Span], config: &Config, out: &mut String) {
    out.push_str(&format!("<{tag}>"));
    spans_to_html(content, config, out);
    out.push_str(&format!("</{tag}>"));
}

fn list_to_html(list: &List, config: &Config, out: &mut String) {
    match (list.ordered, list.start) {
        (true, Some(start)) => out.push_str(&format!("<ol start=\"{start}\">\n")),
        (true, None) => out.push_str("<ol>\n"),
        (false, _) => out.push_str("<ul>\n"),
    }

    for item in &list.items {
        out.push_str("<li>");
        match item.checked {
            Some(true) => out.push_str("<input type=\"checkbox\" disabled checked /> "),
            Some(false) => out.push_str("<input type=\"checkbox\" disabled /> "),
            None => {}
        }
        spans_to_html(&item.content, config, out);
        if let Some(ref nested) = item.nested {
            out.push('\n');
            list_to_html(nested, config, out);
        }
        out.push_str("</li>\n");
    }

    out.push_str(if list.ordered { "</ol>\n" } else { "</ul>\n" });
}

fn table_to_html(
    headers: &[Vec<Span>],
    rows: &[Vec<Vec<Span>>],
    config: &Config,
    out: &mut String,
) {
    if headers.is_empty() {
        return;
    }

    out.push_str("<table>\n<thead>\n<tr>");
    for cell in headers {
        out.push_str("<th>");
        spans_to_html(cell, config, out);
        out.push_str("</th>");
    }
    out.push_str("</tr>\n</thead>\n");

    if !rows.is_empty() {
        out.push_str("<tbody>\n");
        for row in rows {
            out.push_str("<tr>");
            for cell in row {
                out.push_str("<td>");
                spans_to_html(cell, config, out);
                out.push_str("</td>");
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</tbody>\n");
    }

    out.push_str("</table>\n");
}
