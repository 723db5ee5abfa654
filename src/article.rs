use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::Result;
use crate::faq::{FaqItem, extract_faq_section};
use crate::html::escape;
use crate::render::Renderer;
use crate::structured_data;
use crate::toc::{TableOfContents, extract_headings};

/// Everything a pillar page needs from one Markdown document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedArticle {
    /// The document with its FAQ section removed.
    pub content: String,
    pub toc: TableOfContents,
    pub faqs: Vec<FaqItem>,
    /// Rendered body, widgets spliced in.
    pub html: String,
    /// Rendered answer of each FAQ item, same order as `faqs`.
    pub faq_answers_html: Vec<String>,
    /// `FAQPage` JSON-LD, absent when there are no FAQ items.
    pub faq_schema: Option<Value>,
}

impl PreparedArticle {
    pub fn toc_html(&self, config: &Config) -> String {
        self.toc.to_html(&config.toc.title)
    }

    /// The FAQ accordion shown under the article body: a titled section with
    /// one `<details>` per item. Empty when there are no FAQ items.
    pub fn faq_html(&self, config: &Config) -> String {
        if self.faqs.is_empty() {
            return String::new();
        }

        let mut out = String::from("<section class=\"faq\">\n");
        if !config.faq.title.is_empty() {
            out.push_str(&format!("<h2>{}</h2>\n", escape(&config.faq.title)));
        }
        for (faq, answer_html) in self.faqs.iter().zip(&self.faq_answers_html) {
            out.push_str("<details>\n");
            out.push_str(&format!("<summary>{}</summary>\n", escape(&faq.question)));
            if !faq.answer.is_empty() {
                out.push_str("<div>\n");
                out.push_str(answer_html);
                out.push_str("</div>\n");
            }
            out.push_str("</details>\n");
        }
        out.push_str("</section>\n");
        out
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run the whole pipeline: lift the FAQ section out, build the table of
/// contents from what remains, render the body with it, and derive the FAQ
/// annotation.
pub fn prepare(document: &str, config: &Config, widget: Option<&str>) -> PreparedArticle {
    let extraction = extract_faq_section(document);
    let toc = extract_headings(&extraction.content);
    let renderer = Renderer::new(config);

    let html = renderer
        .render(&extraction.content, &toc, widget)
        .to_html(config);

    let faq_answers_html = extraction
        .faqs
        .iter()
        .map(|faq| {
            renderer
                .render(&faq.answer, &extract_headings(&faq.answer), None)
                .to_html(config)
        })
        .collect();

    let faq_schema = structured_data::faq_page(&extraction.faqs);

    tracing::debug!(
        headings = toc.len(),
        faqs = extraction.faqs.len(),
        "prepared article"
    );

    PreparedArticle {
        content: extraction.content,
        toc,
        faqs: extraction.faqs,
        html,
        faq_answers_html,
        faq_schema,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "## Why eSIM\n\nNo plastic.\n\n{{TurkeyPlansWidget}}\n\n## FAQ\n\n### Is it **safe**?\n\nYes.\n\n## Coverage\n\n81 provinces.";

    #[test]
    fn faq_headings_leave_the_toc() {
        let article = prepare(DOC, &Config::default(), Some("<w/>"));
        let ids: Vec<_> = article.toc.ids().collect();
        assert_eq!(ids, vec!["why-esim", "coverage"]);
        assert!(!article.html.contains("Is it"));
        assert!(article.html.contains("<w/>"));
    }

    #[test]
    fn faq_answers_are_rendered() {
        let article = prepare(DOC, &Config::default(), None);
        assert_eq!(article.faqs.len(), 1);
        assert_eq!(article.faqs[0].question, "Is it **safe**?");
        assert_eq!(article.faq_answers_html, vec!["<p>Yes.</p>\n".to_string()]);
        assert!(article.faq_schema.is_some());

        let json: Value = serde_json::from_str(&article.to_json().unwrap()).unwrap();
        assert_eq!(json["faqs"][0]["answer"], "Yes.");
        assert_eq!(json["toc"][0]["level"], 2);
    }

    #[test]
    fn faq_accordion() {
        let doc = "## FAQ\n\n### Is it <safe>?\n\nYes.\n\n### Empty one\n";
        let mut config = Config::default();
        config.faq.title = "Häufige Fragen".to_string();
        let article = prepare(doc, &config, None);

        assert_eq!(
            article.faq_html(&config),
            "<section class=\"faq\">\n<h2>Häufige Fragen</h2>\n\
             <details>\n<summary>Is it &lt;safe&gt;?</summary>\n<div>\n<p>Yes.</p>\n</div>\n</details>\n\
             <details>\n<summary>Empty one</summary>\n</details>\n</section>\n"
        );
    }

    #[test]
    fn faq_accordion_empty_without_items() {
        let article = prepare("## Only\n\ntext", &Config::default(), None);
        assert_eq!(article.faq_html(&Config::default()), "");
    }

    #[test]
    fn no_faq_no_schema() {
        let article = prepare("## Only\n\ntext", &Config::default(), None);
        assert!(article.faqs.is_empty());
        assert_eq!(article.faq_schema, None);
        assert!(article.toc_html(&Config::default()).contains("href=\"#only\""));
    }
}
