//! schema.org `FAQPage` annotation for search engines.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Value, json};

use crate::faq::FaqItem;

static MARKDOWN_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[*_`#>\[\]()~]").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Drop Markdown syntax characters and collapse whitespace.
///
/// This is a character-class substitution, not a Markdown parse: link
/// targets stay in the text, only their brackets go.
pub fn strip_markdown(text: &str) -> String {
    let stripped = MARKDOWN_CHARS_RE.replace_all(text, "");
    WHITESPACE_RE.replace_all(&stripped, " ").trim().to_string()
}

/// Build the `FAQPage` JSON-LD object, or `None` when there are no items.
pub fn faq_page(faqs: &[FaqItem]) -> Option<Value> {
    if faqs.is_empty() {
        return None;
    }

    let entities: Vec<Value> = faqs
        .iter()
        .map(|faq| {
            json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": strip_markdown(&faq.answer),
                },
            })
        })
        .collect();

    Some(json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": entities,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_syntax_characters() {
        assert_eq!(strip_markdown("**Scan** the `QR` code"), "Scan the QR code");
        assert_eq!(
            strip_markdown("See [plans](/en/products).\n\n> Note"),
            "See plans/en/products. Note"
        );
        assert_eq!(strip_markdown("  "), "");
    }

    #[test]
    fn empty_faqs_emit_nothing() {
        assert_eq!(faq_page(&[]), None);
    }

    #[test]
    fn builds_faq_page() {
        let faqs = vec![FaqItem {
            question: "What is an eSIM?".to_string(),
            answer: "An *embedded* SIM.".to_string(),
        }];
        assert_eq!(
            faq_page(&faqs),
            Some(json!({
                "@context": "https://schema.org",
                "@type": "FAQPage",
                "mainEntity": [{
                    "@type": "Question",
                    "name": "What is an eSIM?",
                    "acceptedAnswer": { "@type": "Answer", "text": "An embedded SIM." },
                }],
            }))
        );
    }
}
