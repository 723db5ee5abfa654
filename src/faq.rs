use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::scan::{self, FenceTracker};

static FAQ_START_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^##\s+faq(?-u:\b)").unwrap());
static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^##\s+").unwrap());
static QUESTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^###\s+(.+)$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqItem {
    pub question: String,
    /// Markdown, possibly several paragraphs.
    pub answer: String,
}

/// A document with its FAQ section lifted out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqExtraction {
    pub content: String,
    pub faqs: Vec<FaqItem>,
}

/// Lift the first `## FAQ...` section out of a document.
///
/// Every `###` heading inside the section starts a question; the lines up to
/// the next question (or the end of the section) are its answer. Text between
/// the FAQ heading and the first question is dropped. Without a FAQ section
/// the trimmed document comes back with no items.
pub fn extract_faq_section(document: &str) -> FaqExtraction {
    let lines = scan::lines(document);

    let Some(start) = find_line(&lines, 0, &FAQ_START_RE) else {
        return FaqExtraction {
            content: document.trim().to_string(),
            faqs: Vec::new(),
        };
    };
    let end = find_line(&lines, start + 1, &SECTION_RE).unwrap_or(lines.len());

    let faqs = collect_items(&lines[start + 1..end]);
    tracing::debug!(start, end, items = faqs.len(), "extracted FAQ section");

    let content = lines[..start]
        .iter()
        .chain(&lines[end..])
        .copied()
        .collect::<Vec<_>>()
        .join("\n");

    FaqExtraction {
        content: content.trim().to_string(),
        faqs,
    }
}

/// Index of the first structural line at or after `from` matching `pattern`.
fn find_line(lines: &[&str], from: usize, pattern: &Regex) -> Option<usize> {
    let mut fence = FenceTracker::default();
    lines
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, line)| {
            let trimmed = line.trim();
            fence.is_structural(trimmed) && pattern.is_match(trimmed)
        })
        .map(|(index, _)| index)
}

fn collect_items(section: &[&str]) -> Vec<FaqItem> {
    let mut items = Vec::new();
    let mut fence = FenceTracker::default();
    let mut question: Option<String> = None;
    let mut answer: Vec<&str> = Vec::new();

    for &line in section {
        let trimmed = line.trim();
        let structural = fence.is_structural(trimmed);
        if structural && let Some(caps) = QUESTION_RE.captures(trimmed) {
            if let Some(previous) = question.take() {
                items.push(finish_item(&previous, &answer));
            }
            question = Some(caps[1].to_string());
            answer.clear();
            continue;
        }
        if question.is_some() {
            answer.push(line);
        }
    }

    if let Some(last) = question {
        items.push(finish_item(&last, &answer));
    }
    items
}

fn finish_item(question: &str, answer: &[&str]) -> FaqItem {
    FaqItem {
        question: scan::strip_trailing_hashes(question),
        answer: answer.join("\n").trim().to_string(),
    }
}
