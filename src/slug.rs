//! Heading slug generation.
//!
//! [`slugify`] is the pure text-to-slug function. [`Slugger`] wraps it with
//! the per-document counter that disambiguates repeated headings; build a
//! fresh one for every extraction or render.

use std::collections::{HashMap, HashSet};

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Slug used when heading text has no ASCII letters or digits left.
pub const FALLBACK_SLUG: &str = "section";

/// Turn heading text into a lowercase, hyphen-separated identifier.
///
/// ```
/// use pillar::slugify;
///
/// assert_eq!(slugify("Getting Started"), "getting-started");
/// assert_eq!(slugify("Café & Bar"), "cafe-bar");
/// assert_eq!(slugify("???"), "section");
/// ```
pub fn slugify(text: &str) -> String {
    let folded: String = text
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    let kept: String = folded
        .trim()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect();

    let slug = kept
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Hands out unique slugs within one document.
///
/// The first occurrence of a base slug is returned as-is, later ones get
/// `-1`, `-2`, ... appended.
#[derive(Debug, Default)]
pub struct Slugger {
    counts: HashMap<String, usize>,
    taken: HashSet<String>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slugger that will never return any of `ids`.
    pub fn seeded<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            counts: HashMap::new(),
            taken: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Slug `text`, disambiguating against everything this slugger has seen.
    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let count = self.counts.entry(base.clone()).or_insert(0);

        loop {
            let candidate = if *count == 0 {
                base.clone()
            } else {
                format!("{base}-{count}")
            };
            *count += 1;
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Getting Started"), "getting-started");
        assert_eq!(slugify("  Hello,   World!  "), "hello-world");
        assert_eq!(slugify("Phase 2: Setup"), "phase-2-setup");
    }

    #[test]
    fn slugify_strips_diacritics() {
        assert_eq!(slugify("Café & Bar"), "cafe-bar");
        assert_eq!(slugify("Über Straße"), "uber-strae");
        assert_eq!(slugify("Việt Nam eSIM"), "viet-nam-esim");
    }

    #[test]
    fn slugify_collapses_hyphens() {
        assert_eq!(slugify("a -- b"), "a-b");
        assert_eq!(slugify("-leading and trailing-"), "leading-and-trailing");
        assert_eq!(slugify("snake_case"), "snakecase");
    }

    #[test]
    fn slugify_fallback() {
        assert_eq!(slugify(""), "section");
        assert_eq!(slugify("   "), "section");
        assert_eq!(slugify("日本語"), "section");
        assert_eq!(slugify("---"), "section");
    }

    #[test]
    fn slugger_disambiguates() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("Setup"), "setup");
        assert_eq!(slugger.slug("Setup"), "setup-1");
        assert_eq!(slugger.slug("setup"), "setup-2");
        assert_eq!(slugger.slug("Other"), "other");
    }

    #[test]
    fn slugger_skips_taken_suffixes() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("a 1"), "a-1");
        assert_eq!(slugger.slug("a"), "a");
        assert_eq!(slugger.slug("a"), "a-2");
    }

    #[test]
    fn seeded_slugger_avoids_known_ids() {
        let mut slugger = Slugger::seeded(["intro", "intro-1"]);
        assert_eq!(slugger.slug("Intro"), "intro-2");
        assert_eq!(slugger.slug("Fresh"), "fresh");
    }

    #[test]
    fn fresh_sluggers_agree() {
        let run = || {
            let mut slugger = Slugger::new();
            ["A", "A", "B"].map(|t| slugger.slug(t))
        };
        assert_eq!(run(), run());
    }
}
