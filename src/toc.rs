use serde::{Serialize, Serializer};

use crate::html::escape;
use crate::scan::{self, FenceTracker};
use crate::slug::Slugger;

/// Heading depths that take part in the table of contents. Level 1 is the
/// page title and is rendered outside the document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    H2,
    H3,
}

impl HeadingLevel {
    pub fn from_depth(depth: u8) -> Option<Self> {
        match depth {
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            _ => None,
        }
    }

    pub fn depth(self) -> u8 {
        match self {
            Self::H2 => 2,
            Self::H3 => 3,
        }
    }
}

impl Serialize for HeadingLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.depth())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub id: String,
    pub text: String,
    pub level: HeadingLevel,
    /// Zero-based line of the heading in the scanned document.
    #[serde(skip)]
    pub line: usize,
}

/// Level-2 and level-3 headings in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TableOfContents(Vec<Heading>);

impl TableOfContents {
    pub fn new(headings: Vec<Heading>) -> Self {
        Self(headings)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Heading> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|h| h.id.as_str())
    }

    pub fn find(&self, id: &str) -> Option<&Heading> {
        self.0.iter().find(|h| h.id == id)
    }

    pub fn into_inner(self) -> Vec<Heading> {
        self.0
    }

    /// Render the navigation list shown beside an article.
    ///
    /// Returns an empty string when there are no headings. An empty `title`
    /// omits the title element (the collapsed mobile variant).
    pub fn to_html(&self, title: &str) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut out = String::from("<nav aria-label=\"Table of contents\">\n");
        if !title.is_empty() {
            out.push_str(&format!("<h2>{}</h2>\n", escape(title)));
        }
        out.push_str("<ul>\n");
        for heading in &self.0 {
            match heading.level {
                HeadingLevel::H2 => out.push_str("<li>"),
                HeadingLevel::H3 => out.push_str("<li class=\"toc-nested\">"),
            }
            out.push_str(&format!(
                "<a href=\"#{}\">{}</a></li>\n",
                escape(&heading.id),
                escape(&heading.text)
            ));
        }
        out.push_str("</ul>\n</nav>\n");
        out
    }
}

impl<'a> IntoIterator for &'a TableOfContents {
    type Item = &'a Heading;
    type IntoIter = std::slice::Iter<'a, Heading>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Scan a document for level-2 and level-3 headings.
///
/// Lines inside triple-backtick fences are skipped. Ids are unique within
/// the returned table; repeated text gets `-1`, `-2`, ... suffixes.
pub fn extract_headings(document: &str) -> TableOfContents {
    let mut slugger = Slugger::new();
    let mut fence = FenceTracker::default();
    let mut headings = Vec::new();

    for (line, content) in scan::lines(document).into_iter().enumerate() {
        let trimmed = content.trim();
        if !fence.is_structural(trimmed) {
            continue;
        }
        let Some((depth, text)) = scan::heading_line(trimmed) else {
            continue;
        };
        let Some(level) = HeadingLevel::from_depth(depth) else {
            continue;
        };
        let id = slugger.slug(&text);
        headings.push(Heading {
            id,
            text,
            level,
            line,
        });
    }

    tracing::trace!(count = headings.len(), "extracted headings");
    TableOfContents(headings)
}
