use pillar::{
    Block, Config, FaqItem, Heading, HeadingLevel, Renderer, extract_faq_section,
    extract_headings, prepare, slugify,
};

fn heading(id: &str, text: &str, level: HeadingLevel, line: usize) -> Heading {
    Heading {
        id: id.to_string(),
        text: text.to_string(),
        level,
        line,
    }
}

#[test]
fn repeated_heading_text_is_disambiguated() {
    let toc = extract_headings("## Getting Started\nText.\n## Getting Started\nMore text.");
    assert_eq!(
        toc.into_inner(),
        vec![
            heading("getting-started", "Getting Started", HeadingLevel::H2, 0),
            heading("getting-started-1", "Getting Started", HeadingLevel::H2, 2),
        ]
    );
}

#[test]
fn faq_section_is_lifted_out() {
    let doc = "## Intro\nWelcome.\n## FAQ\n### What is an eSIM?\nAn eSIM is ...\n### How do I install it?\nScan a QR code.\n## Next Section\n...";
    let extraction = extract_faq_section(doc);

    assert_eq!(
        extraction.faqs,
        vec![
            FaqItem {
                question: "What is an eSIM?".to_string(),
                answer: "An eSIM is ...".to_string(),
            },
            FaqItem {
                question: "How do I install it?".to_string(),
                answer: "Scan a QR code.".to_string(),
            },
        ]
    );
    assert!(extraction.content.contains("## Next Section\n..."));
    assert!(!extraction.content.contains("## FAQ"));
    assert!(!extraction.content.contains("eSIM"));

    let ids: Vec<_> = extract_headings(&extraction.content)
        .ids()
        .map(str::to_string)
        .collect();
    assert_eq!(ids, vec!["intro", "next-section"]);
}

#[test]
fn document_without_faq_is_returned_trimmed() {
    let doc = "\n\n## Coverage\nWorks in 81 provinces.\n\n";
    let extraction = extract_faq_section(doc);
    assert!(extraction.faqs.is_empty());
    assert_eq!(extraction.content, doc.trim());
}

#[test]
fn slug_of_decorated_heading() {
    let toc = extract_headings("## Café & Bar #");
    assert_eq!(toc.iter().next().map(|h| h.id.as_str()), Some("cafe-bar"));
    assert_eq!(slugify("Café & Bar"), "cafe-bar");
}

#[test]
fn widget_token_twice() {
    let config = Config::default();
    let widget = "<div id=\"turkey-plans\"></div>";
    let doc = "## Plans\n\nBefore.\n\n{{TurkeyPlansWidget}}\n\nBetween.\n\n{{TurkeyPlansWidget}}\n\nAfter.";

    let html = Renderer::new(&config)
        .render(doc, &extract_headings(doc), Some(widget))
        .to_html(&config);

    assert_eq!(html.matches(widget).count(), 2);
    assert!(!html.contains("{{TurkeyPlansWidget}}"));
    let positions: Vec<usize> = ["Before.", widget, "Between.", "After."]
        .iter()
        .map(|needle| html.find(needle).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(html.rfind(widget).unwrap() < html.find("After.").unwrap());
}

#[test]
fn introduction_inside_faq_is_discarded() {
    let extraction = extract_faq_section("## FAQ\nRead these first.\n\n### Q1\nA1");
    assert_eq!(extraction.faqs.len(), 1);
    assert_eq!(extraction.faqs[0].answer, "A1");
    assert_eq!(extraction.content, "");
}

#[test]
fn prepared_article_is_consistent() {
    let doc = "# Turkey eSIM\n\n## Plans\n\n[FAQ](#faq) · [Shop](https://shop.example)\n\n{{TurkeyPlansWidget}}\n\n## Plans\n\n```md\n## Not a heading\n```\n\n## FAQ\n\n### Will it work?\n\nYes, see [plans](#plans).\n";
    let config = Config::default();
    let article = prepare(doc, &config, Some("<aside>widget</aside>"));

    let ids: Vec<_> = article.toc.ids().collect();
    assert_eq!(ids, vec!["plans", "plans-1"]);
    assert!(article.html.contains("<h2 id=\"plans\" class=\"scroll-mt-24\">Plans</h2>"));
    assert!(article.html.contains("<h2 id=\"plans-1\" class=\"scroll-mt-24\">Plans</h2>"));
    assert!(article.html.contains("<h1>Turkey eSIM</h1>"));
    assert!(article.html.contains("data-scroll-anchor=\"faq\""));
    assert!(article.html.contains("rel=\"noopener noreferrer\""));
    assert!(article.html.contains("<aside>widget</aside>"));
    assert!(article.html.contains("## Not a heading"));

    let schema = article.faq_schema.expect("faq schema");
    assert_eq!(schema["mainEntity"][0]["name"], "Will it work?");
    assert_eq!(
        schema["mainEntity"][0]["acceptedAnswer"]["text"],
        "Yes, see plansplans."
    );
}

#[test]
fn parse_assigns_ids_without_toc() {
    let blocks = pillar::parse("## One\n\n## One");
    let ids: Vec<_> = blocks
        .iter()
        .filter_map(|b| match b {
            Block::Heading { id, .. } => id.clone(),
            _ => None,
        })
        .collect();
    assert_eq!(ids, vec!["one", "one-1"]);
}

#[test]
fn degenerate_inputs() {
    for doc in ["", "```", "```\n```\n```", "##", "## FAQ", "\u{0}\u{1}\u{7f}", "### \n#"] {
        let article = prepare(doc, &Config::default(), Some("w"));
        let unique: std::collections::HashSet<_> = article.toc.ids().collect();
        assert_eq!(unique.len(), article.toc.len());
    }
}

#[test]
fn concurrent_articles_match_sequential_runs() {
    let config = Config::default();
    let docs = [
        "## Plans\n\n## Plans\n\n## FAQ\n\n### Which plan?\n\nThe 10 GB one.",
        "## Plans\n\n### Coverage\n\n{{TurkeyPlansWidget}}\n\n## Plans\n\n## Plans",
    ];
    let sequential: Vec<_> = docs
        .iter()
        .map(|doc| prepare(doc, &config, Some("<w/>")))
        .collect();

    for _ in 0..8 {
        let concurrent: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = docs
                .iter()
                .map(|doc| {
                    let config = &config;
                    scope.spawn(move || prepare(doc, config, Some("<w/>")))
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });
        assert_eq!(concurrent, sequential);
    }

    let ids: Vec<_> = sequential[1].toc.ids().collect();
    assert_eq!(ids, vec!["plans", "coverage", "plans-1", "plans-2"]);
}
