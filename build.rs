use std::fs;

const DEFAULT_CONFIG: &str = "src/default_config.toml";

fn main() {
    println!("cargo:rerun-if-changed={DEFAULT_CONFIG}");

    let content = fs::read_to_string(DEFAULT_CONFIG)
        .unwrap_or_else(|e| panic!("cannot read {DEFAULT_CONFIG}: {e}"));
    let table = content
        .parse::<toml::Table>()
        .unwrap_or_else(|e| panic!("invalid {DEFAULT_CONFIG}: {e}"));

    // An empty token would make every document one segment with no widget slot
    let token = table
        .get("render")
        .and_then(|render| render.get("widget_token"))
        .and_then(|token| token.as_str());
    match token {
        Some(token) if !token.trim().is_empty() => {}
        _ => panic!("{DEFAULT_CONFIG}: [render] widget_token must be a non-empty string"),
    }
}
