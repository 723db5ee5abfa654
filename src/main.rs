use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use pillar::Config;

#[derive(Parser)]
#[command(name = "pillar")]
#[command(about = "Structure Markdown articles: table of contents, FAQ and rendered HTML")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Common {
    /// Input Markdown file
    input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, default_value = "pillar.toml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the table of contents as JSON
    Toc {
        #[command(flatten)]
        common: Common,

        /// Emit the navigation HTML instead of JSON
        #[arg(long)]
        html: bool,
    },
    /// Print the FAQ items and residual document as JSON
    Faq {
        #[command(flatten)]
        common: Common,

        /// Emit the FAQPage JSON-LD annotation instead
        #[arg(long)]
        schema: bool,
    },
    /// Render the document to HTML
    Render {
        #[command(flatten)]
        common: Common,

        /// File whose contents replace each widget token
        #[arg(short, long)]
        widget: Option<PathBuf>,
    },
    /// Run the full pipeline and print the result as JSON
    Prepare {
        #[command(flatten)]
        common: Common,

        /// File whose contents replace each widget token
        #[arg(short, long)]
        widget: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Toc { common, html } => {
            let (markdown, config) = load(&common)?;
            let toc = pillar::extract_headings(&markdown);
            let out = if html {
                toc.to_html(&config.toc.title)
            } else {
                serde_json::to_string_pretty(&toc)?
            };
            write_output(common.output.as_deref(), &out)
        }
        Commands::Faq { common, schema } => {
            let (markdown, _) = load(&common)?;
            let extraction = pillar::extract_faq_section(&markdown);
            let out = if schema {
                match pillar::faq_page(&extraction.faqs) {
                    Some(value) => serde_json::to_string_pretty(&value)?,
                    None => String::new(),
                }
            } else {
                serde_json::to_string_pretty(&extraction)?
            };
            write_output(common.output.as_deref(), &out)
        }
        Commands::Render { common, widget } => {
            let (markdown, config) = load(&common)?;
            let widget = read_widget(widget.as_deref())?;
            let out = pillar::markdown_to_html(&markdown, &config, widget.as_deref());
            write_output(common.output.as_deref(), &out)
        }
        Commands::Prepare { common, widget } => {
            let (markdown, config) = load(&common)?;
            let widget = read_widget(widget.as_deref())?;
            let article = pillar::prepare(&markdown, &config, widget.as_deref());
            write_output(common.output.as_deref(), &article.to_json()?)
        }
    }
}

fn load(common: &Common) -> anyhow::Result<(String, Config)> {
    let markdown = fs::read_to_string(&common.input)
        .with_context(|| format!("reading {}", common.input.display()))?;
    let config = Config::load(&common.config);
    Ok((markdown, config))
}

fn read_widget(path: Option<&Path>) -> anyhow::Result<Option<String>> {
    path.map(|path| {
        fs::read_to_string(path).with_context(|| format!("reading widget {}", path.display()))
    })
    .transpose()
}

fn write_output(path: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Created {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}
