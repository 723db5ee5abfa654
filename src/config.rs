use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Result;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub render: RenderConfig,
    pub links: LinksConfig,
    pub toc: TocConfig,
    pub faq: FaqConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Placeholder replaced by the widget at render time.
    pub widget_token: String,
    /// Class added to level 2 and 3 headings.
    pub heading_class: String,
    /// Class of the element wrapping a spliced widget.
    pub widget_class: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            widget_token: "{{TurkeyPlansWidget}}".to_string(),
            heading_class: "scroll-mt-24".to_string(),
            widget_class: "not-prose".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LinksConfig {
    pub external_target: String,
    pub external_rel: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            external_target: "_blank".to_string(),
            external_rel: "noopener noreferrer".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TocConfig {
    pub title: String,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            title: "Contents".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FaqConfig {
    pub title: String,
}

impl Default for FaqConfig {
    fn default() -> Self {
        Self {
            title: "Frequently asked questions".to_string(),
        }
    }
}

impl Config {
    /// The configuration bundled into the binary.
    pub fn compiled_default() -> Self {
        // build.rs has already checked the file parses
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(err) => {
                if path.exists() {
                    tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable config");
                }
                Self::compiled_default()
            }
        }
    }

    /// Load config from a TOML file, reporting read and parse failures.
    pub fn try_load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
