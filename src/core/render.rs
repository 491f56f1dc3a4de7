//! Renderer module
//!
//! Renders ResultSet to different output formats: jsonl, json, md, raw

use crate::core::model::{Kind, ResultItem, ResultSet};
use crate::core::util::format_timestamp;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "raw" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Create a new render config with default options
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for result sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a result set to a string
    pub fn render(&self, result_set: &ResultSet) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(result_set),
            OutputFormat::Json => self.render_json(result_set),
            OutputFormat::Markdown => self.render_markdown(result_set),
            OutputFormat::Raw => self.render_raw(result_set),
        }
    }

    /// Render and print to stdout; empty output prints nothing
    pub fn print(&self, result_set: &ResultSet) {
        let output = self.render(result_set);
        if !output.is_empty() {
            println!("{}", output);
        }
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, result_set: &ResultSet) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as Markdown
    fn render_markdown(&self, result_set: &ResultSet) -> String {
        let mut output = String::new();

        let mut entries = Vec::new();
        let mut stale = Vec::new();
        let mut statuses = Vec::new();
        let mut infos = Vec::new();
        let mut errors = Vec::new();

        for item in &result_set.items {
            match item.kind {
                Kind::Entry => entries.push(item),
                Kind::Stale => stale.push(item),
                Kind::Status => statuses.push(item),
                Kind::Info => infos.push(item),
                Kind::Error => errors.push(item),
            }
        }

        if !errors.is_empty() {
            output.push_str("## Errors\n\n");
            for item in errors {
                for error in &item.errors {
                    output.push_str(&format!("- **{}**: {}\n", error.code, error.message));
                }
            }
            output.push('\n');
        }

        if !entries.is_empty() {
            output.push_str("## Recent resumes\n\n");
            output.push_str("| # | id | name | updated |\n");
            output.push_str("|---|----|------|---------|\n");
            for item in entries {
                self.render_entry_row(&mut output, item);
            }
            output.push('\n');
        }

        if !stale.is_empty() {
            output.push_str("## Not cached\n\n");
            for item in stale {
                if let Some(id) = &item.id {
                    output.push_str(&format!("- `{}`\n", id));
                }
            }
            output.push('\n');
        }

        if !statuses.is_empty() {
            output.push_str("## Status\n\n");
            for item in statuses {
                if let Some(serde_json::Value::Object(map)) = &item.data {
                    for (key, value) in map {
                        output.push_str(&format!("- **{}**: {}\n", key, value));
                    }
                }
            }
            output.push('\n');
        }

        if !infos.is_empty() {
            for item in infos {
                if let Some(message) = &item.message {
                    output.push_str(&format!("> {}\n", message));
                }
            }
            output.push('\n');
        }

        output.trim_end().to_string()
    }

    fn render_entry_row(&self, output: &mut String, item: &ResultItem) {
        let rank = item.rank.map(|r| r.to_string()).unwrap_or_default();
        let id = item.id.as_deref().unwrap_or("");
        let name = item.name.as_deref().unwrap_or("").replace('|', "\\|");
        let updated = item.timestamp.map(format_timestamp).unwrap_or_default();
        output.push_str(&format!("| {} | `{}` | {} | {} |\n", rank, id, name, updated));
    }

    /// Render as raw output: one id per line
    fn render_raw(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| item.id.clone().or_else(|| item.message.clone()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
