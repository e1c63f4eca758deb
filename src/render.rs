//! HTML report rendering.
//!
//! Produces a single self-contained page with one table row per changelog
//! entry and a client-side filter. Every value coming from repository
//! content goes through Tera's HTML autoescaping.
use chrono::{DateTime, Utc};
use log::*;
use serde::Serialize;
use tera::{Context, Tera};

use crate::{Result, changelog::RepositoryReport};

/// Sortable timestamp format stamped on every rendered document.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";
/// Default page title.
pub const DEFAULT_TITLE: &str = "Changelog Hub";
/// Text of the row shown when no repository produced any entries.
pub const PLACEHOLDER_TEXT: &str = "No changelog entries found.";

// the .html suffix is what turns on Tera's autoescaping
const TEMPLATE_NAME: &str = "index.html";
const TEMPLATE: &str = include_str!("render/index.html.tera");

/// A rendered page ready to be written and uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub html: String,
    pub generated_at: String,
    pub entry_count: usize,
}

#[derive(Debug, Serialize)]
struct Row<'a> {
    repository: String,
    version: &'a str,
    date: String,
    summary: &'a str,
}

/// Renders repository reports into a [`Document`].
#[derive(Debug, Clone)]
pub struct Renderer {
    tera: Tera,
    title: String,
}

impl Renderer {
    pub fn new(title: impl Into<String>) -> Result<Self> {
        let mut tera = Tera::default();
        // encode_text covers `&`, `<` and `>` and leaves `/` readable
        tera.set_escape_fn(|input: &str| {
            html_escape::encode_text(input).into_owned()
        });
        tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)?;
        Ok(Self {
            tera,
            title: title.into(),
        })
    }

    /// Renders every entry of every report, repository order first and entry
    /// order second.
    pub fn render(
        &self,
        generated_at: DateTime<Utc>,
        reports: &[RepositoryReport],
    ) -> Result<Document> {
        let rows = reports
            .iter()
            .flat_map(|report| {
                report.entries.iter().map(|entry| Row {
                    repository: report.repository.to_string(),
                    version: &entry.version,
                    date: entry.date.to_string(),
                    summary: &entry.summary,
                })
            })
            .collect::<Vec<_>>();

        let generated_at = generated_at.format(TIMESTAMP_FORMAT).to_string();

        debug!("rendering {} rows generated at {generated_at}", rows.len());

        let mut context = Context::new();
        context.insert("title", &self.title);
        context.insert("generated_at", &generated_at);
        context.insert("placeholder", PLACEHOLDER_TEXT);
        context.insert("rows", &rows);

        let html = self.tera.render(TEMPLATE_NAME, &context)?;

        Ok(Document {
            html,
            generated_at,
            entry_count: rows.len(),
        })
    }
}
