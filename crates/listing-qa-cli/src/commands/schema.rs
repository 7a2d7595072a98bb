//! Schema commands - inspect the category table.

use anyhow::Result;
use clap::Args;
use listing_qa_core::schema::{categories, lookup, DEFAULT_CATEGORY};
use serde::Serialize;
use tracing::debug;

use crate::output::JsonOutput;

/// Arguments for the `schema` command.
#[derive(Args, Clone)]
pub struct SchemaArgs {
    /// Category to look up (defaults to the default category)
    pub category: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Required attributes of one category.
#[derive(Debug, Serialize)]
pub struct CategorySchema {
    /// The category that was looked up.
    pub category: String,
    /// Required attribute keys; empty for unknown categories.
    pub required: Vec<&'static str>,
}

/// Category listing.
#[derive(Debug, Serialize)]
pub struct CategoryList {
    /// Category used when a submission names none.
    pub default: &'static str,
    /// All categories with a schema.
    pub categories: Vec<&'static str>,
}

/// Builds the schema document for a category.
///
/// Unlike scoring, an unknown category does not fall back to the default
/// here; it reports an empty list.
#[must_use]
pub fn describe(category: Option<&str>) -> CategorySchema {
    let category = category.unwrap_or(DEFAULT_CATEGORY);
    let required = lookup(category).unwrap_or(&[]).to_vec();
    debug!(category, required = required.len(), "Schema lookup");

    CategorySchema {
        category: category.to_string(),
        required,
    }
}

/// Run the schema command.
pub fn run(args: &SchemaArgs) -> Result<()> {
    let output = JsonOutput::stdout(args.pretty);
    output.write_value(&describe(args.category.as_deref()))
}

/// Run the categories command.
pub fn run_categories() -> Result<()> {
    let list = CategoryList {
        default: DEFAULT_CATEGORY,
        categories: categories().collect(),
    };
    JsonOutput::stdout(false).write_value(&list)
}
