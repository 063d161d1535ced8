//! Table-fragment extraction from HTML markup.

use scraper::{Html, Selector};
use tabgrid_core::{Result, TabgridError};

/// Extract every `<table>` element from a document as renderable markup, in
/// document order.
///
/// Nested tables are returned as separate fragments in addition to their
/// enclosing table, matching CSS selector semantics. Markup that does not
/// parse as HTML still yields a best-effort (possibly empty) result; real
/// documents are messy and the parser is lenient.
///
/// # Errors
///
/// Returns [`TabgridError::Markup`] if the table selector cannot be built.
pub fn extract_tables(markup: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(markup);
    let selector = Selector::parse("table")
        .map_err(|e| TabgridError::Markup(format!("invalid selector: {e}")))?;

    let fragments: Vec<String> = document
        .select(&selector)
        .map(|element| element.html())
        .collect();

    log::debug!("extracted {} table fragment(s)", fragments.len());
    Ok(fragments)
}
