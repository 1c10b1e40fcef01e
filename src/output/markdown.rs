//! Markdown rendering of crawl results
//!
//! This module renders a crawl as a human-readable markdown document with
//! one article table per fetched archive page.

use crate::crawler::{ArticleRecord, CrawlOutput};
use crate::output::stats::CrawlStatistics;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown rendering of `output` to `output_path`
///
/// # Arguments
///
/// * `output` - The crawl result
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(output: &CrawlOutput, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(output);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl result as markdown
pub fn format_markdown_summary(output: &CrawlOutput) -> String {
    let stats = CrawlStatistics::from_output(output);
    let mut md = String::new();

    md.push_str("# Pravda Archive Crawl\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", output.started_at.to_rfc3339()));
    md.push_str(&format!(
        "- **Finished**: {}\n",
        output.finished_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Duration**: {} seconds\n",
        stats.duration_seconds
    ));
    md.push_str(&format!("- **Stopped By**: {}\n", stats.termination));
    md.push_str(&format!("- **Pages**: {}\n", stats.total_pages));
    md.push_str(&format!("- **Articles**: {}\n", stats.total_articles));
    md.push_str(&format!(
        "- **Without Date**: {}\n\n",
        stats.fallback_dates
    ));

    for (number, page) in output.pages.iter().enumerate() {
        md.push_str(&format!("## Page {}\n\n", number + 1));
        md.push_str(&format!("Source: <{}>\n\n", page.url));

        if page.articles.is_empty() {
            md.push_str("_No articles on this page._\n\n");
            continue;
        }

        md.push_str("| Date | Title | Subtitle | Link |\n");
        md.push_str("|------|-------|----------|------|\n");
        for article in &page.articles {
            md.push_str(&format_row(article));
        }
        md.push('\n');
    }

    md
}

fn format_row(article: &ArticleRecord) -> String {
    format!(
        "| {} | {} | {} | {} |\n",
        escape_cell(&article.date),
        escape_cell(&article.title),
        escape_cell(&article.subtitle),
        escape_cell(&article.link)
    )
}

/// Keeps cell content from breaking the table layout
fn escape_cell(value: &str) -> String {
    value
        .replace('|', "\\|")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
