//! Statistics over a finished crawl
//!
//! This module summarises a [`CrawlOutput`] for display on the console.

use crate::crawler::CrawlOutput;
use crate::state::Termination;
use crate::url::MISSING_DATE;

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlStatistics {
    /// Number of archive pages fetched
    pub total_pages: usize,

    /// Number of articles across all pages
    pub total_articles: usize,

    /// Articles whose link carried no date segment
    pub fallback_dates: usize,

    /// Article count per fetched page, in fetch order
    pub articles_per_page: Vec<(String, usize)>,

    /// Why the crawl stopped
    pub termination: Termination,

    /// Wall-clock duration in seconds
    pub duration_seconds: i64,
}

impl CrawlStatistics {
    /// Computes statistics from a crawl result
    pub fn from_output(output: &CrawlOutput) -> Self {
        let fallback_dates = output
            .articles()
            .filter(|article| article.date.starts_with(MISSING_DATE))
            .count();

        let articles_per_page = output
            .pages
            .iter()
            .map(|page| (page.url.clone(), page.articles.len()))
            .collect();

        Self {
            total_pages: output.len(),
            total_articles: output.article_count(),
            fallback_dates,
            articles_per_page,
            termination: output.termination,
            duration_seconds: (output.finished_at - output.started_at).num_seconds(),
        }
    }

    /// Share of articles that have a real date, as a percentage
    pub fn dated_rate(&self) -> f64 {
        if self.total_articles == 0 {
            return 0.0;
        }
        let dated = self.total_articles - self.fallback_dates;
        (dated as f64 / self.total_articles as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Pages fetched: {}", stats.total_pages);
    println!("  Articles extracted: {}", stats.total_articles);
    println!("  Stopped by: {}", stats.termination);
    println!("  Duration: {}s", stats.duration_seconds);
    println!();

    println!("Articles by Page:");
    for (url, count) in &stats.articles_per_page {
        println!("  {}: {}", url, count);
    }
    println!();

    if stats.fallback_dates > 0 {
        println!(
            "Articles without a date in their link: {}",
            stats.fallback_dates
        );
    }

    println!(
        "Dated Rate: {:.1}% ({} / {} articles)",
        stats.dated_rate(),
        stats.total_articles - stats.fallback_dates,
        stats.total_articles
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::{ArticleRecord, PageTable};
    use chrono::{Duration, Utc};

    fn record(date: &str) -> ArticleRecord {
        ArticleRecord {
            title: "Title".to_string(),
            subtitle: "Subtitle".to_string(),
            date: date.to_string(),
            link: "https://www.pravda.com.ua/news/1/".to_string(),
        }
    }

    #[test]
    fn test_statistics_from_output() {
        let finished_at = Utc::now();
        let output = CrawlOutput {
            pages: vec![
                PageTable {
                    url: "https://www.pravda.com.ua/archives/date_10092019/".to_string(),
                    articles: vec![record("2019/09/10 14:30"), record("missing date 13:00")],
                },
                PageTable {
                    url: "https://www.pravda.com.ua/archives/date_09092019/".to_string(),
                    articles: vec![
                        record("2019/09/09 23:10"),
                        record("2019/09/09 22:00"),
                    ],
                },
            ],
            termination: Termination::EndMarker,
            started_at: finished_at - Duration::seconds(7),
            finished_at,
        };

        let stats = CrawlStatistics::from_output(&output);

        assert_eq!(stats.total_pages, 2);
        assert_eq!(stats.total_articles, 4);
        assert_eq!(stats.fallback_dates, 1);
        assert_eq!(stats.duration_seconds, 7);
        assert_eq!(stats.articles_per_page[1].1, 2);
        assert!((stats.dated_rate() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dated_rate_no_articles() {
        let now = Utc::now();
        let output = CrawlOutput {
            pages: vec![],
            termination: Termination::PageLimit,
            started_at: now,
            finished_at: now,
        };

        let stats = CrawlStatistics::from_output(&output);
        assert_eq!(stats.dated_rate(), 0.0);
        assert_eq!(stats.termination, Termination::PageLimit);
    }
}
