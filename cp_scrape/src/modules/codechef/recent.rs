use crate::types::submission::{RecentSubmissions, SubmissionRecord};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use cp_scrape_libs::{document, fetch::Result};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tokio::time::{self, Duration};

use super::fetcher::PageFetcher;

/// Hard ceiling on listing pages walked per request. The site serves an
/// unbounded page range, so a request for more submissions than exist would
/// otherwise never terminate.
const MAX_PAGES: usize = 50;

/// Pause between successive listing pages.
const PAGE_INTERVAL: Duration = Duration::from_millis(200);

const ABSOLUTE_TIME_FORMAT: &str = "%I:%M %p %d/%m/%y";

/// Submissions younger than a day render as an offset, e.g. "45 min".
static RELATIVE_TIME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\s+(\w+)").unwrap());

pub struct RecentPageScraper {
    table: Selector,
    tr: Selector,
    td: Selector,
    a: Selector,
    span: Selector,
}

impl RecentPageScraper {
    pub fn new() -> Self {
        RecentPageScraper {
            table: document::selector("table"),
            tr: document::selector("tbody > tr"),
            td: document::selector("td"),
            a: document::selector("a"),
            span: document::selector("span"),
        }
    }

    /// All submission rows of one listing page, newest first as listed.
    pub fn extract_rows(&self, html: &Html) -> Result<Vec<SubmissionRecord>> {
        let table = document::require(
            html.select(&self.table).next(),
            "recent submissions table",
        )?;

        let mut records = Vec::new();
        for row in table.select(&self.tr) {
            let cells: Vec<ElementRef> = row.select(&self.td).collect();
            let time_cell = document::require(cells.first().copied(), "submission time cell")?;
            let problem_cell = document::require(cells.get(1).copied(), "submission problem cell")?;
            let verdict_cell = document::require(cells.get(2).copied(), "submission verdict cell")?;
            let language_cell = document::require(cells.get(3).copied(), "submission language cell")?;

            let sub_time = parse_sub_time(&document::text_of(time_cell), Local::now());

            let link = document::require(
                document::first_match(problem_cell, &self.a),
                "submission problem link",
            )?;
            let href = document::require(
                document::attribute(link, "href"),
                "submission problem href",
            )?;
            let problem_code = href.rsplit('/').next().unwrap_or(href).to_string();

            let title = document::require(
                document::first_match(verdict_cell, &self.span)
                    .and_then(|span| document::attribute(span, "title")),
                "submission verdict title",
            )?;
            let points = document::text_of(verdict_cell).trim().to_string();
            // A displayed points value always means the submission was
            // accepted, whatever the title attribute claims.
            let verdict = if points.is_empty() {
                title.to_string()
            } else {
                String::from("accepted")
            };

            let language = document::text_of(language_cell).trim().to_string();

            records.push(SubmissionRecord {
                sub_time,
                problem_code,
                verdict,
                points,
                language,
            });
        }
        Ok(records)
    }
}

/// Resolve a submission-time cell into a Unix timestamp. Absolute times use
/// the site's fixed 12-hour format; everything else is a relative offset
/// from now ("45 min", "3 hours"), with unknown units counting as zero.
pub fn parse_sub_time(text: &str, now: DateTime<Local>) -> i64 {
    let text = text.trim();
    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, ABSOLUTE_TIME_FORMAT) {
        if let Some(local) = Local.from_local_datetime(&parsed).earliest() {
            return local.timestamp();
        }
    }

    let offset = RELATIVE_TIME.captures(text).map_or(0, |caps| {
        let value: i64 = caps[1].parse().unwrap_or(0);
        match &caps[2] {
            "min" => value * 60,
            "hours" => value * 3600,
            _ => 0,
        }
    });
    now.timestamp() - offset
}

/// Cut the accumulated rows to the requested count; flag when the site had
/// fewer to offer.
fn finish(mut records: Vec<SubmissionRecord>, count: usize) -> RecentSubmissions {
    let truncated = records.len() < count;
    records.truncate(count);
    RecentSubmissions { records, truncated }
}

static SCRAPER: Lazy<RecentPageScraper> = Lazy::new(RecentPageScraper::new);

/// The most recent submissions of `handle`, newest first, at most `count`.
pub async fn recent_submissions(handle: &str, count: usize) -> Result<RecentSubmissions> {
    let fetcher = PageFetcher::new();

    let mut records = Vec::new();
    for page in 0..MAX_PAGES {
        if records.len() >= count {
            break;
        }
        if page > 0 {
            time::sleep(PAGE_INTERVAL).await;
        }

        let html = fetcher.recent_page(handle, page).await?;
        let rows = SCRAPER.extract_rows(&html)?;
        if rows.is_empty() {
            tracing::info!("recent listing of {} exhausted after {} pages", handle, page);
            break;
        }
        records.extend(rows);
    }
    Ok(finish(records, count))
}
