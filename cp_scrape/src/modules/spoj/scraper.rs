use crate::types::profile::SpojProfile;
use cp_scrape_libs::{
    document,
    fetch::{self, Result},
};
use once_cell::sync::Lazy;
use reqwest::Url;
use scraper::{Html, Selector};

const USER_URL: &str = "https://www.spoj.com/users/";

pub struct SolvedTableScraper {
    table: Selector,
    tr: Selector,
    td: Selector,
}

impl SolvedTableScraper {
    pub fn new() -> Self {
        SolvedTableScraper {
            table: document::selector("table.table.table-condensed"),
            tr: document::selector("tr"),
            td: document::selector("td"),
        }
    }

    /// The solved-problem cells, flattened in document order. `None` when
    /// the page carries no solved-problem table: an unknown handle and a
    /// user who solved nothing render identically, so both count as
    /// "no data" rather than an error.
    pub fn extract(&self, handle: &str, html: &Html) -> Option<SpojProfile> {
        let table = html.select(&self.table).next()?;

        let mut solved = Vec::new();
        for row in table.select(&self.tr) {
            for cell in row.select(&self.td) {
                let text = document::text_of(cell);
                if !text.is_empty() {
                    solved.push(text);
                }
            }
        }
        Some(SpojProfile {
            handle: handle.to_string(),
            solved,
        })
    }
}

static SCRAPER: Lazy<SolvedTableScraper> = Lazy::new(SolvedTableScraper::new);

/// Scrape the solved-problem listing of `handle`.
pub async fn user_data(handle: &str) -> Result<Option<SpojProfile>> {
    let client = fetch::page_client();
    let url = Url::parse(USER_URL).unwrap().join(handle)?;
    tracing::info!("fetching spoj profile page of {}", handle);
    let body = fetch::fetch_page(&client, url).await?;
    Ok(SCRAPER.extract(handle, &Html::parse_document(&body)))
}
