use cp_scrape_libs::fetch::{self, Result};
use reqwest::{Client, Url};
use scraper::Html;

const USER_URL: &str = "https://www.codechef.com/users/";
const RECENT_URL: &str = "https://www.codechef.com/recent/user";

/// Downloads CodeChef pages. An unknown handle is answered with a redirect
/// towards the front page, which surfaces as `ScrapeError::NotFound`.
pub struct PageFetcher {
    user_url: Url,
    recent_url: Url,
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Self {
        PageFetcher {
            user_url: Url::parse(USER_URL).unwrap(),
            recent_url: Url::parse(RECENT_URL).unwrap(),
            client: fetch::page_client(),
        }
    }

    /// Fetch and parse the profile page of `handle`.
    pub async fn user_page(&self, handle: &str) -> Result<Html> {
        let url = self.user_url.join(handle)?;
        tracing::info!("fetching codechef profile page of {}", handle);
        let body = fetch::fetch_page(&self.client, url).await?;
        Ok(Html::parse_document(&body))
    }

    /// Fetch and parse one page of the recent-submissions listing.
    pub async fn recent_page(&self, handle: &str, page: usize) -> Result<Html> {
        let mut url = self.recent_url.clone();
        url.query_pairs_mut()
            .append_pair("user_handle", handle)
            .append_pair("page", &page.to_string());
        tracing::debug!("fetching recent submissions page {} of {}", page, handle);
        let body = fetch::fetch_page(&self.client, url).await?;
        Ok(Html::parse_document(&body))
    }
}
