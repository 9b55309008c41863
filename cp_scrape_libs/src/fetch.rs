use reqwest::{redirect::Policy, Client, Url};
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

/// User-Agent sent with every page request. At least one of the scraped
/// sites answers bot-looking clients with an error page.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to request page")]
    Request(#[from] reqwest::Error),
    #[error("invalid request url")]
    InvalidUrl(#[from] url::ParseError),
    #[error("user not found")]
    NotFound,
    #[error("malformed page: {0}")]
    Parse(String),
}

/// Client for plain page scraping. Redirects are not followed so that a
/// redirect answer stays observable to the caller.
pub fn page_client() -> Client {
    Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .gzip(true)
        .timeout(REQUEST_TIMEOUT)
        .redirect(Policy::none())
        .build()
        .unwrap()
}

/// Client for JSON API endpoints.
pub fn api_client() -> Client {
    Client::builder().timeout(REQUEST_TIMEOUT).build().unwrap()
}

/// Fetch a page body as text. The scraped sites answer requests for unknown
/// entities with a redirect towards their front page, reported here as
/// `NotFound`.
pub async fn fetch_page(client: &Client, url: Url) -> Result<String> {
    let res = client.get(url).send().await?;
    if res.status().is_redirection() {
        return Err(ScrapeError::NotFound);
    }
    let res = res.error_for_status()?;
    Ok(res.text().await?)
}
