pub mod fetcher;
pub mod recent;
pub mod scraper;

pub use self::recent::recent_submissions;
pub use self::scraper::user_data;
